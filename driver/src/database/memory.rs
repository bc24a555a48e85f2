use std::cmp::Reverse;
use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{HotelQuery, OrderQuery};
use kernel::interface::update::{HotelModifier, InventoryModifier, OrderModifier};
use kernel::prelude::entity::{
    BannerLimit, Hotel, HotelFilter, HotelId, Inventory, Order, OrderId, OrderNumber, Phone,
    RoomCount, RoomTypeId, UserId,
};
use kernel::KernelError;

const TERMINAL_ORDER: &str = "Order already cancelled";

#[derive(Debug, Clone, Default)]
struct MemoryState {
    hotels: Vec<Hotel>,
    orders: Vec<Order>,
}

/// Process-local store. A transaction holds the whole store until it ends.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = self.state.clone().lock_owned().await;
        let backup = guard.clone();
        Ok(InMemoryTransaction {
            guard,
            backup: Some(backup),
        })
    }
}

/// Writes go straight to the store; the snapshot taken at start is restored
/// unless the transaction is committed.
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    backup: Option<MemoryState>,
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        self.backup = None;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        if let Some(backup) = self.backup.take() {
            *self.guard = backup;
        }
    }
}

pub struct InMemoryHotelRepository;

#[async_trait::async_trait]
impl HotelQuery for InMemoryHotelRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &HotelId,
    ) -> error_stack::Result<Option<Hotel>, KernelError> {
        Ok(con.guard.hotels.iter().find(|hotel| hotel.id() == id).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &HotelId,
    ) -> error_stack::Result<Option<Hotel>, KernelError> {
        self.find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        let mut hotels = con.guard.hotels.clone();
        hotels.sort_by_key(|hotel| Reverse(*hotel.created_at().as_ref()));
        Ok(hotels)
    }

    async fn find_by_owner(
        &self,
        con: &mut InMemoryTransaction,
        owner: &UserId,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        let mut hotels = con
            .guard
            .hotels
            .iter()
            .filter(|hotel| hotel.owner() == owner)
            .cloned()
            .collect::<Vec<_>>();
        hotels.sort_by_key(|hotel| Reverse(*hotel.created_at().as_ref()));
        Ok(hotels)
    }

    async fn find_approved(
        &self,
        con: &mut InMemoryTransaction,
        filter: &HotelFilter,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        Ok(con
            .guard
            .hotels
            .iter()
            .filter(|hotel| hotel.is_published() && filter.matches(hotel))
            .cloned()
            .collect())
    }

    async fn find_featured(
        &self,
        con: &mut InMemoryTransaction,
        limit: &BannerLimit,
    ) -> error_stack::Result<Vec<Hotel>, KernelError> {
        let mut hotels = con
            .guard
            .hotels
            .iter()
            .filter(|hotel| hotel.is_published() && *hotel.featured().as_ref())
            .cloned()
            .collect::<Vec<_>>();
        hotels.sort_by_key(|hotel| Reverse(*hotel.updated_at().as_ref()));
        hotels.truncate(*limit.as_ref() as usize);
        Ok(hotels)
    }
}

#[async_trait::async_trait]
impl HotelModifier for InMemoryHotelRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        hotel: &Hotel,
    ) -> error_stack::Result<(), KernelError> {
        if con.guard.hotels.iter().any(|stored| stored.id() == hotel.id()) {
            return Err(Report::new(KernelError::Concurrency)
                .attach_printable(format!("Hotel {} already exists", hotel.id().as_ref())));
        }
        con.guard.hotels.push(hotel.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        hotel: &Hotel,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con
            .guard
            .hotels
            .iter_mut()
            .find(|stored| stored.id() == hotel.id())
        {
            *stored = hotel.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        hotel_id: &HotelId,
    ) -> error_stack::Result<(), KernelError> {
        con.guard.hotels.retain(|hotel| hotel.id() != hotel_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl InventoryModifier for InMemoryHotelRepository {
    type Transaction = InMemoryTransaction;

    async fn try_reserve(
        &self,
        con: &mut InMemoryTransaction,
        hotel_id: &HotelId,
        room_type_id: &RoomTypeId,
        count: &RoomCount,
    ) -> error_stack::Result<bool, KernelError> {
        let count = *count.as_ref();
        Ok(adjust_inventory(con, hotel_id, room_type_id, |inventory| {
            (inventory >= count).then_some(inventory - count)
        }))
    }

    async fn release(
        &self,
        con: &mut InMemoryTransaction,
        hotel_id: &HotelId,
        room_type_id: &RoomTypeId,
        count: &RoomCount,
    ) -> error_stack::Result<(), KernelError> {
        let count = *count.as_ref();
        adjust_inventory(con, hotel_id, room_type_id, |inventory| Some(inventory + count));
        Ok(())
    }
}

/// Applies `change` to one room type's inventory. Returns false when the room
/// type is missing or `change` declines.
fn adjust_inventory(
    con: &mut InMemoryTransaction,
    hotel_id: &HotelId,
    room_type_id: &RoomTypeId,
    change: impl FnOnce(i32) -> Option<i32>,
) -> bool {
    let Some(hotel) = con.guard.hotels.iter_mut().find(|hotel| hotel.id() == hotel_id) else {
        return false;
    };
    let Some(room_type) = hotel.room_types().find(room_type_id).cloned() else {
        return false;
    };
    let Some(inventory) = change(*room_type.inventory().as_ref()) else {
        return false;
    };
    let room_type = room_type.reconstruct(|r| r.inventory = Inventory::new(inventory));
    *hotel = hotel.clone().reconstruct(|h| {
        h.room_types.replace(room_type);
    });
    true
}

pub struct InMemoryOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for InMemoryOrderRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        Ok(con.guard.orders.iter().find(|order| order.id() == id).cloned())
    }

    async fn find_by_phone(
        &self,
        con: &mut InMemoryTransaction,
        phone: &Phone,
        limit: i64,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        let mut orders = con
            .guard
            .orders
            .iter()
            .filter(|order| order.guest().phone() == phone)
            .cloned()
            .collect::<Vec<_>>();
        orders.sort_by_key(|order| Reverse(*order.created_at().as_ref()));
        orders.truncate(limit.max(0) as usize);
        Ok(orders)
    }

    async fn exists_number(
        &self,
        con: &mut InMemoryTransaction,
        number: &OrderNumber,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con.guard.orders.iter().any(|order| order.number() == number))
    }
}

#[async_trait::async_trait]
impl OrderModifier for InMemoryOrderRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        if con
            .guard
            .orders
            .iter()
            .any(|stored| stored.number() == order.number())
        {
            return Err(Report::new(KernelError::Concurrency).attach_printable(format!(
                "Order number {} is already taken",
                order.number().as_ref()
            )));
        }
        con.guard.orders.push(order.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con
            .guard
            .orders
            .iter_mut()
            .find(|stored| stored.id() == order.id())
        {
            if stored.status().is_terminal() {
                return Err(KernelError::Conflict.with_message(TERMINAL_ORDER));
            }
            *stored = order.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{HotelQuery, OrderQuery};
    use kernel::interface::update::{HotelModifier, InventoryModifier, OrderModifier};
    use kernel::prelude::entity::{
        Address, Amenities, BedType, Breakfast, CancelPolicy, City, CreatedAt, Featured, Guest,
        GuestName, Hotel, HotelId, HotelName, HotelStatus, Inventory, MaxGuests, OpeningDate,
        Order, OrderId, OrderNumber, OrderStatus, Phone, Price, Remarks, RoomCount, RoomType,
        RoomTypeId, RoomTypeName, RoomTypes, StarRating, StayPeriod, Tags, UpdatedAt, UserId,
    };
    use kernel::KernelError;

    use super::{InMemoryDatabase, InMemoryHotelRepository, InMemoryOrderRepository};

    fn hotel(inventory: i32) -> Hotel {
        let now = OffsetDateTime::now_utc();
        Hotel::new(
            HotelId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            HotelName::new("外滩酒店"),
            HotelName::new("Bund Hotel"),
            Address::new("2 Bund Road"),
            City::new("Shanghai"),
            StarRating::new(4),
            OpeningDate::new(date!(2018 - 03 - 15)),
            Tags::default(),
            Amenities::default(),
            None,
            vec![],
            None,
            Featured::new(false),
            HotelStatus::Approved,
            None,
            RoomTypes::new(vec![RoomType::new(
                RoomTypeId::new(Uuid::new_v4()),
                RoomTypeName::new("Twin"),
                Price::new(300),
                BedType::new("twin"),
                Breakfast::new(false),
                CancelPolicy::FreeCancellation,
                MaxGuests::new(2),
                Inventory::new(inventory),
            )]),
            CreatedAt::new(now),
            UpdatedAt::new(now),
        )
    }

    #[tokio::test]
    async fn uncommitted_writes_are_discarded() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let hotel = hotel(1);

        let mut con = db.transact().await?;
        InMemoryHotelRepository.create(&mut con, &hotel).await?;
        drop(con);

        let mut con = db.transact().await?;
        assert!(InMemoryHotelRepository.find_by_id(&mut con, hotel.id()).await?.is_none());
        InMemoryHotelRepository.create(&mut con, &hotel).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        assert!(InMemoryHotelRepository.find_by_id(&mut con, hotel.id()).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn reserve_only_when_enough_inventory() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let hotel = hotel(2);
        let room_type_id = hotel.room_types().iter().next().unwrap().id().clone();

        let mut con = db.transact().await?;
        InMemoryHotelRepository.create(&mut con, &hotel).await?;
        let repo = InMemoryHotelRepository;
        assert!(!repo.try_reserve(&mut con, hotel.id(), &room_type_id, &RoomCount::new(3)).await?);
        assert!(repo.try_reserve(&mut con, hotel.id(), &room_type_id, &RoomCount::new(2)).await?);
        assert!(!repo.try_reserve(&mut con, hotel.id(), &room_type_id, &RoomCount::new(1)).await?);
        repo.release(&mut con, hotel.id(), &room_type_id, &RoomCount::new(1)).await?;

        let stored = repo.find_by_id(&mut con, hotel.id()).await?.unwrap();
        let inventory = *stored.room_types().find(&room_type_id).unwrap().inventory();
        assert_eq!(inventory, Inventory::new(1));
        Ok(())
    }

    #[tokio::test]
    async fn cancelled_orders_are_not_rewritten() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let hotel = hotel(2);
        let room_type = hotel.room_types().iter().next().cloned().unwrap();
        let phone = Phone::new("13500000000");
        let order = Order::place(
            OrderId::new(Uuid::new_v4()),
            OrderNumber::new("TT202406010000001000"),
            &hotel,
            &room_type,
            StayPeriod::new(date!(2024 - 06 - 01), date!(2024 - 06 - 02)).unwrap(),
            RoomCount::new(1),
            Guest::new(GuestName::new("Wei Hua"), phone.clone(), Remarks::new("")),
            OffsetDateTime::now_utc(),
        )?;

        let mut con = db.transact().await?;
        InMemoryOrderRepository.create(&mut con, &order).await?;
        let mut stale = order.clone();
        let mut cancelled = order.clone();
        cancelled.cancel(&phone, None, OffsetDateTime::now_utc())?;
        InMemoryOrderRepository.update(&mut con, &cancelled).await?;

        stale.cancel(&phone, Some("again".into()), OffsetDateTime::now_utc())?;
        let err = InMemoryOrderRepository
            .update(&mut con, &stale)
            .await
            .unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Conflict);

        let stored = InMemoryOrderRepository
            .find_by_id(&mut con, order.id())
            .await?
            .unwrap();
        assert_eq!(stored.status(), &OrderStatus::Cancelled);
        assert_eq!(
            stored.cancellation().as_ref().unwrap().reason().as_ref(),
            "user cancelled"
        );
        Ok(())
    }
}
