use rand::Rng;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnHotelQuery, DependOnOrderQuery, HotelQuery, OrderQuery};
use kernel::interface::update::{
    DependOnInventoryModifier, DependOnOrderModifier, InventoryModifier, OrderModifier,
};
use kernel::prelude::entity::{
    parse_calendar_date, Guest, GuestName, Hotel, HotelId, Order, OrderId, OrderNumber, Phone,
    Remarks, RoomCount, RoomType, RoomTypeId, StayPeriod,
};
use kernel::KernelError;

use crate::service::local_now;
use crate::transfer::{CreateOrderDto, OrderDto};

const ORDER_NUMBER_ATTEMPTS: usize = 5;

#[async_trait::async_trait]
pub trait CreateOrderService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnHotelQuery
    + DependOnOrderQuery
    + DependOnOrderModifier
    + DependOnInventoryModifier
{
    async fn create_order(&self, dto: CreateOrderDto) -> error_stack::Result<OrderDto, KernelError> {
        let guest = Guest::new(
            GuestName::new(dto.guest_name),
            Phone::new(dto.phone),
            Remarks::new(dto.remarks.unwrap_or_default()),
        );
        if guest.name().is_blank() {
            return Err(KernelError::Validation.with_message("guestName is required"));
        }
        if guest.phone().is_blank() {
            return Err(KernelError::Validation.with_message("phone is required"));
        }
        let check_in = parse_calendar_date(&dto.check_in_date, "checkInDate")?;
        let check_out = parse_calendar_date(&dto.check_out_date, "checkOutDate")?;
        let stay = StayPeriod::new(check_in, check_out)?;

        let mut connection = self.database_connection().transact().await?;

        let hotel = self
            .hotel_query()
            .find_by_id(&mut connection, &HotelId::new(dto.hotel_id))
            .await?
            .filter(Hotel::is_published)
            .ok_or_else(|| KernelError::NotFound.with_message("Hotel not found or not available"))?;
        let room_type = hotel
            .room_types()
            .find(&RoomTypeId::new(dto.room_type_id))
            .cloned()
            .ok_or_else(|| KernelError::NotFound.with_message("Room type not found"))?;
        if room_type.is_sold_out() {
            return Err(KernelError::Conflict.with_message("This room type is sold out"));
        }
        let room_count = RoomCount::new(dto.room_count.unwrap_or(1));
        if !room_count.is_valid() {
            return Err(KernelError::Validation.with_message("roomCount must be between 1 and 5"));
        }

        let reserved = self
            .inventory_modifier()
            .try_reserve(&mut connection, hotel.id(), room_type.id(), &room_count)
            .await?;
        if !reserved {
            return Err(KernelError::Conflict.with_message("This room type is sold out"));
        }

        let order = self
            .insert_order(&mut connection, &hotel, &room_type, stay, room_count, guest)
            .await?;
        connection.commit().await?;

        tracing::info!(
            "order {} placed for hotel {} ({} rooms, {} nights)",
            order.number().as_ref(),
            order.hotel_id().as_ref(),
            order.room_count().as_ref(),
            order.stay().nights()
        );
        Ok(order.into())
    }

    /// Inserts the order under a fresh order number, retrying on collisions.
    async fn insert_order(
        &self,
        connection: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        hotel: &Hotel,
        room_type: &RoomType,
        stay: StayPeriod,
        room_count: RoomCount,
        guest: Guest,
    ) -> error_stack::Result<Order, KernelError> {
        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let now = local_now();
            let number = OrderNumber::compose(now, &random_suffix())?;
            if self.order_query().exists_number(connection, &number).await? {
                continue;
            }
            let order = Order::place(
                OrderId::new(Uuid::new_v4()),
                number,
                hotel,
                room_type,
                stay,
                room_count,
                guest.clone(),
                now,
            )?;
            match self.order_modifier().create(connection, &order).await {
                Ok(()) => return Ok(order),
                Err(report) if report.current_context() == &KernelError::Concurrency => {
                    tracing::warn!("order number {} already taken", order.number().as_ref());
                }
                Err(report) => return Err(report),
            }
        }

        let now = local_now();
        let number = OrderNumber::compose(now, &fallback_suffix())?;
        let order = Order::place(
            OrderId::new(Uuid::new_v4()),
            number,
            hotel,
            room_type,
            stay,
            room_count,
            guest,
            now,
        )?;
        match self.order_modifier().create(connection, &order).await {
            Ok(()) => Ok(order),
            Err(report) => Err(report
                .change_context(KernelError::Internal)
                .attach_printable("failed to allocate order number")),
        }
    }
}

impl<T> CreateOrderService for T where
    T: DependOnDatabaseConnection
        + DependOnHotelQuery
        + DependOnOrderQuery
        + DependOnOrderModifier
        + DependOnInventoryModifier
{
}

fn random_suffix() -> String {
    rand::thread_rng().gen_range(1000..=9999).to_string()
}

fn fallback_suffix() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(8);
    suffix
}
