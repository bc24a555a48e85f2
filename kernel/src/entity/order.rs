mod guest;
mod id;
mod number;
mod snapshot;
mod stay;
mod status;

pub use self::{guest::*, id::*, number::*, snapshot::*, stay::*, status::*};
use destructure::{Destructure, Mutation};
use error_stack::Report;
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{CreatedAt, Hotel, HotelId, Price, RoomType, RoomTypeId, UserId};
use crate::KernelError;

const DEFAULT_CANCEL_REASON: &str = "user cancelled";

/// A booking. Catalog facts are copied in at creation and never re-read.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Order {
    id: OrderId,
    number: OrderNumber,
    status: OrderStatus,
    source: OrderSource,
    hotel_id: HotelId,
    room_type_id: RoomTypeId,
    merchant_id: UserId,
    stay: StayPeriod,
    room_count: RoomCount,
    guest: Guest,
    hotel_snapshot: HotelSnapshot,
    room_type_snapshot: RoomTypeSnapshot,
    unit_price: Price,
    total_price: Price,
    cancellation: Option<Cancellation>,
    created_at: CreatedAt<Order>,
}

impl Order {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OrderId,
        number: OrderNumber,
        status: OrderStatus,
        source: OrderSource,
        hotel_id: HotelId,
        room_type_id: RoomTypeId,
        merchant_id: UserId,
        stay: StayPeriod,
        room_count: RoomCount,
        guest: Guest,
        hotel_snapshot: HotelSnapshot,
        room_type_snapshot: RoomTypeSnapshot,
        unit_price: Price,
        total_price: Price,
        cancellation: Option<Cancellation>,
        created_at: CreatedAt<Order>,
    ) -> Self {
        Self {
            id,
            number,
            status,
            source,
            hotel_id,
            room_type_id,
            merchant_id,
            stay,
            room_count,
            guest,
            hotel_snapshot,
            room_type_snapshot,
            unit_price,
            total_price,
            cancellation,
            created_at,
        }
    }

    /// New pending order priced at the room type's current rate.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        id: OrderId,
        number: OrderNumber,
        hotel: &Hotel,
        room_type: &RoomType,
        stay: StayPeriod,
        room_count: RoomCount,
        guest: Guest,
        now: OffsetDateTime,
    ) -> Result<Self, Report<KernelError>> {
        let unit_price = *room_type.price();
        let total_price = stay
            .nights()
            .checked_mul(i64::from(*room_count.as_ref()))
            .and_then(|units| unit_price.checked_mul(units))
            .ok_or_else(|| KernelError::Validation.with_message("Total price is out of range"))?;
        Ok(Self {
            id,
            number,
            status: OrderStatus::Pending,
            source: OrderSource::Mobile,
            hotel_id: hotel.id().clone(),
            room_type_id: room_type.id().clone(),
            merchant_id: hotel.owner().clone(),
            stay,
            room_count,
            guest,
            hotel_snapshot: HotelSnapshot::capture(hotel),
            room_type_snapshot: RoomTypeSnapshot::capture(room_type),
            unit_price,
            total_price,
            cancellation: None,
            created_at: CreatedAt::new(now),
        })
    }

    pub fn cancel(
        &mut self,
        phone: &Phone,
        reason: Option<String>,
        now: OffsetDateTime,
    ) -> Result<(), Report<KernelError>> {
        if self.guest.phone() != phone {
            return Err(KernelError::Forbidden.with_message("Phone verification failed"));
        }
        match self.status {
            OrderStatus::Cancelled => {
                return Err(KernelError::Conflict.with_message("Order already cancelled"))
            }
            OrderStatus::Completed => {
                return Err(
                    KernelError::Conflict.with_message("Completed order cannot be cancelled")
                )
            }
            OrderStatus::Pending | OrderStatus::Confirmed => {}
        }
        if !self.room_type_snapshot.cancel_policy().is_refundable() {
            return Err(KernelError::Conflict
                .with_message("This order is non-refundable and cannot be cancelled"));
        }

        let reason = reason
            .map(|reason| reason.trim().to_string())
            .filter(|reason| !reason.is_empty())
            .unwrap_or_else(|| DEFAULT_CANCEL_REASON.to_string());
        self.substitute(|order| {
            *order.status = OrderStatus::Cancelled;
            *order.cancellation = Some(Cancellation::new(CancelReason::new(reason), now));
        });
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::entity::hotel::test::hotel;
    use crate::entity::{CancelPolicy, HotelStatus};

    fn guest(phone: &str) -> Guest {
        Guest::new(GuestName::new("Li Lei"), Phone::new(phone), Remarks::new(""))
    }

    fn place(hotel: &Hotel, room_type: &RoomType, rooms: i32) -> Order {
        let stay = StayPeriod::new(date!(2024 - 01 - 01), date!(2024 - 01 - 03)).unwrap();
        Order::place(
            OrderId::new(Uuid::new_v4()),
            OrderNumber::new("TT202401010000001234"),
            hotel,
            room_type,
            stay,
            RoomCount::new(rooms),
            guest("13800000000"),
            OffsetDateTime::now_utc(),
        )
        .unwrap()
    }

    #[test]
    fn total_is_unit_times_nights_times_rooms() {
        let hotel = hotel(HotelStatus::Approved, &[450]);
        let room_type = hotel.room_types().iter().next().unwrap().clone();
        let order = place(&hotel, &room_type, 3);
        assert_eq!(order.unit_price(), &Price::new(450));
        assert_eq!(order.total_price(), &Price::new(450 * 2 * 3));
        assert_eq!(order.status(), &OrderStatus::Pending);
        assert_eq!(order.merchant_id(), hotel.owner());
    }

    #[test]
    fn snapshot_survives_catalog_edits() {
        let hotel = hotel(HotelStatus::Approved, &[450]);
        let room_type = hotel.room_types().iter().next().unwrap().clone();
        let order = place(&hotel, &room_type, 1);
        let before = order.clone();

        let _edited = room_type.reconstruct(|r| {
            r.price = Price::new(9999);
            r.cancel_policy = CancelPolicy::NonRefundable;
        });
        assert_eq!(order, before);
        assert_eq!(
            order.room_type_snapshot().cancel_policy(),
            &CancelPolicy::FreeCancellation
        );
    }

    #[test]
    fn cancel_once_then_conflict() {
        let hotel = hotel(HotelStatus::Approved, &[450]);
        let room_type = hotel.room_types().iter().next().unwrap().clone();
        let mut order = place(&hotel, &room_type, 1);
        let phone = Phone::new("13800000000");
        let now = OffsetDateTime::now_utc();

        order.cancel(&phone, None, now).unwrap();
        assert_eq!(order.status(), &OrderStatus::Cancelled);
        let cancellation = order.cancellation().as_ref().unwrap();
        assert_eq!(cancellation.reason().as_ref(), "user cancelled");

        let err = order.cancel(&phone, None, now).unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Conflict);
    }

    #[test]
    fn wrong_phone_is_forbidden() {
        let hotel = hotel(HotelStatus::Approved, &[450]);
        let room_type = hotel.room_types().iter().next().unwrap().clone();
        let mut order = place(&hotel, &room_type, 1);
        let err = order
            .cancel(&Phone::new("13900000000"), None, OffsetDateTime::now_utc())
            .unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Forbidden);
        assert_eq!(order.status(), &OrderStatus::Pending);
    }

    #[test]
    fn completed_and_non_refundable_cannot_be_cancelled() {
        let hotel = hotel(HotelStatus::Approved, &[450]);
        let room_type = hotel.room_types().iter().next().unwrap().clone();
        let phone = Phone::new("13800000000");
        let now = OffsetDateTime::now_utc();

        let mut completed =
            place(&hotel, &room_type, 1).reconstruct(|o| o.status = OrderStatus::Completed);
        let err = completed.cancel(&phone, None, now).unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Conflict);

        let strict = room_type.reconstruct(|r| r.cancel_policy = CancelPolicy::NonRefundable);
        let mut order = place(&hotel, &strict, 1);
        let err = order.cancel(&phone, Some("plans changed".into()), now).unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Conflict);
        assert!(order.cancellation().is_none());
    }

    #[test]
    fn total_out_of_range_is_refused() {
        let hotel = hotel(HotelStatus::Approved, &[i64::MAX / 2]);
        assert!(hotel.validate().is_ok());
        let room_type = hotel.room_types().iter().next().unwrap().clone();
        let stay = StayPeriod::new(date!(2024 - 01 - 01), date!(2024 - 01 - 04)).unwrap();
        let err = Order::place(
            OrderId::new(Uuid::new_v4()),
            OrderNumber::new("TT202401010000001234"),
            &hotel,
            &room_type,
            stay,
            RoomCount::new(1),
            guest("13800000000"),
            OffsetDateTime::now_utc(),
        )
        .unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Validation);
        assert_eq!(crate::error_message(&err), Some("Total price is out of range"));
    }
}
