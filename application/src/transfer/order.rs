use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{
    DestructCancellation, DestructGuest, DestructHotelSnapshot, DestructOrder,
    DestructRoomTypeSnapshot, Order,
};

/// Public projection of an order.
#[derive(Debug, Clone)]
pub struct OrderDto {
    pub id: Uuid,
    pub order_no: String,
    pub status: String,
    pub source: String,
    pub hotel_id: Uuid,
    pub hotel_name: String,
    pub hotel_city: String,
    pub hotel_address: String,
    pub star_rating: i32,
    pub room_type_id: Uuid,
    pub room_type_name: String,
    pub bed_type: String,
    pub breakfast_included: bool,
    pub cancel_policy: String,
    pub max_guests: i32,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub nights: i64,
    pub room_count: i32,
    pub guest_name: String,
    pub phone: String,
    pub remarks: String,
    pub unit_price: i64,
    pub total_price: i64,
    pub cancel_reason: Option<String>,
    pub cancelled_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl From<Order> for OrderDto {
    fn from(value: Order) -> Self {
        let DestructOrder {
            id,
            number,
            status,
            source,
            hotel_id,
            room_type_id,
            merchant_id: _,
            stay,
            room_count,
            guest,
            hotel_snapshot,
            room_type_snapshot,
            unit_price,
            total_price,
            cancellation,
            created_at,
        } = value.into_destruct();
        let DestructGuest {
            name: guest_name,
            phone,
            remarks,
        } = guest.into_destruct();
        let DestructHotelSnapshot {
            name: hotel_name,
            city,
            address,
            star_rating,
        } = hotel_snapshot.into_destruct();
        let DestructRoomTypeSnapshot {
            name: room_type_name,
            bed_type,
            breakfast,
            cancel_policy,
            max_guests,
        } = room_type_snapshot.into_destruct();
        let (cancel_reason, cancelled_at) = match cancellation.map(|c| c.into_destruct()) {
            Some(DestructCancellation {
                reason,
                cancelled_at,
            }) => (Some(reason.into()), Some(cancelled_at)),
            None => (None, None),
        };
        Self {
            id: id.into(),
            order_no: number.into(),
            status: status.as_str().to_string(),
            source: source.as_str().to_string(),
            hotel_id: hotel_id.into(),
            hotel_name: hotel_name.into(),
            hotel_city: city.into(),
            hotel_address: address.into(),
            star_rating: star_rating.into(),
            room_type_id: room_type_id.into(),
            room_type_name: room_type_name.into(),
            bed_type: bed_type.into(),
            breakfast_included: breakfast.into(),
            cancel_policy: cancel_policy.as_str().to_string(),
            max_guests: max_guests.into(),
            check_in_date: *stay.check_in(),
            check_out_date: *stay.check_out(),
            nights: stay.nights(),
            room_count: room_count.into(),
            guest_name: guest_name.into(),
            phone: phone.into(),
            remarks: remarks.into(),
            unit_price: unit_price.into(),
            total_price: total_price.into(),
            cancel_reason,
            cancelled_at,
            created_at: created_at.into(),
        }
    }
}

pub struct CreateOrderDto {
    pub hotel_id: Uuid,
    pub room_type_id: Uuid,
    /// ISO date; a trailing time of day is ignored.
    pub check_in_date: String,
    pub check_out_date: String,
    pub room_count: Option<i32>,
    pub guest_name: String,
    pub phone: String,
    pub remarks: Option<String>,
}

pub struct FindOrdersByPhoneDto {
    pub phone: String,
    pub limit: Option<i64>,
}

pub struct CancelOrderDto {
    pub id: Uuid,
    pub phone: String,
    pub reason: Option<String>,
}
