use axum::Json;
use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use application::transfer::OrderDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    id: Uuid,
    order_no: String,
    status: String,
    source: String,
    hotel_id: Uuid,
    hotel_name: String,
    hotel_city: String,
    hotel_address: String,
    star_rating: i32,
    room_type_id: Uuid,
    room_type_name: String,
    bed_type: String,
    breakfast_included: bool,
    cancel_policy: String,
    max_guests: i32,
    check_in_date: Date,
    check_out_date: Date,
    nights: i64,
    room_count: i32,
    guest_name: String,
    phone: String,
    remarks: String,
    price_snapshot: i64,
    total_price: i64,
    cancel_reason: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    cancelled_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<OrderDto> for OrderResponse {
    fn from(value: OrderDto) -> Self {
        Self {
            id: value.id,
            order_no: value.order_no,
            status: value.status,
            source: value.source,
            hotel_id: value.hotel_id,
            hotel_name: value.hotel_name,
            hotel_city: value.hotel_city,
            hotel_address: value.hotel_address,
            star_rating: value.star_rating,
            room_type_id: value.room_type_id,
            room_type_name: value.room_type_name,
            bed_type: value.bed_type,
            breakfast_included: value.breakfast_included,
            cancel_policy: value.cancel_policy,
            max_guests: value.max_guests,
            check_in_date: value.check_in_date,
            check_out_date: value.check_out_date,
            nights: value.nights,
            room_count: value.room_count,
            guest_name: value.guest_name,
            phone: value.phone,
            remarks: value.remarks,
            price_snapshot: value.unit_price,
            total_price: value.total_price,
            cancel_reason: value.cancel_reason,
            cancelled_at: value.cancelled_at,
            created_at: value.created_at,
        }
    }
}

pub struct Presenter;

impl Exhaust<OrderDto> for Presenter {
    type To = Json<OrderResponse>;
    fn emit(&self, input: OrderDto) -> Self::To {
        Json(OrderResponse::from(input))
    }
}

impl Exhaust<Vec<OrderDto>> for Presenter {
    type To = Json<Vec<OrderResponse>>;
    fn emit(&self, input: Vec<OrderDto>) -> Self::To {
        Json(input.into_iter().map(OrderResponse::from).collect())
    }
}
