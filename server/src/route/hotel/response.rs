use axum::Json;
use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use application::transfer::{GeoDto, HotelDto, RoomTypeDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct GeoResponse {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [f64; 2],
}

impl From<GeoDto> for GeoResponse {
    fn from(GeoDto { lng, lat }: GeoDto) -> Self {
        Self {
            kind: "Point",
            coordinates: [lng, lat],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeResponse {
    id: Uuid,
    #[serde(rename = "type")]
    name: String,
    price: i64,
    bed_type: String,
    breakfast_included: bool,
    cancel_policy: String,
    max_guests: i32,
    inventory: i32,
}

impl From<RoomTypeDto> for RoomTypeResponse {
    fn from(value: RoomTypeDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            price: value.price,
            bed_type: value.bed_type,
            breakfast_included: value.breakfast,
            cancel_policy: value.cancel_policy,
            max_guests: value.max_guests,
            inventory: value.inventory,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelResponse {
    id: Uuid,
    created_by: Uuid,
    name_cn: String,
    name_en: String,
    address: String,
    city: String,
    star_rating: i32,
    opening_date: Date,
    tags: Vec<String>,
    amenities: Vec<String>,
    banner_image: Option<String>,
    images: Vec<String>,
    geo: Option<GeoResponse>,
    featured: bool,
    status: String,
    reason: Option<String>,
    min_price: i64,
    room_types: Vec<RoomTypeResponse>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<HotelDto> for HotelResponse {
    fn from(value: HotelDto) -> Self {
        Self {
            id: value.id,
            created_by: value.owner,
            name_cn: value.name,
            name_en: value.name_en,
            address: value.address,
            city: value.city,
            star_rating: value.star_rating,
            opening_date: value.opening_date,
            tags: value.tags,
            amenities: value.amenities,
            banner_image: value.banner_image,
            images: value.images,
            geo: value.geo.map(GeoResponse::from),
            featured: value.featured,
            status: value.status,
            reason: value.reason,
            min_price: value.min_price,
            room_types: value
                .room_types
                .into_iter()
                .map(RoomTypeResponse::from)
                .collect(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

pub struct Presenter;

impl Exhaust<HotelDto> for Presenter {
    type To = Json<HotelResponse>;
    fn emit(&self, input: HotelDto) -> Self::To {
        Json(HotelResponse::from(input))
    }
}

impl Exhaust<Vec<HotelDto>> for Presenter {
    type To = Json<Vec<HotelResponse>>;
    fn emit(&self, input: Vec<HotelDto>) -> Self::To {
        Json(input.into_iter().map(HotelResponse::from).collect())
    }
}

impl Exhaust<RoomTypeDto> for Presenter {
    type To = Json<RoomTypeResponse>;
    fn emit(&self, input: RoomTypeDto) -> Self::To {
        Json(RoomTypeResponse::from(input))
    }
}

impl Exhaust<()> for Presenter {
    type To = ();
    fn emit(&self, _: ()) -> Self::To {}
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn geo_is_a_geojson_point() {
        let geo = GeoResponse::from(GeoDto {
            lng: 121.49,
            lat: 31.24,
        });
        assert_eq!(
            serde_json::to_value(geo).unwrap(),
            serde_json::json!({"type": "Point", "coordinates": [121.49, 31.24]})
        );
    }

    #[test]
    fn room_type_uses_wire_names() {
        let room_type = RoomTypeResponse::from(RoomTypeDto {
            id: Uuid::nil(),
            name: "Deluxe".into(),
            price: 300,
            bed_type: "king".into(),
            breakfast: true,
            cancel_policy: "免费取消".into(),
            max_guests: 2,
            inventory: 5,
        });
        let value = serde_json::to_value(room_type).unwrap();
        assert_eq!(value["type"], "Deluxe");
        assert_eq!(value["breakfastIncluded"], true);
        assert_eq!(value["maxGuests"], 2);
    }
}
