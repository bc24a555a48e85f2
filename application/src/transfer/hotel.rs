use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{DestructHotel, Hotel};

use crate::transfer::{RoomTypeDto, RoomTypeInputDto};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoDto {
    pub lng: f64,
    pub lat: f64,
}

#[derive(Debug, Clone)]
pub struct HotelDto {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub name_en: String,
    pub address: String,
    pub city: String,
    pub star_rating: i32,
    pub opening_date: Date,
    pub tags: Vec<String>,
    pub amenities: Vec<String>,
    pub banner_image: Option<String>,
    pub images: Vec<String>,
    pub geo: Option<GeoDto>,
    pub featured: bool,
    pub status: String,
    pub reason: Option<String>,
    pub min_price: i64,
    pub room_types: Vec<RoomTypeDto>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Hotel> for HotelDto {
    fn from(value: Hotel) -> Self {
        let min_price = value.min_price().into();
        let DestructHotel {
            id,
            owner,
            name,
            name_en,
            address,
            city,
            star_rating,
            opening_date,
            tags,
            amenities,
            banner_image,
            images,
            geo,
            featured,
            status,
            reason,
            room_types,
            created_at,
            updated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            owner: owner.into(),
            name: name.into(),
            name_en: name_en.into(),
            address: address.into(),
            city: city.into(),
            star_rating: star_rating.into(),
            opening_date: opening_date.into(),
            tags: tags.into(),
            amenities: amenities.into(),
            banner_image: banner_image.map(Into::into),
            images: images.into_iter().map(Into::into).collect(),
            geo: geo.map(|geo| GeoDto {
                lng: geo.lng,
                lat: geo.lat,
            }),
            featured: featured.into(),
            status: status.as_str().to_string(),
            reason: reason.map(Into::into),
            min_price,
            room_types: room_types.into_iter().map(RoomTypeDto::from).collect(),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

pub struct CreateHotelDto {
    pub name: String,
    pub name_en: String,
    pub address: String,
    pub city: Option<String>,
    pub star_rating: i32,
    pub opening_date: Date,
    pub tags: Vec<String>,
    pub amenities: Vec<String>,
    pub banner_image: Option<String>,
    pub images: Vec<String>,
    pub geo: Option<GeoDto>,
    pub featured: Option<bool>,
    pub room_types: Vec<RoomTypeInputDto>,
}

/// Partial hotel edit. A present `room_types` replaces the whole list;
/// entries carrying a known id keep that id.
#[derive(Default)]
pub struct UpdateHotelDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub star_rating: Option<i32>,
    pub opening_date: Option<Date>,
    pub tags: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub banner_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub geo: Option<GeoDto>,
    pub featured: Option<bool>,
    pub room_types: Option<Vec<RoomTypeInputDto>>,
}

pub struct GetHotelDto {
    pub id: Uuid,
}

pub struct DeleteHotelDto {
    pub id: Uuid,
}

pub struct ChangeHotelStatusDto {
    pub id: Uuid,
    pub status: String,
    pub reason: Option<String>,
}
