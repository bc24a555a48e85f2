use serde::Deserialize;
use serde_json::Number;
use time::Date;
use uuid::Uuid;

use application::transfer::{
    AddRoomTypeDto, ChangeHotelStatusDto, CreateHotelDto, DeleteHotelDto, DeleteRoomTypeDto,
    GeoDto, GetHotelDto, RoomTypeInputDto, RoomTypePatchDto, UpdateHotelDto, UpdateRoomTypeDto,
};
use kernel::prelude::entity::parse_calendar_date;
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};
use crate::error::ErrorStatus;

/// GeoJSON point, `[lng, lat]`.
#[derive(Debug, Deserialize)]
pub struct GeoRequest {
    coordinates: [f64; 2],
}

impl From<GeoRequest> for GeoDto {
    fn from(GeoRequest { coordinates: [lng, lat] }: GeoRequest) -> Self {
        GeoDto { lng, lat }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeRequest {
    id: Option<Uuid>,
    #[serde(default, rename = "type")]
    name: String,
    price: Option<Number>,
    bed_type: Option<String>,
    breakfast_included: Option<bool>,
    cancel_policy: Option<String>,
    max_guests: Option<i32>,
    inventory: Option<i32>,
}

impl TryFrom<RoomTypeRequest> for RoomTypeInputDto {
    type Error = ErrorStatus;
    fn try_from(value: RoomTypeRequest) -> Result<Self, Self::Error> {
        Ok(RoomTypeInputDto {
            id: value.id,
            name: value.name,
            price: value.price.as_ref().map(whole_price).transpose()?.unwrap_or_default(),
            bed_type: value.bed_type,
            breakfast: value.breakfast_included,
            cancel_policy: value.cancel_policy,
            max_guests: value.max_guests,
            inventory: value.inventory,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypePatchRequest {
    #[serde(rename = "type")]
    name: Option<String>,
    price: Option<Number>,
    bed_type: Option<String>,
    breakfast_included: Option<bool>,
    cancel_policy: Option<String>,
    max_guests: Option<i32>,
    inventory: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelRequest {
    #[serde(default)]
    name_cn: String,
    #[serde(default)]
    name_en: String,
    #[serde(default)]
    address: String,
    city: Option<String>,
    #[serde(default)]
    star_rating: i32,
    opening_date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    amenities: Vec<String>,
    banner_image: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    geo: Option<GeoRequest>,
    featured: Option<bool>,
    #[serde(default)]
    room_types: Vec<RoomTypeRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotelRequest {
    name_cn: Option<String>,
    name_en: Option<String>,
    address: Option<String>,
    city: Option<String>,
    star_rating: Option<i32>,
    opening_date: Option<String>,
    tags: Option<Vec<String>>,
    amenities: Option<Vec<String>>,
    banner_image: Option<String>,
    images: Option<Vec<String>>,
    geo: Option<GeoRequest>,
    featured: Option<bool>,
    room_types: Option<Vec<RoomTypeRequest>>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    status: String,
    reason: Option<String>,
}

#[derive(Debug)]
pub struct GetHotelRequest {
    id: Uuid,
}

impl GetHotelRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteHotelRequest {
    id: Uuid,
}

impl DeleteHotelRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct RoomTypeLocator {
    hotel_id: Uuid,
    room_type_id: Uuid,
}

impl RoomTypeLocator {
    pub fn new(hotel_id: Uuid, room_type_id: Uuid) -> Self {
        Self {
            hotel_id,
            room_type_id,
        }
    }
}

fn opening_date(value: &str) -> Result<Date, ErrorStatus> {
    if value.trim().is_empty() {
        return Err(KernelError::Validation
            .with_message("Opening date is required")
            .into());
    }
    Ok(parse_calendar_date(value.trim(), "openingDate")?)
}

/// Prices are stored in whole currency units. A JSON number with a zero
/// fraction (`300.0`) is accepted, anything finer is refused.
fn whole_price(value: &Number) -> Result<i64, ErrorStatus> {
    if let Some(price) = value.as_i64() {
        return Ok(price);
    }
    value
        .as_f64()
        .filter(|price| price.fract() == 0.0 && price.abs() < i64::MAX as f64)
        .map(|price| price as i64)
        .ok_or_else(|| {
            KernelError::Validation
                .with_message("Room price must be a whole number")
                .into()
        })
}

fn room_types(inputs: Vec<RoomTypeRequest>) -> Result<Vec<RoomTypeInputDto>, ErrorStatus> {
    inputs.into_iter().map(RoomTypeInputDto::try_from).collect()
}

pub struct Transformer;

impl TryIntake<CreateHotelRequest> for Transformer {
    type To = CreateHotelDto;
    type Error = ErrorStatus;
    fn emit(&self, input: CreateHotelRequest) -> Result<Self::To, Self::Error> {
        let opening_date = opening_date(input.opening_date.as_deref().unwrap_or_default())?;
        Ok(CreateHotelDto {
            name: input.name_cn,
            name_en: input.name_en,
            address: input.address,
            city: input.city,
            star_rating: input.star_rating,
            opening_date,
            tags: input.tags,
            amenities: input.amenities,
            banner_image: input.banner_image,
            images: input.images,
            geo: input.geo.map(GeoDto::from),
            featured: input.featured,
            room_types: room_types(input.room_types)?,
        })
    }
}

impl TryIntake<(Uuid, UpdateHotelRequest)> for Transformer {
    type To = UpdateHotelDto;
    type Error = ErrorStatus;
    fn emit(&self, (id, input): (Uuid, UpdateHotelRequest)) -> Result<Self::To, Self::Error> {
        let opening_date = match input.opening_date {
            Some(value) => Some(opening_date(&value)?),
            None => None,
        };
        Ok(UpdateHotelDto {
            id,
            name: input.name_cn,
            name_en: input.name_en,
            address: input.address,
            city: input.city,
            star_rating: input.star_rating,
            opening_date,
            tags: input.tags,
            amenities: input.amenities,
            banner_image: input.banner_image,
            images: input.images,
            geo: input.geo.map(GeoDto::from),
            featured: input.featured,
            room_types: input.room_types.map(room_types).transpose()?,
        })
    }
}

impl Intake<GetHotelRequest> for Transformer {
    type To = GetHotelDto;
    fn emit(&self, input: GetHotelRequest) -> Self::To {
        GetHotelDto { id: input.id }
    }
}

impl Intake<DeleteHotelRequest> for Transformer {
    type To = DeleteHotelDto;
    fn emit(&self, input: DeleteHotelRequest) -> Self::To {
        DeleteHotelDto { id: input.id }
    }
}

impl Intake<(Uuid, StatusRequest)> for Transformer {
    type To = ChangeHotelStatusDto;
    fn emit(&self, (id, input): (Uuid, StatusRequest)) -> Self::To {
        ChangeHotelStatusDto {
            id,
            status: input.status,
            reason: input.reason,
        }
    }
}

impl TryIntake<(Uuid, RoomTypeRequest)> for Transformer {
    type To = AddRoomTypeDto;
    type Error = ErrorStatus;
    fn emit(&self, (hotel_id, input): (Uuid, RoomTypeRequest)) -> Result<Self::To, Self::Error> {
        Ok(AddRoomTypeDto {
            hotel_id,
            room_type: input.try_into()?,
        })
    }
}

impl TryIntake<(RoomTypeLocator, RoomTypePatchRequest)> for Transformer {
    type To = UpdateRoomTypeDto;
    type Error = ErrorStatus;
    fn emit(
        &self,
        (locator, input): (RoomTypeLocator, RoomTypePatchRequest),
    ) -> Result<Self::To, Self::Error> {
        Ok(UpdateRoomTypeDto {
            hotel_id: locator.hotel_id,
            room_type_id: locator.room_type_id,
            patch: RoomTypePatchDto {
                name: input.name,
                price: input.price.as_ref().map(whole_price).transpose()?,
                bed_type: input.bed_type,
                breakfast: input.breakfast_included,
                cancel_policy: input.cancel_policy,
                max_guests: input.max_guests,
                inventory: input.inventory,
            },
        })
    }
}

impl Intake<RoomTypeLocator> for Transformer {
    type To = DeleteRoomTypeDto;
    fn emit(&self, input: RoomTypeLocator) -> Self::To {
        DeleteRoomTypeDto {
            hotel_id: input.hotel_id,
            room_type_id: input.room_type_id,
        }
    }
}
