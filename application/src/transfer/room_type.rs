use error_stack::Report;
use uuid::Uuid;

use kernel::prelude::entity::{
    BedType, Breakfast, CancelPolicy, DestructRoomType, Inventory, MaxGuests, Price, RoomType,
    RoomTypeId, RoomTypeName,
};
use kernel::KernelError;

#[derive(Debug, Clone)]
pub struct RoomTypeDto {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub bed_type: String,
    pub breakfast: bool,
    pub cancel_policy: String,
    pub max_guests: i32,
    pub inventory: i32,
}

impl From<RoomType> for RoomTypeDto {
    fn from(value: RoomType) -> Self {
        let DestructRoomType {
            id,
            name,
            price,
            bed_type,
            breakfast,
            cancel_policy,
            max_guests,
            inventory,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            bed_type: bed_type.into(),
            breakfast: breakfast.into(),
            cancel_policy: cancel_policy.as_str().to_string(),
            max_guests: max_guests.into(),
            inventory: inventory.into(),
        }
    }
}

/// Room type fields as submitted by a merchant. Missing fields take defaults on creation.
#[derive(Debug, Clone, Default)]
pub struct RoomTypeInputDto {
    pub id: Option<Uuid>,
    pub name: String,
    pub price: i64,
    pub bed_type: Option<String>,
    pub breakfast: Option<bool>,
    pub cancel_policy: Option<String>,
    pub max_guests: Option<i32>,
    pub inventory: Option<i32>,
}

impl RoomTypeInputDto {
    pub fn into_room_type(self, id: RoomTypeId) -> Result<RoomType, Report<KernelError>> {
        Ok(RoomType::new(
            id,
            RoomTypeName::new(self.name.trim()),
            Price::new(self.price),
            self.bed_type.map(BedType::new).unwrap_or_default(),
            Breakfast::new(self.breakfast.unwrap_or(false)),
            parse_cancel_policy(self.cancel_policy.as_deref())?,
            self.max_guests.map(MaxGuests::new).unwrap_or_default(),
            Inventory::new(self.inventory.unwrap_or(0)),
        ))
    }
}

/// Partial room type edit; absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct RoomTypePatchDto {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub bed_type: Option<String>,
    pub breakfast: Option<bool>,
    pub cancel_policy: Option<String>,
    pub max_guests: Option<i32>,
    pub inventory: Option<i32>,
}

impl RoomTypePatchDto {
    pub fn apply(self, room_type: RoomType) -> Result<RoomType, Report<KernelError>> {
        let cancel_policy = match self.cancel_policy {
            Some(policy) => Some(parse_cancel_policy(Some(&policy))?),
            None => None,
        };
        let DestructRoomType {
            id,
            name,
            price,
            bed_type,
            breakfast,
            cancel_policy: current_policy,
            max_guests,
            inventory,
        } = room_type.into_destruct();
        Ok(RoomType::new(
            id,
            self.name
                .map(|name| RoomTypeName::new(name.trim()))
                .unwrap_or(name),
            self.price.map(Price::new).unwrap_or(price),
            self.bed_type.map(BedType::new).unwrap_or(bed_type),
            self.breakfast.map(Breakfast::new).unwrap_or(breakfast),
            cancel_policy.unwrap_or(current_policy),
            self.max_guests.map(MaxGuests::new).unwrap_or(max_guests),
            self.inventory.map(Inventory::new).unwrap_or(inventory),
        ))
    }
}

fn parse_cancel_policy(value: Option<&str>) -> Result<CancelPolicy, Report<KernelError>> {
    let value = value.unwrap_or_default();
    CancelPolicy::from_alias(value).ok_or_else(|| {
        KernelError::Validation.with_message(format!("Unknown cancelPolicy: {value}"))
    })
}

pub struct AddRoomTypeDto {
    pub hotel_id: Uuid,
    pub room_type: RoomTypeInputDto,
}

pub struct UpdateRoomTypeDto {
    pub hotel_id: Uuid,
    pub room_type_id: Uuid,
    pub patch: RoomTypePatchDto,
}

pub struct DeleteRoomTypeDto {
    pub hotel_id: Uuid,
    pub room_type_id: Uuid,
}
