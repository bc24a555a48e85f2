use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnHotelQuery, HotelQuery};
use kernel::interface::update::{DependOnHotelModifier, HotelModifier};
use kernel::prelude::entity::{DestructHotel, Hotel, HotelId, Identity, RoomTypeId};
use kernel::KernelError;

use crate::transfer::{AddRoomTypeDto, DeleteRoomTypeDto, RoomTypeDto, UpdateRoomTypeDto};

#[async_trait::async_trait]
pub trait AddRoomTypeService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
    async fn add_room_type(
        &self,
        identity: &Identity,
        dto: AddRoomTypeDto,
    ) -> error_stack::Result<RoomTypeDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let hotel = self
            .hotel_query()
            .find_by_id_for_update(&mut connection, &HotelId::new(dto.hotel_id))
            .await?
            .ok_or_else(|| KernelError::NotFound.with_message("Hotel not found"))?;
        identity.authorize_owner(hotel.owner())?;

        let room_type = dto
            .room_type
            .into_room_type(RoomTypeId::new(Uuid::new_v4()))?;
        let added = room_type.clone();
        let hotel = edit(hotel, identity, |h| h.room_types.push(added))?;

        self.hotel_modifier()
            .update(&mut connection, &hotel)
            .await?;
        connection.commit().await?;
        Ok(room_type.into())
    }
}

impl<T> AddRoomTypeService for T where
    T: DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
}

#[async_trait::async_trait]
pub trait UpdateRoomTypeService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
    async fn update_room_type(
        &self,
        identity: &Identity,
        dto: UpdateRoomTypeDto,
    ) -> error_stack::Result<RoomTypeDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let hotel = self
            .hotel_query()
            .find_by_id_for_update(&mut connection, &HotelId::new(dto.hotel_id))
            .await?
            .ok_or_else(|| KernelError::NotFound.with_message("Hotel not found"))?;
        identity.authorize_owner(hotel.owner())?;

        let current = hotel
            .room_types()
            .find(&RoomTypeId::new(dto.room_type_id))
            .cloned()
            .ok_or_else(|| KernelError::NotFound.with_message("Room type not found"))?;
        let room_type = dto.patch.apply(current)?;
        let replacement = room_type.clone();
        let hotel = edit(hotel, identity, |h| {
            h.room_types.replace(replacement);
        })?;

        self.hotel_modifier()
            .update(&mut connection, &hotel)
            .await?;
        connection.commit().await?;
        Ok(room_type.into())
    }
}

impl<T> UpdateRoomTypeService for T where
    T: DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
}

#[async_trait::async_trait]
pub trait DeleteRoomTypeService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
    /// The last room type of a hotel cannot be deleted.
    async fn delete_room_type(
        &self,
        identity: &Identity,
        dto: DeleteRoomTypeDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let hotel = self
            .hotel_query()
            .find_by_id_for_update(&mut connection, &HotelId::new(dto.hotel_id))
            .await?
            .ok_or_else(|| KernelError::NotFound.with_message("Hotel not found"))?;
        identity.authorize_owner(hotel.owner())?;

        let id = RoomTypeId::new(dto.room_type_id);
        if hotel.room_types().find(&id).is_none() {
            return Err(KernelError::NotFound.with_message("Room type not found"));
        }
        let hotel = edit(hotel, identity, |h| {
            h.room_types.remove(&id);
        })?;

        self.hotel_modifier()
            .update(&mut connection, &hotel)
            .await?;
        connection.commit().await?;
        Ok(())
    }
}

impl<T> DeleteRoomTypeService for T where
    T: DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
}

/// Applies a content edit, then re-checks the aggregate.
fn edit(
    hotel: Hotel,
    editor: &Identity,
    f: impl FnOnce(&mut DestructHotel),
) -> error_stack::Result<Hotel, KernelError> {
    let mut hotel = hotel.reconstruct(f);
    hotel.touch(editor, OffsetDateTime::now_utc());
    hotel.validate()?;
    Ok(hotel)
}
