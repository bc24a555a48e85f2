use std::collections::HashSet;

use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnHotelQuery, HotelQuery};
use kernel::interface::update::{DependOnHotelModifier, HotelModifier};
use kernel::prelude::entity::{
    Address, Amenities, City, CreatedAt, Featured, GeoPoint, Hotel, HotelId, HotelName,
    HotelStatus, Identity, ImageUrl, OpeningDate, RoomType, RoomTypeId, RoomTypes, StarRating,
    Tags, UpdatedAt,
};
use kernel::KernelError;

use crate::transfer::{
    ChangeHotelStatusDto, CreateHotelDto, DeleteHotelDto, GetHotelDto, HotelDto,
    RoomTypeInputDto, UpdateHotelDto,
};

#[async_trait::async_trait]
pub trait CreateHotelService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelModifier
{
    async fn create_hotel(
        &self,
        identity: &Identity,
        dto: CreateHotelDto,
    ) -> error_stack::Result<HotelDto, KernelError> {
        identity.require_merchant()?;

        let now = OffsetDateTime::now_utc();
        let room_types = build_room_types(dto.room_types, &RoomTypes::default())?;
        let hotel = Hotel::new(
            HotelId::new(Uuid::new_v4()),
            identity.user_id().clone(),
            HotelName::new(dto.name.trim()),
            HotelName::new(dto.name_en.trim()),
            Address::new(dto.address.trim()),
            City::new(dto.city.unwrap_or_default().trim()),
            StarRating::new(dto.star_rating),
            OpeningDate::new(dto.opening_date),
            Tags::new(dto.tags),
            Amenities::new(dto.amenities),
            image(dto.banner_image),
            dto.images.into_iter().filter_map(|url| image(Some(url))).collect(),
            dto.geo.map(|geo| GeoPoint::new(geo.lng, geo.lat)),
            Featured::new(dto.featured.unwrap_or(false)),
            HotelStatus::Pending,
            None,
            room_types,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        );
        hotel.validate()?;

        let mut connection = self.database_connection().transact().await?;
        self.hotel_modifier()
            .create(&mut connection, &hotel)
            .await?;
        connection.commit().await?;

        tracing::info!("hotel {} submitted for review", hotel.id().as_ref());
        Ok(hotel.into())
    }
}

impl<T> CreateHotelService for T where T: DependOnDatabaseConnection + DependOnHotelModifier {}

#[async_trait::async_trait]
pub trait GetHotelService: 'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery {
    async fn get_hotel(
        &self,
        identity: &Identity,
        dto: GetHotelDto,
    ) -> error_stack::Result<HotelDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let hotel = self
            .hotel_query()
            .find_by_id(&mut connection, &HotelId::new(dto.id))
            .await?
            .ok_or_else(|| KernelError::NotFound.with_message("Hotel not found"))?;
        identity.authorize_owner(hotel.owner())?;
        Ok(hotel.into())
    }
}

impl<T> GetHotelService for T where T: DependOnDatabaseConnection + DependOnHotelQuery {}

#[async_trait::async_trait]
pub trait ListHotelsService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery
{
    /// Every hotel for admins, the caller's own hotels for merchants.
    async fn list_hotels(
        &self,
        identity: &Identity,
    ) -> error_stack::Result<Vec<HotelDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let hotels = if identity.is_admin() {
            self.hotel_query().find_all(&mut connection).await?
        } else {
            identity.require_merchant()?;
            self.hotel_query()
                .find_by_owner(&mut connection, identity.user_id())
                .await?
        };
        Ok(hotels.into_iter().map(HotelDto::from).collect())
    }
}

impl<T> ListHotelsService for T where T: DependOnDatabaseConnection + DependOnHotelQuery {}

#[async_trait::async_trait]
pub trait UpdateHotelService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
    async fn update_hotel(
        &self,
        identity: &Identity,
        dto: UpdateHotelDto,
    ) -> error_stack::Result<HotelDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let hotel = self
            .hotel_query()
            .find_by_id_for_update(&mut connection, &HotelId::new(dto.id))
            .await?
            .ok_or_else(|| KernelError::NotFound.with_message("Hotel not found"))?;
        identity.authorize_owner(hotel.owner())?;

        let room_types = match dto.room_types {
            Some(inputs) => Some(build_room_types(inputs, hotel.room_types())?),
            None => None,
        };
        let mut hotel = hotel.reconstruct(|h| {
            if let Some(name) = dto.name {
                h.name = HotelName::new(name.trim());
            }
            if let Some(name_en) = dto.name_en {
                h.name_en = HotelName::new(name_en.trim());
            }
            if let Some(address) = dto.address {
                h.address = Address::new(address.trim());
            }
            if let Some(city) = dto.city {
                h.city = City::new(city.trim());
            }
            if let Some(star_rating) = dto.star_rating {
                h.star_rating = StarRating::new(star_rating);
            }
            if let Some(opening_date) = dto.opening_date {
                h.opening_date = OpeningDate::new(opening_date);
            }
            if let Some(tags) = dto.tags {
                h.tags = Tags::new(tags);
            }
            if let Some(amenities) = dto.amenities {
                h.amenities = Amenities::new(amenities);
            }
            if let Some(banner_image) = dto.banner_image {
                h.banner_image = image(Some(banner_image));
            }
            if let Some(images) = dto.images {
                h.images = images.into_iter().filter_map(|url| image(Some(url))).collect();
            }
            if let Some(geo) = dto.geo {
                h.geo = Some(GeoPoint::new(geo.lng, geo.lat));
            }
            if let Some(featured) = dto.featured {
                h.featured = Featured::new(featured);
            }
            if let Some(room_types) = room_types {
                h.room_types = room_types;
            }
        });
        hotel.touch(identity, OffsetDateTime::now_utc());
        hotel.validate()?;

        self.hotel_modifier()
            .update(&mut connection, &hotel)
            .await?;
        connection.commit().await?;
        Ok(hotel.into())
    }
}

impl<T> UpdateHotelService for T where
    T: DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
}

#[async_trait::async_trait]
pub trait DeleteHotelService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
    async fn delete_hotel(
        &self,
        identity: &Identity,
        dto: DeleteHotelDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = HotelId::new(dto.id);
        let hotel = self
            .hotel_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| KernelError::NotFound.with_message("Hotel not found"))?;
        identity.authorize_owner(hotel.owner())?;

        self.hotel_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!("hotel {} deleted", id.as_ref());
        Ok(())
    }
}

impl<T> DeleteHotelService for T where
    T: DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
}

#[async_trait::async_trait]
pub trait ChangeHotelStatusService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
    async fn change_hotel_status(
        &self,
        identity: &Identity,
        dto: ChangeHotelStatusDto,
    ) -> error_stack::Result<HotelDto, KernelError> {
        identity.require_admin()?;
        let status = dto.status.trim().parse::<HotelStatus>()?;

        let mut connection = self.database_connection().transact().await?;
        let mut hotel = self
            .hotel_query()
            .find_by_id_for_update(&mut connection, &HotelId::new(dto.id))
            .await?
            .ok_or_else(|| KernelError::NotFound.with_message("Hotel not found"))?;
        hotel.change_status(status, dto.reason, OffsetDateTime::now_utc())?;

        self.hotel_modifier()
            .update(&mut connection, &hotel)
            .await?;
        connection.commit().await?;

        tracing::info!("hotel {} is now {}", hotel.id().as_ref(), status);
        Ok(hotel.into())
    }
}

impl<T> ChangeHotelStatusService for T where
    T: DependOnDatabaseConnection + DependOnHotelQuery + DependOnHotelModifier
{
}

/// Builds a replacement room-type list. Ids already on `current` are kept,
/// anything else gets a fresh id.
fn build_room_types(
    inputs: Vec<RoomTypeInputDto>,
    current: &RoomTypes,
) -> error_stack::Result<RoomTypes, KernelError> {
    let mut seen = HashSet::new();
    let room_types = inputs
        .into_iter()
        .map(|input| {
            let id = input
                .id
                .map(RoomTypeId::new)
                .filter(|id| current.find(id).is_some() && seen.insert(id.clone()))
                .unwrap_or_else(|| RoomTypeId::new(Uuid::new_v4()));
            input.into_room_type(id)
        })
        .collect::<Result<Vec<RoomType>, _>>()?;
    Ok(RoomTypes::new(room_types))
}

fn image(url: Option<String>) -> Option<ImageUrl> {
    url.map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .map(ImageUrl::new)
}
