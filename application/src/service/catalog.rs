use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{DependOnHotelQuery, HotelQuery};
use kernel::prelude::entity::{
    BannerLimit, CatalogMeta, City, HotelFilter, HotelId, HotelSort, Paged, Pagination,
    StarRating,
};
use kernel::KernelError;

use crate::transfer::{CatalogMetaDto, HotelBannerDto, HotelDto, HotelSummaryDto, SearchHotelsDto};

#[async_trait::async_trait]
pub trait GetCatalogMetaService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery
{
    async fn get_catalog_meta(&self) -> error_stack::Result<CatalogMetaDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let hotels = self
            .hotel_query()
            .find_approved(&mut connection, &HotelFilter::default())
            .await?;
        Ok(CatalogMeta::collect(&hotels).into())
    }
}

impl<T> GetCatalogMetaService for T where T: DependOnDatabaseConnection + DependOnHotelQuery {}

#[async_trait::async_trait]
pub trait GetHotelBannersService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery
{
    async fn get_hotel_banners(
        &self,
        limit: Option<i64>,
    ) -> error_stack::Result<Vec<HotelBannerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let hotels = self
            .hotel_query()
            .find_featured(&mut connection, &BannerLimit::new(limit))
            .await?;
        Ok(hotels.iter().map(HotelBannerDto::from).collect())
    }
}

impl<T> GetHotelBannersService for T where T: DependOnDatabaseConnection + DependOnHotelQuery {}

#[async_trait::async_trait]
pub trait SearchHotelsService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery
{
    async fn search_hotels(
        &self,
        dto: SearchHotelsDto,
    ) -> error_stack::Result<Paged<HotelSummaryDto>, KernelError> {
        let filter = HotelFilter::new(
            dto.city.map(City::new),
            dto.keyword,
            dto.star.map(StarRating::new),
            HotelFilter::split_tags(dto.tags.as_deref()),
        );
        let sort = HotelSort::parse(dto.sort.as_deref());
        let pagination = Pagination::new(dto.page, dto.page_size);

        let mut connection = self.database_connection().transact().await?;
        let mut hotels = self
            .hotel_query()
            .find_approved(&mut connection, &filter)
            .await?;
        tracing::debug!("search matched {} hotels", hotels.len());

        sort.apply(&mut hotels);
        Ok(pagination
            .paginate(hotels)
            .map(|hotel| HotelSummaryDto::from(&hotel)))
    }
}

impl<T> SearchHotelsService for T where T: DependOnDatabaseConnection + DependOnHotelQuery {}

#[async_trait::async_trait]
pub trait GetPublishedHotelService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnHotelQuery
{
    /// Room types come back cheapest first.
    async fn get_published_hotel(&self, id: Uuid) -> error_stack::Result<HotelDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let hotel = self
            .hotel_query()
            .find_by_id(&mut connection, &HotelId::new(id))
            .await?
            .filter(|hotel| hotel.is_published())
            .ok_or_else(|| KernelError::NotFound.with_message("Hotel not found"))?;
        let hotel = hotel.reconstruct(|h| {
            h.room_types = std::mem::take(&mut h.room_types).sorted_by_price();
        });
        Ok(hotel.into())
    }
}

impl<T> GetPublishedHotelService for T where T: DependOnDatabaseConnection + DependOnHotelQuery {}
