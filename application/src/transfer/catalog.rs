use uuid::Uuid;

use kernel::prelude::entity::{CatalogMeta, DestructCatalogMeta, Hotel};

#[derive(Debug, Clone, Default)]
pub struct SearchHotelsDto {
    pub city: Option<String>,
    pub keyword: Option<String>,
    pub star: Option<i32>,
    /// Comma separated.
    pub tags: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
}

/// One search result row.
#[derive(Debug, Clone)]
pub struct HotelSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub name_en: String,
    pub address: String,
    pub city: String,
    pub star_rating: i32,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub featured: bool,
    pub min_price: i64,
}

impl From<&Hotel> for HotelSummaryDto {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id().clone().into(),
            name: hotel.name().as_ref().clone(),
            name_en: hotel.name_en().as_ref().clone(),
            address: hotel.address().as_ref().clone(),
            city: hotel.city().as_ref().clone(),
            star_rating: *hotel.star_rating().as_ref(),
            tags: hotel.tags().as_ref().clone(),
            image: hotel.display_image().map(|image| image.as_ref().clone()),
            featured: *hotel.featured().as_ref(),
            min_price: hotel.min_price().into(),
        }
    }
}

/// Home page carousel card.
#[derive(Debug, Clone)]
pub struct HotelBannerDto {
    pub hotel_id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub star_rating: i32,
    pub min_price: i64,
}

impl From<&Hotel> for HotelBannerDto {
    fn from(hotel: &Hotel) -> Self {
        Self {
            hotel_id: hotel.id().clone().into(),
            title: hotel.name().as_ref().clone(),
            subtitle: hotel.address().as_ref().clone(),
            image_url: hotel
                .display_image()
                .map(|image| image.as_ref().clone())
                .unwrap_or_default(),
            star_rating: *hotel.star_rating().as_ref(),
            min_price: hotel.min_price().into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogMetaDto {
    pub cities: Vec<String>,
    pub tags: Vec<String>,
    pub star_ratings: Vec<i32>,
    pub min_price: i64,
    pub max_price: i64,
}

impl From<CatalogMeta> for CatalogMetaDto {
    fn from(value: CatalogMeta) -> Self {
        let DestructCatalogMeta {
            cities,
            tags,
            star_ratings,
            price_range,
        } = value.into_destruct();
        Self {
            cities: cities.into_iter().map(Into::into).collect(),
            tags,
            star_ratings: star_ratings.into_iter().map(Into::into).collect(),
            min_price: (*price_range.min()).into(),
            max_price: (*price_range.max()).into(),
        }
    }
}
