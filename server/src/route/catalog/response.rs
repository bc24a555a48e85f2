use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{CatalogMetaDto, HotelBannerDto, HotelDto, HotelSummaryDto};
use kernel::prelude::entity::Paged;

use crate::controller::Exhaust;
use crate::route::hotel::HotelResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummaryResponse {
    id: Uuid,
    name_cn: String,
    name_en: String,
    address: String,
    city: String,
    star_rating: i32,
    tags: Vec<String>,
    image: Option<String>,
    featured: bool,
    min_price: i64,
}

impl From<HotelSummaryDto> for HotelSummaryResponse {
    fn from(value: HotelSummaryDto) -> Self {
        Self {
            id: value.id,
            name_cn: value.name,
            name_en: value.name_en,
            address: value.address,
            city: value.city,
            star_rating: value.star_rating,
            tags: value.tags,
            image: value.image,
            featured: value.featured,
            min_price: value.min_price,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerResponse {
    hotel_id: Uuid,
    title: String,
    subtitle: String,
    image_url: String,
    star_rating: i32,
    min_price: i64,
}

#[derive(Debug, Serialize)]
pub struct BannersResponse {
    items: Vec<BannerResponse>,
}

#[derive(Debug, Serialize)]
pub struct PriceRangeResponse {
    min: i64,
    max: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaResponse {
    cities: Vec<String>,
    tags: Vec<String>,
    star_ratings: Vec<i32>,
    price_range: PriceRangeResponse,
}

pub struct Presenter;

impl Exhaust<CatalogMetaDto> for Presenter {
    type To = Json<MetaResponse>;
    fn emit(&self, input: CatalogMetaDto) -> Self::To {
        let CatalogMetaDto {
            cities,
            tags,
            star_ratings,
            min_price,
            max_price,
        } = input;
        Json(MetaResponse {
            cities,
            tags,
            star_ratings,
            price_range: PriceRangeResponse {
                min: min_price,
                max: max_price,
            },
        })
    }
}

impl Exhaust<Vec<HotelBannerDto>> for Presenter {
    type To = Json<BannersResponse>;
    fn emit(&self, input: Vec<HotelBannerDto>) -> Self::To {
        let items = input
            .into_iter()
            .map(|banner| BannerResponse {
                hotel_id: banner.hotel_id,
                title: banner.title,
                subtitle: banner.subtitle,
                image_url: banner.image_url,
                star_rating: banner.star_rating,
                min_price: banner.min_price,
            })
            .collect();
        Json(BannersResponse { items })
    }
}

impl Exhaust<Paged<HotelSummaryDto>> for Presenter {
    type To = Json<Paged<HotelSummaryResponse>>;
    fn emit(&self, input: Paged<HotelSummaryDto>) -> Self::To {
        Json(input.map(HotelSummaryResponse::from))
    }
}

impl Exhaust<HotelDto> for Presenter {
    type To = Json<HotelResponse>;
    fn emit(&self, input: HotelDto) -> Self::To {
        Json(HotelResponse::from(input))
    }
}
