use std::collections::BTreeSet;

use destructure::Destructure;
use vodca::{AsRefln, Fromln, References};

use crate::entity::{City, Hotel, Price, StarRating, STAR_RATINGS};

pub const DEFAULT_PRICE_FLOOR: i64 = 0;
pub const DEFAULT_PRICE_CEILING: i64 = 2000;

pub const DEFAULT_BANNER_LIMIT: i64 = 5;
pub const MAX_BANNER_LIMIT: i64 = 10;

#[derive(Debug, Clone, Copy, Eq, PartialEq, References)]
pub struct PriceRange {
    min: Price,
    max: Price,
}

impl PriceRange {
    pub fn new(min: Price, max: Price) -> Self {
        Self { min, max }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(
            Price::new(DEFAULT_PRICE_FLOOR),
            Price::new(DEFAULT_PRICE_CEILING),
        )
    }
}

/// Filter options offered to searchers, derived from the published hotels.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct CatalogMeta {
    cities: Vec<City>,
    tags: Vec<String>,
    star_ratings: Vec<StarRating>,
    price_range: PriceRange,
}

impl CatalogMeta {
    pub fn collect(hotels: &[Hotel]) -> Self {
        let cities = hotels
            .iter()
            .map(|hotel| hotel.city())
            .filter(|city| !city.as_ref().trim().is_empty())
            .cloned()
            .collect::<BTreeSet<_>>();
        let tags = hotels
            .iter()
            .flat_map(|hotel| hotel.tags().as_ref().iter())
            .cloned()
            .collect::<BTreeSet<_>>();
        let prices = hotels
            .iter()
            .flat_map(|hotel| hotel.room_types().prices())
            .collect::<Vec<_>>();
        let price_range = match (prices.iter().min(), prices.iter().max()) {
            (Some(min), Some(max)) => PriceRange::new(*min, *max),
            _ => PriceRange::default(),
        };
        Self {
            cities: cities.into_iter().collect(),
            tags: tags.into_iter().collect(),
            star_ratings: STAR_RATINGS.into_iter().map(StarRating::new).collect(),
            price_range,
        }
    }
}

/// How many featured hotels the home page banner shows.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct BannerLimit(i64);

impl BannerLimit {
    pub fn new(limit: Option<i64>) -> Self {
        Self(limit.unwrap_or(DEFAULT_BANNER_LIMIT).clamp(1, MAX_BANNER_LIMIT))
    }
}

impl Default for BannerLimit {
    fn default() -> Self {
        Self::new(None)
    }
}
