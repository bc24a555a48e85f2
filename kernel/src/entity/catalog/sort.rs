use std::cmp::Reverse;
use std::str::FromStr;

use crate::entity::Hotel;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum HotelSort {
    #[default]
    Recommended,
    PriceAsc,
    PriceDesc,
}

impl HotelSort {
    /// Unknown or missing values fall back to `Recommended`.
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn apply(&self, hotels: &mut [Hotel]) {
        match self {
            HotelSort::Recommended => hotels.sort_by_key(|hotel| {
                (
                    Reverse(*hotel.featured().as_ref()),
                    Reverse(*hotel.star_rating()),
                    hotel.min_price(),
                )
            }),
            HotelSort::PriceAsc => hotels.sort_by_key(Hotel::min_price),
            HotelSort::PriceDesc => hotels.sort_by_key(|hotel| Reverse(hotel.min_price())),
        }
    }
}

impl FromStr for HotelSort {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(HotelSort::Recommended),
            "priceAsc" => Ok(HotelSort::PriceAsc),
            "priceDesc" => Ok(HotelSort::PriceDesc),
            _ => Err(()),
        }
    }
}
