use vodca::References;

use crate::entity::{City, Hotel, StarRating};

/// Search criteria over published hotels. Every present criterion must hold.
#[derive(Debug, Clone, Default, Eq, PartialEq, References)]
pub struct HotelFilter {
    city: Option<City>,
    keyword: Option<String>,
    star: Option<StarRating>,
    tags: Vec<String>,
}

impl HotelFilter {
    pub fn new(
        city: Option<City>,
        keyword: Option<String>,
        star: Option<StarRating>,
        tags: Vec<String>,
    ) -> Self {
        let keyword = keyword
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty());
        let city = city.filter(|city| !city.as_ref().trim().is_empty());
        let tags = tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        Self {
            city,
            keyword,
            star,
            tags,
        }
    }

    /// Reads the comma-separated wire form of the tag list.
    pub fn split_tags(raw: Option<&str>) -> Vec<String> {
        raw.map(|raw| raw.split(',').map(|tag| tag.trim().to_string()).collect())
            .unwrap_or_default()
    }

    pub fn matches(&self, hotel: &Hotel) -> bool {
        if let Some(city) = &self.city {
            if hotel.city() != city {
                return false;
            }
        }
        if let Some(star) = &self.star {
            if hotel.star_rating() != star {
                return false;
            }
        }
        if let Some(keyword) = &self.keyword {
            let keyword = keyword.to_lowercase();
            let found = [
                hotel.name().as_ref(),
                hotel.name_en().as_ref(),
                hotel.address().as_ref(),
                hotel.city().as_ref(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&keyword));
            if !found {
                return false;
            }
        }
        hotel.tags().contains_all(&self.tags)
    }
}
