use serde::Deserialize;
use uuid::Uuid;

use application::transfer::SearchHotelsDto;

use crate::controller::Intake;
use crate::route::number;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    city: Option<String>,
    keyword: Option<String>,
    star: Option<String>,
    tags: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
    sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BannerRequest {
    limit: Option<String>,
}

#[derive(Debug)]
pub struct DetailRequest {
    id: Uuid,
}

impl DetailRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<SearchRequest> for Transformer {
    type To = SearchHotelsDto;
    fn emit(&self, input: SearchRequest) -> Self::To {
        SearchHotelsDto {
            city: input.city,
            keyword: input.keyword,
            star: number(input.star),
            tags: input.tags,
            page: number(input.page),
            page_size: number(input.page_size),
            sort: input.sort,
        }
    }
}

impl Intake<BannerRequest> for Transformer {
    type To = Option<i64>;
    fn emit(&self, input: BannerRequest) -> Self::To {
        number(input.limit)
    }
}

impl Intake<DetailRequest> for Transformer {
    type To = Uuid;
    fn emit(&self, input: DetailRequest) -> Self::To {
        input.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let dto = Transformer.emit(SearchRequest {
            city: Some("Shanghai".to_string()),
            keyword: None,
            star: Some("four".to_string()),
            tags: Some("spa,pool".to_string()),
            page: Some(" 2 ".to_string()),
            page_size: Some("".to_string()),
            sort: None,
        });
        assert_eq!(dto.star, None);
        assert_eq!(dto.page, Some(2));
        assert_eq!(dto.page_size, None);
        assert_eq!(dto.tags.as_deref(), Some("spa,pool"));
    }
}
