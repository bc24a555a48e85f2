use serde::Serialize;
use vodca::References;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 50;

#[derive(Debug, Clone, Copy, Eq, PartialEq, References)]
pub struct Pagination {
    page: i64,
    page_size: i64,
}

impl Pagination {
    /// Page is at least 1, page size is kept within `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Saturates for page numbers far past the end.
    pub fn offset(&self) -> usize {
        usize::try_from((self.page - 1).saturating_mul(self.page_size)).unwrap_or(usize::MAX)
    }

    pub fn paginate<T>(&self, items: Vec<T>) -> Paged<T> {
        let total = items.len() as i64;
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size as usize)
            .collect();
        Paged {
            items,
            page: self.page,
            page_size: self.page_size,
            total,
            total_pages: (total + self.page_size - 1) / self.page_size,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Paged<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounds_are_clamped() {
        let pagination = Pagination::new(Some(0), Some(1000));
        assert_eq!(pagination.page(), &1);
        assert_eq!(pagination.page_size(), &50);
        let pagination = Pagination::new(Some(-3), Some(0));
        assert_eq!(pagination.page(), &1);
        assert_eq!(pagination.page_size(), &1);
        assert_eq!(Pagination::default().page_size(), &DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn pages_and_totals() {
        let paged = Pagination::new(Some(3), Some(10)).paginate((1..=25).collect::<Vec<_>>());
        assert_eq!(paged.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(paged.total, 25);
        assert_eq!(paged.total_pages, 3);

        let beyond = Pagination::new(Some(9), Some(10)).paginate((1..=25).collect::<Vec<_>>());
        assert!(beyond.items.is_empty());

        let empty = Pagination::default().paginate(Vec::<i32>::new());
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn huge_page_is_empty() {
        let pagination = Pagination::new(Some(i64::MAX), Some(50));
        assert_eq!(pagination.page(), &i64::MAX);
        let paged = pagination.paginate((1..=25).collect::<Vec<_>>());
        assert!(paged.items.is_empty());
        assert_eq!(paged.total, 25);
        assert_eq!(paged.total_pages, 1);
    }
}
