use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

pub const STAR_RATINGS: [i32; 3] = [3, 4, 5];

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct StarRating(i32);

impl StarRating {
    pub fn new(star: impl Into<i32>) -> Self {
        Self(star.into())
    }

    pub fn is_valid(&self) -> bool {
        STAR_RATINGS.contains(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct OpeningDate(Date);

impl OpeningDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}
