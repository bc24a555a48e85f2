use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

pub const MIN_GUESTS: i32 = 1;
pub const MAX_GUESTS: i32 = 10;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct MaxGuests(i32);

impl MaxGuests {
    pub fn new(guests: impl Into<i32>) -> Self {
        Self(guests.into())
    }

    pub fn is_valid(&self) -> bool {
        (MIN_GUESTS..=MAX_GUESTS).contains(&self.0)
    }
}

impl Default for MaxGuests {
    fn default() -> Self {
        Self(2)
    }
}

/// Sellable units left for a room type. Not scoped to dates.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Inventory(i32);

impl Inventory {
    pub fn new(count: impl Into<i32>) -> Self {
        Self(count.into())
    }

    pub fn is_available(&self) -> bool {
        self.0 > 0
    }
}
