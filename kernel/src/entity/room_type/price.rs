use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Whole units of the single currency the catalog is priced in.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct Price(i64);

impl Price {
    pub fn new(amount: impl Into<i64>) -> Self {
        Self(amount.into())
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `None` when the product leaves the `i64` range.
    pub fn checked_mul(self, rhs: i64) -> Option<Price> {
        self.0.checked_mul(rhs).map(Price)
    }
}
