use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct HotelName(String);

impl HotelName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}
