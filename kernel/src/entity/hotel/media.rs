use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }
}
