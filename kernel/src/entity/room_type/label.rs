use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RoomTypeName(String);

impl RoomTypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BedType(String);

impl BedType {
    pub fn new(bed_type: impl Into<String>) -> Self {
        Self(bed_type.into())
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Breakfast(bool);

impl Breakfast {
    pub fn new(included: impl Into<bool>) -> Self {
        Self(included.into())
    }
}
