use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Guest {
    name: GuestName,
    phone: Phone,
    remarks: Remarks,
}

impl Guest {
    pub fn new(name: GuestName, phone: Phone, remarks: Remarks) -> Self {
        Self {
            name,
            phone,
            remarks,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct GuestName(String);

impl GuestName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

/// Contact phone, also the guest's only credential for their orders.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl Into<String>) -> Self {
        Self(phone.into().trim().to_string())
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Remarks(String);

impl Remarks {
    pub fn new(remarks: impl Into<String>) -> Self {
        Self(remarks.into().trim().to_string())
    }
}
