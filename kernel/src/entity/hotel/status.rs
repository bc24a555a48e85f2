use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotelStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Offline,
}

impl HotelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelStatus::Pending => "pending",
            HotelStatus::Approved => "approved",
            HotelStatus::Rejected => "rejected",
            HotelStatus::Offline => "offline",
        }
    }
}

impl Display for HotelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HotelStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(HotelStatus::Pending),
            "approved" => Ok(HotelStatus::Approved),
            "rejected" => Ok(HotelStatus::Rejected),
            "offline" => Ok(HotelStatus::Offline),
            _ => Err(KernelError::Validation.with_message("Status is required")),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RejectReason(String);

impl RejectReason {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into().trim().to_string())
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}
