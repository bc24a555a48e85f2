use std::str::FromStr;

use destructure::Destructure;
use error_stack::Report;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln, References};

use crate::KernelError;

/// `Pending` is the only entry state. `Cancelled` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Completed)
    }
}

impl FromStr for OrderStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown order status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSource {
    #[default]
    Mobile,
    Pc,
    Manual,
}

impl OrderSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSource::Mobile => "mobile",
            OrderSource::Pc => "pc",
            OrderSource::Manual => "manual",
        }
    }
}

impl FromStr for OrderSource {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(OrderSource::Mobile),
            "pc" => Ok(OrderSource::Pc),
            "manual" => Ok(OrderSource::Manual),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown order source: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Cancellation {
    reason: CancelReason,
    cancelled_at: OffsetDateTime,
}

impl Cancellation {
    pub fn new(reason: CancelReason, cancelled_at: OffsetDateTime) -> Self {
        Self {
            reason,
            cancelled_at,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CancelReason(String);

impl CancelReason {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
