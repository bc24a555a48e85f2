use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const PREFIX: &str = "TT";

/// Human-readable order identifier: `TT` + `YYYYMMDDHHMMSS` + suffix.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn compose(at: OffsetDateTime, suffix: &str) -> Result<Self, Report<KernelError>> {
        let timestamp = at
            .format(format_description!(
                "[year][month][day][hour][minute][second]"
            ))
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("Failed to format order timestamp")?;
        Ok(Self(format!("{PREFIX}{timestamp}{suffix}")))
    }
}
