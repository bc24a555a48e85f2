use error_stack::Report;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;
use vodca::{AsRefln, Fromln, References};

use crate::KernelError;

pub const MIN_ROOM_COUNT: i32 = 1;
pub const MAX_ROOM_COUNT: i32 = 5;

/// Check-in and check-out calendar dates, at least one night apart.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct StayPeriod {
    check_in: Date,
    check_out: Date,
}

impl StayPeriod {
    pub fn new(check_in: Date, check_out: Date) -> Result<Self, Report<KernelError>> {
        if (check_out - check_in).whole_days() <= 0 {
            return Err(KernelError::Validation
                .with_message("checkOutDate must be later than checkInDate"));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).whole_days()
    }
}

/// Reads `YYYY-MM-DD`, also when followed by a time of day which is ignored.
pub fn parse_calendar_date(value: &str, field: &str) -> Result<Date, Report<KernelError>> {
    let value = value.trim();
    let date_part = match value.get(..10) {
        Some(head) if value.len() == 10 || value[10..].starts_with(['T', ' ']) => head,
        _ => value,
    };
    Date::parse(date_part, format_description!("[year]-[month]-[day]"))
        .map_err(|_| KernelError::Validation.with_message(format!("{field} must be ISO date")))
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RoomCount(i32);

impl RoomCount {
    pub fn new(count: impl Into<i32>) -> Self {
        Self(count.into())
    }

    pub fn is_valid(&self) -> bool {
        (MIN_ROOM_COUNT..=MAX_ROOM_COUNT).contains(&self.0)
    }
}

impl Default for RoomCount {
    fn default() -> Self {
        Self(1)
    }
}
