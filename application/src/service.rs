mod booking;
mod catalog;
mod hotel;
mod order;
mod room_type;

pub use self::{booking::*, catalog::*, hotel::*, order::*, room_type::*};

use time::OffsetDateTime;

/// Wall clock in the server's local offset, UTC when the offset cannot be determined.
fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
