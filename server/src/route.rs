mod catalog;
mod health;
mod hotel;
mod order;

pub use self::{catalog::*, health::*, hotel::*, order::*};

/// Lenient reading of numeric query parameters; anything unparsable is treated as absent.
fn number<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|value| value.trim().parse().ok())
}
