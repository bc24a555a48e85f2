mod catalog;
mod hotel;
mod order;
mod room_type;

pub use self::{catalog::*, hotel::*, order::*, room_type::*};
