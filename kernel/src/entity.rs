mod catalog;
mod common;
mod hotel;
mod order;
mod room_type;
mod user;

pub use self::{catalog::*, common::*, hotel::*, order::*, room_type::*, user::*};
