mod hotel;
mod identity;
mod order;

pub use self::{hotel::*, identity::*, order::*};
