mod hotel;
mod inventory;
mod order;

pub use self::{hotel::*, inventory::*, order::*};
