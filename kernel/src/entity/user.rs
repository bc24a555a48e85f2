mod id;
mod identity;
mod role;
mod token;

pub use self::{id::*, identity::*, role::*, token::*};
