mod facet;
mod filter;
mod page;
mod sort;

pub use self::{facet::*, filter::*, page::*, sort::*};
