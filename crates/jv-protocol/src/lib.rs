pub mod catalog;
pub mod commands;
pub mod filters;
pub mod finops;
pub mod tickets;

pub use catalog::*;
pub use commands::*;
pub use filters::*;
pub use finops::*;
pub use tickets::*;
