mod error;
pub mod stores;
pub mod tables;
mod utils;

pub use error::*;
pub use utils::*;
