mod error;
mod gateway;

pub use error::*;
pub use gateway::*;
