pub mod error;
pub mod interfaces;
pub mod service;
mod validate;

pub use validate::*;
