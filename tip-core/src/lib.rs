pub mod calculations;
pub mod models;

pub use calculations::{TipError, TipField, TipOutcome, compute};
pub use models::*;
