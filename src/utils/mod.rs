// Utility functions
pub mod error;
pub mod outcome;

pub use error::*;
pub use outcome::*;
