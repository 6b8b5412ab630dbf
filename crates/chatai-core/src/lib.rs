pub mod clock;
pub mod config;
pub mod error;
pub mod session;

// Re-export common error type
pub use error::{ChatError, Result};
