// Public modules
pub mod config;
pub mod error;
pub mod health;
pub mod pipeline;
pub mod publish;
pub mod run;
pub mod session;

// Re-export common types for convenience
pub use error::{Error, Result};
