pub mod core;
pub mod utils;

// Re-export everything from core for ergonomic library use
// Callers can write `bastion_weekly::config` instead of `bastion_weekly::core::config`
pub use crate::core::*;
