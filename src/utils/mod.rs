//! Generic utility primitives with zero domain knowledge.
//!
//! - `command` - Command execution behind the process-runner seam

pub mod command;
