pub mod health;
pub mod run;

/// Command result: payload plus process exit code.
pub type CmdResult<T> = bastion_weekly::Result<(T, i32)>;
