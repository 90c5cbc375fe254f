use chrono::Utc;
use clap::Args;

use bastion_weekly::config;
use bastion_weekly::health::{self, HealthReport};

use super::CmdResult;

#[derive(Args)]
pub struct HealthArgs {
    /// Path to the weekly config file (default: ~/.config/bastion/weekly.json)
    #[arg(long)]
    pub config: Option<String>,
}

/// Probe the pipeline artifacts without running the pipeline or
/// publishing anything.
pub fn run_json(args: HealthArgs) -> CmdResult<HealthReport> {
    let config = config::load_from(args.config.as_deref())?;
    let report = health::check(&config, Utc::now())?;
    Ok((report, 0))
}
