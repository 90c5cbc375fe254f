use clap::Args;

use bastion_weekly::config;
use bastion_weekly::run::{self, RunReport};
use bastion_weekly::utils::command::SystemRunner;

use super::CmdResult;

#[derive(Args)]
pub struct RunArgs {
    /// Path to the weekly config file (default: ~/.config/bastion/weekly.json)
    #[arg(long)]
    pub config: Option<String>,

    /// Skip the pipeline stage; health-check and publish existing artifacts
    #[arg(long)]
    pub skip_pipeline: bool,
}

pub fn run_json(args: RunArgs) -> CmdResult<RunReport> {
    let config = config::load_from(args.config.as_deref())?;
    let report = run::run(&SystemRunner, &config, args.skip_pipeline)?;
    Ok((report, 0))
}
