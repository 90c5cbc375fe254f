//! Weekly run orchestration.
//!
//! Stages execute strictly top to bottom: pipeline, health checks,
//! publish. The first failure aborts the rest of the run; the transcript
//! session is released on every exit path.

use std::path::Path;

use chrono::{Local, Utc};
use serde::Serialize;

use crate::core::config::RunConfig;
use crate::core::error::Result;
use crate::core::health::{self, HealthReport};
use crate::core::pipeline;
use crate::core::publish::{self, PublishOutcome};
use crate::core::session::Session;
use crate::utils::command::ProcessRunner;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub log_file: String,
    pub pipeline_skipped: bool,
    pub health: HealthReport,
    pub publish: PublishOutcome,
}

/// Execute the full weekly run.
///
/// With `skip_pipeline` the external job is not invoked and the health
/// checks gate on whatever artifacts are already on disk.
pub fn run(
    runner: &dyn ProcessRunner,
    config: &RunConfig,
    skip_pipeline: bool,
) -> Result<RunReport> {
    let mut session = Session::open(Path::new(&config.log_dir))?;
    let result = run_stages(runner, config, skip_pipeline, &mut session);
    if let Err(err) = &result {
        session.line(&format!("Run aborted: {}", err));
    }
    result
    // session drops here, flushing the transcript on every exit path
}

fn run_stages(
    runner: &dyn ProcessRunner,
    config: &RunConfig,
    skip_pipeline: bool,
    session: &mut Session,
) -> Result<RunReport> {
    session.line("Starting weekly run");

    if skip_pipeline {
        session.line("Pipeline stage skipped by request");
    } else {
        session.line(&format!(
            "Invoking pipeline: {} {} {} (cwd {})",
            config.interpreter, config.entry_point, config.mode_flag, config.pipeline_root
        ));
        pipeline::invoke(runner, config)?;
        session.line("Pipeline completed");
    }

    let health = health::check(config, Utc::now())?;
    session.line(&format!(
        "Health checks passed: {} items, {} weekly file(s), newest {} minutes old",
        health.total_items, health.weekly_files, health.newest_age_minutes
    ));

    let outcome = publish::publish(
        runner,
        Path::new(&config.publish_repo),
        &config.remote,
        &config.branch,
        Local::now().date_naive(),
    )?;
    match &outcome {
        PublishOutcome::SkippedClean => {
            session.line("Nothing to publish: destination working tree is clean");
        }
        PublishOutcome::Published { commit_message } => {
            session.line(&format!("Pushed commit: {}", commit_message));
        }
    }

    Ok(RunReport {
        log_file: session.path().display().to_string(),
        pipeline_skipped: skip_pipeline,
        health,
        publish: outcome,
    })
}
