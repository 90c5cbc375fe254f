//! Commit and push generated content to the site repository.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::error::{Error, Result};
use crate::utils::command::{error_text, CommandStatus, ProcessRunner};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum PublishOutcome {
    /// Working tree was already clean; nothing committed or pushed.
    SkippedClean,
    Published { commit_message: String },
}

pub fn commit_message(date: NaiveDate) -> String {
    format!("Bastion Codex weekly brief ({})", date.format("%Y-%m-%d"))
}

/// Stage, commit, and push pending changes in the destination repo.
///
/// A clean working tree (empty `git status --porcelain`) is a successful
/// no-op. Any failing git command aborts with no retry and no rollback
/// of already-staged changes.
pub fn publish(
    runner: &dyn ProcessRunner,
    repo: &Path,
    remote: &str,
    branch: &str,
    date: NaiveDate,
) -> Result<PublishOutcome> {
    let status = git(runner, repo, &["status", "--porcelain"])?;
    if status.output.stdout.is_empty() {
        return Ok(PublishOutcome::SkippedClean);
    }

    let message = commit_message(date);
    git(runner, repo, &["add", "-A"])?;
    git(runner, repo, &["commit", "-m", &message])?;
    git(runner, repo, &["push", remote, branch])?;

    Ok(PublishOutcome::Published {
        commit_message: message,
    })
}

fn git(runner: &dyn ProcessRunner, repo: &Path, args: &[&str]) -> Result<CommandStatus> {
    let status = runner.run("git", args, Some(repo), &[])?;
    if !status.success() {
        return Err(Error::Publish(format!(
            "git {} failed in {}: {}",
            args[0],
            repo.display(),
            error_text(&status.output)
        )));
    }
    Ok(status)
}
