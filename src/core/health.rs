//! Fail-closed health checks on pipeline artifacts.
//!
//! Four ordered checks gate the publish stage: the trends summary must
//! exist, it must report a positive item count, at least one weekly brief
//! must exist, and the newest brief must be fresh. The first failure
//! aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::config::RunConfig;
use crate::core::error::{Error, Result};

/// Trends summary artifact. Parsed tolerantly: only the field we gate on.
#[derive(Debug, Deserialize)]
struct TrendsSummary {
    #[serde(default)]
    total_items: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub total_items: i64,
    pub weekly_files: usize,
    pub newest_file: String,
    pub newest_age_minutes: i64,
}

/// Run all four checks in order against `now`. `now` is a parameter so
/// the freshness boundary is testable without touching file mtimes.
pub fn check(config: &RunConfig, now: DateTime<Utc>) -> Result<HealthReport> {
    let trends_path = Path::new(&config.trends_path);
    if !trends_path.exists() {
        return Err(Error::HealthCheck(format!(
            "Trends summary missing: {}",
            trends_path.display()
        )));
    }

    let raw = fs::read_to_string(trends_path)?;
    let summary: TrendsSummary = serde_json::from_str(&raw).map_err(|e| {
        Error::HealthCheck(format!(
            "Trends summary unreadable ({}): {}",
            trends_path.display(),
            e
        ))
    })?;
    if summary.total_items <= 0 {
        return Err(Error::HealthCheck(format!(
            "Trends summary reports {} total items ({})",
            summary.total_items,
            trends_path.display()
        )));
    }

    let content_dir = Path::new(&config.content_dir);
    let matches = weekly_files(content_dir, &config.weekly_pattern)?;
    if matches.is_empty() {
        return Err(Error::HealthCheck(format!(
            "No files matching {} in {}",
            config.weekly_pattern,
            content_dir.display()
        )));
    }

    let (newest, modified) = newest_modified(&matches)?;
    let age = now.signed_duration_since(modified);
    // Generous window: the vault lives in synced storage and writes can
    // lag in propagating. Within the window (inclusive) passes.
    if age > Duration::minutes(config.freshness_window_minutes) {
        return Err(Error::HealthCheck(format!(
            "Newest weekly file {} is stale: modified {} minutes ago (window is {} minutes)",
            newest.display(),
            age.num_minutes(),
            config.freshness_window_minutes
        )));
    }

    Ok(HealthReport {
        total_items: summary.total_items,
        weekly_files: matches.len(),
        newest_file: newest.display().to_string(),
        newest_age_minutes: age.num_minutes(),
    })
}

fn weekly_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = glob::Pattern::new(pattern)
        .map_err(|e| Error::Config(format!("Invalid weekly pattern {}: {}", pattern, e)))?;

    let entries = fs::read_dir(dir).map_err(|e| {
        Error::HealthCheck(format!(
            "Cannot read content directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }
    Ok(files)
}

fn newest_modified(files: &[PathBuf]) -> Result<(PathBuf, DateTime<Utc>)> {
    let mut newest: Option<(PathBuf, DateTime<Utc>)> = None;
    for path in files {
        let modified: DateTime<Utc> = fs::metadata(path)?.modified()?.into();
        match &newest {
            Some((_, best)) if *best >= modified => {}
            _ => newest = Some((path.clone(), modified)),
        }
    }
    newest.ok_or_else(|| Error::HealthCheck("No weekly files to inspect".to_string()))
}
