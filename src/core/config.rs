//! Run configuration.
//!
//! The weekly run is driven by an explicit [`RunConfig`] value loaded from
//! a JSON file and passed into the orchestration. The vault/site paths the
//! external pipeline consumes are exported on the spawned child process
//! only; this process's environment is never mutated.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_entry_point() -> String {
    "orchestrator/ti_run.py".to_string()
}

fn default_mode_flag() -> String {
    "--weekly".to_string()
}

fn default_weekly_pattern() -> String {
    "bastion-codex-weekly-*.md".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_freshness_window_minutes() -> i64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Obsidian vault path, exported to the pipeline as BASTION_VAULT_PATH.
    pub vault_path: String,

    /// Site repository root, exported as BASTION_SITE_ROOT.
    pub site_root: String,

    /// Blog subdirectory under the site root, exported as BASTION_BLOG_SUBDIR.
    pub blog_subdir: String,

    /// Working directory for the pipeline invocation.
    pub pipeline_root: String,

    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    #[serde(default = "default_mode_flag")]
    pub mode_flag: String,

    /// JSON trends summary artifact checked after the pipeline runs.
    pub trends_path: String,

    /// Directory the pipeline writes dated weekly briefs into.
    pub content_dir: String,

    #[serde(default = "default_weekly_pattern")]
    pub weekly_pattern: String,

    /// Destination repository for the publish stage.
    pub publish_repo: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    /// Directory for run transcript logs, created if absent.
    pub log_dir: String,

    #[serde(default = "default_freshness_window_minutes")]
    pub freshness_window_minutes: i64,
}

impl RunConfig {
    /// Environment exported to the spawned pipeline process.
    pub fn child_env(&self) -> Vec<(String, String)> {
        vec![
            ("BASTION_VAULT_PATH".to_string(), self.vault_path.clone()),
            ("BASTION_SITE_ROOT".to_string(), self.site_root.clone()),
            ("BASTION_BLOG_SUBDIR".to_string(), self.blog_subdir.clone()),
        ]
    }

    fn expand_paths(&mut self) {
        for field in [
            &mut self.vault_path,
            &mut self.site_root,
            &mut self.pipeline_root,
            &mut self.trends_path,
            &mut self.content_dir,
            &mut self.publish_repo,
            &mut self.log_dir,
        ] {
            *field = shellexpand::tilde(field.as_str()).into_owned();
        }
    }
}

/// Default config file path (universal ~/.config/bastion/weekly.json).
pub fn default_path() -> Result<PathBuf> {
    let home = env::var("HOME")
        .map_err(|_| Error::Config("HOME environment variable not set".to_string()))?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("bastion")
        .join("weekly.json"))
}

/// Load a config file, expanding `~` in every configured path.
pub fn load(path: &Path) -> Result<RunConfig> {
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config {}: {}", path.display(), e)))?;
    let mut config: RunConfig = serde_json::from_str(&raw)
        .map_err(|e| Error::Config(format!("Invalid config {}: {}", path.display(), e)))?;
    config.expand_paths();
    Ok(config)
}

/// Resolve the config path argument (explicit flag or default location)
/// and load it.
pub fn load_from(path: Option<&str>) -> Result<RunConfig> {
    match path {
        Some(p) => load(Path::new(shellexpand::tilde(p).as_ref())),
        None => load(&default_path()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn minimal_json() -> &'static str {
        r#"{
            "vaultPath": "/vault",
            "siteRoot": "/site",
            "blogSubdir": "blog",
            "pipelineRoot": "/pipeline",
            "trendsPath": "/pipeline/data/trends.json",
            "contentDir": "/vault/weekly",
            "publishRepo": "/site",
            "logDir": "/tmp/logs"
        }"#
    }

    #[test]
    fn load_applies_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(minimal_json().as_bytes()).unwrap();

        let config = load(temp.path()).unwrap();
        assert_eq!(config.interpreter, "python3");
        assert_eq!(config.entry_point, "orchestrator/ti_run.py");
        assert_eq!(config.mode_flag, "--weekly");
        assert_eq!(config.weekly_pattern, "bastion-codex-weekly-*.md");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.branch, "main");
        assert_eq!(config.freshness_window_minutes, 30);
    }

    #[test]
    fn load_expands_tilde_in_paths() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            minimal_json()
                .replace("\"/vault\"", "\"~/vault\"")
                .as_bytes(),
        )
        .unwrap();

        let config = load(temp.path()).unwrap();
        assert!(!config.vault_path.starts_with('~'));
        assert!(config.vault_path.ends_with("/vault"));
    }

    #[test]
    fn load_rejects_missing_file() {
        let err = load(Path::new("/nonexistent/weekly.json")).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn load_rejects_invalid_json() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"{ not json").unwrap();

        let err = load(temp.path()).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn child_env_carries_the_three_paths() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(minimal_json().as_bytes()).unwrap();

        let config = load(temp.path()).unwrap();
        let env = config.child_env();
        assert_eq!(
            env,
            vec![
                ("BASTION_VAULT_PATH".to_string(), "/vault".to_string()),
                ("BASTION_SITE_ROOT".to_string(), "/site".to_string()),
                ("BASTION_BLOG_SUBDIR".to_string(), "blog".to_string()),
            ]
        );
    }
}
