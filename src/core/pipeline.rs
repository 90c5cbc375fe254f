//! External pipeline invocation.

use std::path::Path;

use crate::core::config::RunConfig;
use crate::core::error::{Error, Result};
use crate::utils::command::{error_text, ProcessRunner};

/// Run the external data-processing job and block until it exits.
///
/// Invoked as `interpreter entry_point mode_flag` with the pipeline root
/// as working directory and the vault/site paths in the child
/// environment. Any nonzero exit aborts the run; there are no retries.
pub fn invoke(runner: &dyn ProcessRunner, config: &RunConfig) -> Result<()> {
    let status = runner.run(
        &config.interpreter,
        &[&config.entry_point, &config.mode_flag],
        Some(Path::new(&config.pipeline_root)),
        &config.child_env(),
    )?;

    if !status.success() {
        return Err(Error::Pipeline(format!(
            "{} {} {} exited with code {}: {}",
            config.interpreter,
            config.entry_point,
            config.mode_flag,
            status.exit_code,
            error_text(&status.output)
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command::{CapturedOutput, CommandStatus};
    use std::sync::Mutex;

    struct StubRunner {
        exit_code: i32,
        seen: Mutex<Vec<(String, Vec<String>, Option<String>, Vec<(String, String)>)>>,
    }

    impl StubRunner {
        fn new(exit_code: i32) -> Self {
            Self {
                exit_code,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProcessRunner for StubRunner {
        fn run(
            &self,
            program: &str,
            args: &[&str],
            cwd: Option<&Path>,
            env: &[(String, String)],
        ) -> Result<CommandStatus> {
            self.seen.lock().unwrap().push((
                program.to_string(),
                args.iter().map(|a| a.to_string()).collect(),
                cwd.map(|p| p.display().to_string()),
                env.to_vec(),
            ));
            Ok(CommandStatus {
                exit_code: self.exit_code,
                output: CapturedOutput::new(String::new(), "traceback".to_string()),
            })
        }
    }

    fn config() -> RunConfig {
        serde_json::from_str(
            r#"{
                "vaultPath": "/vault",
                "siteRoot": "/site",
                "blogSubdir": "blog",
                "pipelineRoot": "/pipeline",
                "trendsPath": "/pipeline/data/trends.json",
                "contentDir": "/vault/weekly",
                "publishRepo": "/site",
                "logDir": "/tmp/logs"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn invoke_runs_interpreter_in_pipeline_root_with_child_env() {
        let runner = StubRunner::new(0);
        invoke(&runner, &config()).unwrap();

        let seen = runner.seen.lock().unwrap();
        let (program, args, cwd, env) = &seen[0];
        assert_eq!(program, "python3");
        assert_eq!(args, &["orchestrator/ti_run.py", "--weekly"]);
        assert_eq!(cwd.as_deref(), Some("/pipeline"));
        assert!(env
            .iter()
            .any(|(k, v)| k == "BASTION_VAULT_PATH" && v == "/vault"));
    }

    #[test]
    fn invoke_fails_on_nonzero_exit() {
        let runner = StubRunner::new(3);
        let err = invoke(&runner, &config()).unwrap_err();
        assert_eq!(err.code(), "PIPELINE_FAILED");
        let message = err.to_string();
        assert!(message.contains("code 3"));
        assert!(message.contains("traceback"));
    }
}
