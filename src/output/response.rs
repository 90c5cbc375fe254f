//! CLI response formatting and output.
//!
//! Provides JSON envelope, printing, and exit code mapping.

use bastion_weekly::{Error, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code().to_string(),
                message: err.to_string(),
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) {
    use std::io::{self, Write};

    let payload = serde_json::to_string_pretty(response)
        .unwrap_or_else(|e| format!(r#"{{"success": false, "error": {{"code": "JSON_ERROR", "message": "{}"}}}}"#, e));
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", payload); // BrokenPipe: exit quietly
}

pub fn print_json_result<T: Serialize>(result: Result<T>) {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

/// Map a command result to the payload plus process exit code.
pub fn map_cmd_result<T: Serialize>(result: Result<(T, i32)>) -> (Result<T>, i32) {
    match result {
        Ok((data, exit_code)) => (Ok(data), exit_code),
        Err(err) => {
            let exit_code = exit_code_for_error(&err);
            (Err(err), exit_code)
        }
    }
}

fn exit_code_for_error(err: &Error) -> i32 {
    match err {
        Error::Config(_) => 10,
        Error::Pipeline(_) => 20,
        Error::HealthCheck(_) => 30,
        Error::Publish(_) => 40,
        Error::Io(_) | Error::Json(_) => 1,
    }
}
