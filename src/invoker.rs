//! Maven subprocess invocation.
//!
//! Builds the argv for a Maven run against a specific descriptor and
//! executes it synchronously. All Maven calls go through this module.

use crate::error::{JavelinError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Parameters for one Maven run. Built fresh per call, never reused.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    /// Descriptor the run executes against.
    pub pom_file: PathBuf,
    /// Goals, in order.
    pub goals: Vec<String>,
    /// Profile ids to activate.
    pub profiles: Vec<String>,
    /// User properties passed as -Dkey=value.
    pub properties: BTreeMap<String, String>,
}

/// Result of a finished Maven run.
#[derive(Debug, Clone, Copy)]
pub struct InvocationResult {
    /// Exit code, None when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl InvocationResult {
    /// True only for a clean zero exit.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Build the Maven argv for a request (everything after the program name).
pub fn build_args(request: &InvocationRequest) -> Vec<String> {
    let mut args = vec!["-f".to_string(), request.pom_file.display().to_string()];

    if !request.profiles.is_empty() {
        args.push("-P".to_string());
        args.push(request.profiles.join(","));
    }

    for (key, value) in &request.properties {
        args.push(format!("-D{}={}", key, value));
    }

    args.extend(request.goals.iter().cloned());
    args
}

/// Run Maven synchronously, blocking until it exits.
///
/// `mvn_command` is split with shell-words so configured commands like
/// `"mvn -B"` work without involving a shell. Stdio is inherited: the
/// launched application owns the terminal for the duration of the run.
/// There is no timeout; a hung subprocess hangs the command.
pub fn invoke(
    mvn_command: &str,
    project_root: &Path,
    request: &InvocationRequest,
) -> Result<InvocationResult> {
    let mut argv = shell_words::split(mvn_command).map_err(|e| {
        JavelinError::UserError(format!(
            "failed to parse mvn_command '{}': {}\n\
             Fix: check for unmatched quotes or invalid escape sequences in javelin.yaml.",
            mvn_command, e
        ))
    })?;

    if argv.is_empty() {
        return Err(JavelinError::UserError(
            "mvn_command is empty after parsing.\n\
             Fix: provide a valid command in javelin.yaml mvn_command."
                .to_string(),
        ));
    }

    let program = argv.remove(0);

    let status = Command::new(&program)
        .args(&argv)
        .args(build_args(request))
        .current_dir(project_root)
        .status()
        .map_err(|e| {
            JavelinError::Invocation(format!(
                "failed to execute '{}': {}\n\
                 Fix: ensure Maven is installed and in PATH.",
                program, e
            ))
        })?;

    Ok(InvocationResult {
        exit_code: status.code(),
    })
}
