//! Project context resolution for javelin.
//!
//! This module locates the Maven project root (the directory containing
//! `pom.xml`) and derives the fixed paths both commands work with. All
//! commands must go through this module to locate project files.

use crate::error::{JavelinError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Source build descriptor file name.
pub const POM_FILE: &str = "pom.xml";

/// Patched descriptor written next to the source pom for agent runs.
pub const AGENT_POM_FILE: &str = "agentPom.xml";

/// Directory where the tracing agent merges its configuration,
/// relative to the project root.
pub const AGENT_CONFIG_DIR: &str = "src/main/resources/META-INF/native-image";

/// Optional configuration file name at the project root.
pub const CONFIG_FILE: &str = "javelin.yaml";

/// Default output directory for linked images, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "target/client";

/// Resolved paths for a javelin invocation.
///
/// All derived paths are anchored at the project root.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Absolute path to the Maven project root.
    pub project_root: PathBuf,
}

impl ProjectContext {
    /// Resolve the project context from the current working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            JavelinError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd)
    }

    /// Resolve the project context from a specific directory.
    ///
    /// This is useful for testing or when the project directory is known.
    pub fn resolve_from<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        if !dir.join(POM_FILE).is_file() {
            return Err(JavelinError::UserError(format!(
                "no {} found in {}.\n\
                 Run javelin from the root of a Maven project.",
                POM_FILE,
                dir.display()
            )));
        }

        Ok(Self {
            project_root: dir.to_path_buf(),
        })
    }

    /// Get the path to the source build descriptor.
    pub fn pom_path(&self) -> PathBuf {
        self.project_root.join(POM_FILE)
    }

    /// Get the path the patched descriptor is written to.
    pub fn agent_pom_path(&self) -> PathBuf {
        self.project_root.join(AGENT_POM_FILE)
    }

    /// Get the path to the agent configuration merge directory.
    pub fn agent_config_dir(&self) -> PathBuf {
        self.project_root.join(AGENT_CONFIG_DIR)
    }

    /// Get the path to the optional configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.project_root.join(CONFIG_FILE)
    }

    /// Get the path to the run-log directory.
    pub fn events_dir(&self) -> PathBuf {
        self.project_root.join("target").join("javelin")
    }

    /// Get the path to the run-log file.
    pub fn events_file(&self) -> PathBuf {
        self.events_dir().join("events.ndjson")
    }

    /// Resolve the absolute output directory for the `link` command.
    ///
    /// Precedence: command-line flag, then the configured directory.
    /// Relative paths are anchored at the project root.
    pub fn resolve_output_dir(&self, flag: Option<&Path>, configured: &str) -> PathBuf {
        let chosen = flag
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(configured));

        if chosen.is_absolute() {
            chosen
        } else {
            self.project_root.join(chosen)
        }
    }
}
