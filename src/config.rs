//! Client configuration for javelin.
//!
//! This struct represents the contents of an optional `javelin.yaml` at
//! the project root. A missing file yields defaults; unknown fields in
//! the YAML are ignored for forward compatibility.

use crate::error::{JavelinError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the GraalVM install root.
pub const GRAALVM_HOME_ENV: &str = "GRAALVM_HOME";

/// Configuration for a javelin project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GraalVM install root. Falls back to the GRAALVM_HOME environment
    /// variable when unset.
    pub graalvm_home: Option<String>,

    /// Target platform identifier handed to the linker (default: "host").
    #[serde(default = "default_target")]
    pub target: String,

    /// Fully qualified main class of the application. Required by `link`.
    pub main_class: Option<String>,

    /// Name of the produced native executable. Derived from the main
    /// class when unset.
    pub app_name: Option<String>,

    /// Runtime classpath handed to the linker. Assembled by the build
    /// tool, not by javelin. Required by `link`.
    pub classpath: Option<String>,

    /// Output directory for linked images, relative to the project root.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Command used to invoke Maven (default: "mvn").
    #[serde(default = "default_mvn_command")]
    pub mvn_command: String,

    /// Command used to invoke the native linker. Defaults to the
    /// `native-image` launcher under the GraalVM bin directory.
    pub linker_command: Option<String>,

    /// Maven profiles activated for agent runs.
    pub profiles: Vec<String>,

    /// User properties passed to Maven for agent runs.
    pub properties: BTreeMap<String, String>,

    /// Stream linker diagnostics.
    pub verbose: bool,
}

fn default_target() -> String {
    "host".to_string()
}

fn default_output_dir() -> String {
    crate::context::DEFAULT_OUTPUT_DIR.to_string()
}

fn default_mvn_command() -> String {
    "mvn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graalvm_home: None,
            target: default_target(),
            main_class: None,
            app_name: None,
            classpath: None,
            output_dir: default_output_dir(),
            mvn_command: default_mvn_command(),
            linker_command: None,
            profiles: Vec::new(),
            properties: BTreeMap::new(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load the configuration from a file path.
    ///
    /// A missing file yields the default configuration; a malformed file
    /// is a user error naming the parse failure.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(JavelinError::UserError(format!(
                    "failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        serde_yaml::from_str(&content).map_err(|e| {
            JavelinError::UserError(format!("failed to parse '{}': {}", path.display(), e))
        })
    }

    /// Resolve the GraalVM install root.
    ///
    /// Precedence: `graalvm_home` in javelin.yaml, then the GRAALVM_HOME
    /// environment variable.
    pub fn graalvm_home(&self) -> Result<PathBuf> {
        if let Some(home) = &self.graalvm_home {
            return Ok(PathBuf::from(home));
        }

        env::var(GRAALVM_HOME_ENV)
            .map(PathBuf::from)
            .map_err(|_| {
                JavelinError::UserError(format!(
                    "GraalVM location is not configured.\n\
                     Set graalvm_home in javelin.yaml or export {}.",
                    GRAALVM_HOME_ENV
                ))
            })
    }

    /// Path to the java launcher of the configured GraalVM install,
    /// as written into the patched descriptor.
    pub fn graalvm_java(&self) -> Result<String> {
        let java = self.graalvm_home()?.join("bin").join("java");
        Ok(java.display().to_string())
    }
}
