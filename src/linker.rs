//! Native linking boundary.
//!
//! Linking itself happens in the GraalVM toolchain; javelin only
//! assembles the request and hands off. `NativeLinker` is the seam, and
//! `ToolchainLinker` is the production implementation shelling out to
//! the `native-image` launcher. Failures cross the boundary as
//! `anyhow::Error` cause chains and are wrapped into a fatal
//! `LinkError` by the caller.

use crate::config::Config;
use crate::error::{JavelinError, Result};
use anyhow::{Context, anyhow, bail};
use std::path::Path;
use std::process::Command;

/// A native-link request: where to work, and for which target.
#[derive(Debug)]
pub struct LinkRequest<'a> {
    /// Directory the linked image is emitted under.
    pub output_dir: &'a Path,
    /// Scratch space for intermediate link artifacts.
    pub tmp_dir: &'a Path,
    /// Client configuration, passed through opaquely.
    pub config: &'a Config,
    /// Target platform identifier.
    pub target: &'a str,
}

/// The native-linking entry point.
pub trait NativeLinker {
    fn link(&self, request: &LinkRequest<'_>) -> anyhow::Result<()>;
}

/// Links by invoking the toolchain's `native-image` launcher.
pub struct ToolchainLinker {
    /// Launcher argv prefix (program plus any configured leading args).
    launcher: Vec<String>,
}

impl ToolchainLinker {
    /// Resolve the launcher from `linker_command` in javelin.yaml, or
    /// from the toolchain home's bin directory when unset.
    pub fn from_config(config: &Config) -> Result<Self> {
        let launcher = match &config.linker_command {
            Some(command) => shell_words::split(command).map_err(|e| {
                JavelinError::UserError(format!(
                    "failed to parse linker_command '{}': {}\n\
                     Fix: check for unmatched quotes in javelin.yaml.",
                    command, e
                ))
            })?,
            None => {
                let launcher = config.graalvm_home()?.join("bin").join("native-image");
                vec![launcher.display().to_string()]
            }
        };

        if launcher.is_empty() {
            return Err(JavelinError::UserError(
                "linker_command is empty after parsing.\n\
                 Fix: provide a valid command in javelin.yaml linker_command."
                    .to_string(),
            ));
        }

        Ok(Self { launcher })
    }
}

impl NativeLinker for ToolchainLinker {
    fn link(&self, request: &LinkRequest<'_>) -> anyhow::Result<()> {
        let program = &self.launcher[0];
        let args = image_args(request)?;

        let status = Command::new(program)
            .args(&self.launcher[1..])
            .args(&args)
            .status()
            .with_context(|| format!("failed to start '{}'", program))?;

        match status.code() {
            Some(0) => Ok(()),
            Some(code) => bail!("native-image exited with code {}", code),
            None => bail!("native-image was terminated by a signal"),
        }
    }
}

/// Build the launcher arguments for a link request.
fn image_args(request: &LinkRequest<'_>) -> anyhow::Result<Vec<String>> {
    let config = request.config;

    let main_class = config
        .main_class
        .as_deref()
        .ok_or_else(|| anyhow!("main_class is not set in javelin.yaml"))?;
    let classpath = config
        .classpath
        .as_deref()
        .ok_or_else(|| anyhow!("classpath is not set in javelin.yaml"))?;

    let app_name = match &config.app_name {
        Some(name) => name.clone(),
        None => main_class
            .rsplit('.')
            .next()
            .unwrap_or(main_class)
            .to_ascii_lowercase(),
    };

    let image_dir = request.output_dir.join(request.target);

    let mut args = vec![
        "-cp".to_string(),
        classpath.to_string(),
        format!("-H:Path={}", image_dir.display()),
        format!("-H:Name={}", app_name),
        format!("-H:TempDirectory={}", request.tmp_dir.display()),
    ];

    if config.verbose {
        args.push("--verbose".to_string());
    }

    args.push(main_class.to_string());
    Ok(args)
}
