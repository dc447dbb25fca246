//! The `runagent` command: collect native-image agent configuration.
//!
//! Rewrites a copy of the project pom so the JavaFX Maven plugin runs
//! the application on the GraalVM JDK with the tracing agent attached,
//! then invokes `mvn javafx:run` against the copy. The source pom is
//! never touched, and the copy is deleted on every exit path.

use crate::cleanup::TempArtifact;
use crate::cli::RunAgentArgs;
use crate::config::Config;
use crate::context::{AGENT_CONFIG_DIR, ProjectContext};
use crate::descriptor::{self, PatchOutcome, agent_option, patch_descriptor};
use crate::error::{JavelinError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::fs::atomic_write;
use crate::invoker::{self, InvocationRequest};
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The Maven goal run under the agent.
const RUN_GOAL: &str = "javafx:run";

pub fn cmd_runagent(args: RunAgentArgs) -> Result<()> {
    let ctx = ProjectContext::resolve()?;
    let config = Config::load(ctx.config_path())?;

    run_agent(&ctx, &config, &args)
}

pub(crate) fn run_agent(ctx: &ProjectContext, config: &Config, args: &RunAgentArgs) -> Result<()> {
    prepare_agent_dir(&ctx.agent_config_dir(), args.clear_config)?;

    let properties = merged_properties(config, &args.properties)?;
    let mut profiles = config.profiles.clone();
    profiles.extend(args.profiles.iter().cloned());

    // The guard is armed before the descriptor is touched, so a partial
    // write never survives the command.
    let agent_pom = TempArtifact::new(ctx.agent_pom_path());

    let outcome = write_agent_pom(ctx, config, agent_pom.path())?;
    if outcome == PatchOutcome::PluginNotFound {
        eprintln!(
            "Warning: no JavaFX Maven plugin found in {}; running without agent instrumentation",
            ctx.pom_path().display()
        );
    }

    let request = InvocationRequest {
        pom_file: agent_pom.path().to_path_buf(),
        goals: vec![RUN_GOAL.to_string()],
        profiles,
        properties,
    };
    let result = invoker::invoke(&config.mvn_command, &ctx.project_root, &request)?;

    let event = Event::new(EventAction::RunAgent).with_details(json!({
        "exit_code": result.exit_code,
        "plugin_found": outcome == PatchOutcome::Patched,
        "cleared_config": args.clear_config,
    }));
    if let Err(e) = append_event(ctx, &event) {
        eprintln!("Warning: failed to log run_agent event: {}", e);
    }

    if !result.success() {
        let status = match result.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        return Err(JavelinError::RunFailed(format!(
            "{} failed ({})",
            RUN_GOAL, status
        )));
    }

    println!(
        "Agent run complete; configuration merged into {}",
        AGENT_CONFIG_DIR
    );
    Ok(())
}

/// Create the agent merge directory, or clear it when requested.
///
/// By default existing files are kept so the agent merges new results
/// into configuration collected by earlier runs.
fn prepare_agent_dir(dir: &Path, clear: bool) -> Result<()> {
    if !dir.exists() {
        return fs::create_dir_all(dir).map_err(|e| {
            JavelinError::UserError(format!("failed to create '{}': {}", dir.display(), e))
        });
    }

    if clear {
        let entries = fs::read_dir(dir).map_err(|e| {
            JavelinError::UserError(format!("failed to read '{}': {}", dir.display(), e))
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| {
                JavelinError::UserError(format!("failed to read '{}': {}", dir.display(), e))
            })?;
            let path = entry.path();
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|e| {
                JavelinError::UserError(format!("failed to remove '{}': {}", path.display(), e))
            })?;
        }
    }

    Ok(())
}

/// Parse, patch, and serialize the descriptor to the agent pom path.
fn write_agent_pom(ctx: &ProjectContext, config: &Config, dest: &Path) -> Result<PatchOutcome> {
    let mut project = descriptor::parse_file(ctx.pom_path())?;

    let java_executable = config.graalvm_java()?;
    let outcome = patch_descriptor(
        &mut project,
        &java_executable,
        &agent_option(AGENT_CONFIG_DIR),
    );

    let xml = descriptor::to_xml(&project);
    atomic_write(dest, xml.as_bytes())
        .map_err(|e| JavelinError::DescriptorWrite(format!("{}: {}", dest.display(), e)))?;

    Ok(outcome)
}

/// Merge configured properties with command-line KEY=VALUE definitions.
fn merged_properties(config: &Config, cli_properties: &[String]) -> Result<BTreeMap<String, String>> {
    let mut properties = config.properties.clone();

    for raw in cli_properties {
        let (key, value) = raw.split_once('=').ok_or_else(|| {
            JavelinError::UserError(format!("invalid property '{}': expected KEY=VALUE", raw))
        })?;
        properties.insert(key.to_string(), value.to_string());
    }

    Ok(properties)
}
