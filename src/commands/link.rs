//! The `link` command: hand the build output to the native linker.
//!
//! Computes the work and temp directories from the output directory and
//! delegates to the toolchain. Whatever the linker writes is opaque to
//! this command; any failure from it is fatal, with no retry.

use crate::cli::LinkArgs;
use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::{JavelinError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::linker::{LinkRequest, NativeLinker, ToolchainLinker};
use serde_json::json;
use std::fs;

pub fn cmd_link(args: LinkArgs) -> Result<()> {
    let ctx = ProjectContext::resolve()?;
    let config = Config::load(ctx.config_path())?;
    let linker = ToolchainLinker::from_config(&config)?;

    run_link(&ctx, &config, &linker, &args)
}

pub(crate) fn run_link(
    ctx: &ProjectContext,
    config: &Config,
    linker: &dyn NativeLinker,
    args: &LinkArgs,
) -> Result<()> {
    let target = args.target.clone().unwrap_or_else(|| config.target.clone());
    let output_dir = ctx.resolve_output_dir(args.output_dir.as_deref(), &config.output_dir);

    let work_dir = output_dir
        .parent()
        .ok_or_else(|| {
            JavelinError::UserError(format!(
                "output directory '{}' has no parent directory",
                output_dir.display()
            ))
        })?
        .to_path_buf();
    let tmp_dir = work_dir.join("gvm").join("tmp");

    for dir in [&output_dir, &tmp_dir] {
        fs::create_dir_all(dir).map_err(|e| {
            JavelinError::UserError(format!("failed to create '{}': {}", dir.display(), e))
        })?;
    }

    if config.verbose {
        eprintln!("Linking in {}", tmp_dir.display());
    }

    linker
        .link(&LinkRequest {
            output_dir: &output_dir,
            tmp_dir: &tmp_dir,
            config,
            target: &target,
        })
        .map_err(JavelinError::LinkError)?;

    let event = Event::new(EventAction::Link).with_details(json!({
        "target": target,
        "output_dir": output_dir.display().to_string(),
    }));
    if let Err(e) = append_event(ctx, &event) {
        eprintln!("Warning: failed to log link event: {}", e);
    }

    println!(
        "Native link complete: {}",
        output_dir.join(&target).display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use crate::test_support::create_test_project;

    fn stub_config(linker_command: &str) -> Config {
        Config {
            graalvm_home: Some("/opt/graalvm".to_string()),
            main_class: Some("com.example.demo.App".to_string()),
            classpath: Some("target/classes".to_string()),
            linker_command: Some(linker_command.to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn run_link_creates_work_dirs_and_succeeds() {
        let temp_dir = create_test_project();
        let ctx = ProjectContext::resolve_from(temp_dir.path()).unwrap();
        let config = stub_config("true");
        let linker = ToolchainLinker::from_config(&config).unwrap();
        let args = LinkArgs {
            output_dir: None,
            target: None,
        };

        run_link(&ctx, &config, &linker, &args).unwrap();

        assert!(temp_dir.path().join("target/client").is_dir());
        assert!(temp_dir.path().join("target/gvm/tmp").is_dir());
    }

    #[test]
    fn run_link_logs_an_event() {
        let temp_dir = create_test_project();
        let ctx = ProjectContext::resolve_from(temp_dir.path()).unwrap();
        let config = stub_config("true");
        let linker = ToolchainLinker::from_config(&config).unwrap();
        let args = LinkArgs {
            output_dir: None,
            target: Some("ios".to_string()),
        };

        run_link(&ctx, &config, &linker, &args).unwrap();

        let log = std::fs::read_to_string(ctx.events_file()).unwrap();
        assert!(log.contains("\"link\""));
        assert!(log.contains("\"ios\""));
    }

    #[test]
    fn run_link_wraps_linker_failure() {
        let temp_dir = create_test_project();
        let ctx = ProjectContext::resolve_from(temp_dir.path()).unwrap();
        let config = stub_config("false");
        let linker = ToolchainLinker::from_config(&config).unwrap();
        let args = LinkArgs {
            output_dir: None,
            target: None,
        };

        let err = run_link(&ctx, &config, &linker, &args).unwrap_err();

        assert!(matches!(err, JavelinError::LinkError(_)));
        assert_eq!(err.exit_code(), exit_codes::LINK_FAILURE);
        assert!(err.to_string().contains("native link failed"));
    }

    #[test]
    fn run_link_honors_output_dir_flag() {
        let temp_dir = create_test_project();
        let ctx = ProjectContext::resolve_from(temp_dir.path()).unwrap();
        let config = stub_config("true");
        let linker = ToolchainLinker::from_config(&config).unwrap();
        let args = LinkArgs {
            output_dir: Some("build/native".into()),
            target: None,
        };

        run_link(&ctx, &config, &linker, &args).unwrap();

        assert!(temp_dir.path().join("build/native").is_dir());
        assert!(temp_dir.path().join("build/gvm/tmp").is_dir());
    }
}
