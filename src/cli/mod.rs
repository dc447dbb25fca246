//! CLI argument parsing for javelin.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Javelin: native-image build helper for JavaFX Maven projects.
///
/// Wraps the GraalVM toolchain for Maven-built JavaFX applications:
/// - `link` hands the build output to the native-image linker
/// - `runagent` runs the application on the GraalVM JDK with the
///   native-image tracing agent attached, collecting reflection and
///   resource configuration for later native builds
#[derive(Parser, Debug)]
#[command(name = "javelin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for javelin.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Link the application into a native image.
    ///
    /// Computes the work and temp directories from the output directory
    /// and delegates to the toolchain's native-image launcher.
    Link(LinkArgs),

    /// Run the application with the native-image tracing agent.
    ///
    /// Patches a copy of pom.xml so the JavaFX Maven plugin runs on the
    /// GraalVM JDK with the agent flag set, then invokes `mvn javafx:run`
    /// against the copy. The copy is deleted when the run finishes.
    Runagent(RunAgentArgs),
}

/// Arguments for the `link` command.
#[derive(Parser, Debug)]
pub struct LinkArgs {
    /// Output directory for the native image (default: target/client).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Target platform to link for (overrides javelin.yaml).
    #[arg(long)]
    pub target: Option<String>,
}

/// Arguments for the `runagent` command.
#[derive(Parser, Debug)]
pub struct RunAgentArgs {
    /// Maven profile to activate for the run (repeatable).
    #[arg(short = 'P', long = "profile")]
    pub profiles: Vec<String>,

    /// User property passed through to Maven (repeatable).
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Delete previously collected agent configuration before the run.
    ///
    /// By default the agent merges new results into the existing
    /// META-INF/native-image directory, accumulating across runs.
    #[arg(long)]
    pub clear_config: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_link_minimal() {
        let cli = Cli::try_parse_from(["javelin", "link"]).unwrap();
        if let Command::Link(args) = cli.command {
            assert!(args.output_dir.is_none());
            assert!(args.target.is_none());
        } else {
            panic!("Expected Link command");
        }
    }

    #[test]
    fn parse_link_full() {
        let cli = Cli::try_parse_from([
            "javelin",
            "link",
            "--output-dir",
            "target/out",
            "--target",
            "host",
        ])
        .unwrap();
        if let Command::Link(args) = cli.command {
            assert_eq!(args.output_dir, Some(PathBuf::from("target/out")));
            assert_eq!(args.target, Some("host".to_string()));
        } else {
            panic!("Expected Link command");
        }
    }

    #[test]
    fn parse_runagent_defaults() {
        let cli = Cli::try_parse_from(["javelin", "runagent"]).unwrap();
        if let Command::Runagent(args) = cli.command {
            assert!(args.profiles.is_empty());
            assert!(args.properties.is_empty());
            assert!(!args.clear_config);
        } else {
            panic!("Expected Runagent command");
        }
    }

    #[test]
    fn parse_runagent_profiles_and_properties() {
        let cli = Cli::try_parse_from([
            "javelin",
            "runagent",
            "-P",
            "desktop",
            "--profile",
            "ci",
            "-D",
            "skipTests=true",
            "-D",
            "javafx.version=21",
        ])
        .unwrap();
        if let Command::Runagent(args) = cli.command {
            assert_eq!(args.profiles, vec!["desktop", "ci"]);
            assert_eq!(args.properties, vec!["skipTests=true", "javafx.version=21"]);
        } else {
            panic!("Expected Runagent command");
        }
    }

    #[test]
    fn parse_runagent_clear_config() {
        let cli = Cli::try_parse_from(["javelin", "runagent", "--clear-config"]).unwrap();
        if let Command::Runagent(args) = cli.command {
            assert!(args.clear_config);
        } else {
            panic!("Expected Runagent command");
        }
    }
}
