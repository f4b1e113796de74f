//! # jsv CLI entry point
//!
//! Parses command-line arguments, loads configuration and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jsv_cli::build::{run_build, BuildArgs};
use jsv_cli::config::{CliConfig, Overrides};
use jsv_cli::validate::{run_validate, ValidateArgs};

/// JSON schema builder and validator.
///
/// Resolves schema inheritance (`extends`) into self-contained schemas and
/// validates JSON or YAML documents against them.
#[derive(Parser, Debug)]
#[command(name = "jsv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML or JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the raw schema documents.
    #[arg(long, global = true)]
    schema_dir: Option<PathBuf>,

    /// Directory for cached built schemas. Enables caching.
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Bypass the built-schema cache.
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a schema with all `extends` resolved.
    Build(BuildArgs),

    /// Validate an instance document against a schema.
    Validate(ValidateArgs),
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            schema_dir: self.schema_dir.clone(),
            cache_dir: self.cache_dir.clone(),
            no_cache: self.no_cache,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = CliConfig::load(cli.config.as_deref(), &cli.overrides()).and_then(|config| {
        tracing::debug!(
            schema_dir = %config.registry.schema_dir.display(),
            use_cache = config.registry.use_cache,
            "resolved configuration"
        );
        match &cli.command {
            Commands::Build(args) => run_build(args, &config),
            Commands::Validate(args) => run_validate(args, &config),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(jsv_cli::EXIT_INVALID)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_build() {
        let cli = Cli::try_parse_from(["jsv", "build", "forms/question.json"]).unwrap();
        if let Commands::Build(args) = cli.command {
            assert_eq!(args.name, "forms/question.json");
            assert!(!args.pretty);
        } else {
            panic!("expected build");
        }
        assert_eq!(cli.verbose, 0);
        assert!(cli.schema_dir.is_none());
    }

    #[test]
    fn cli_parse_validate() {
        let cli = Cli::try_parse_from([
            "jsv",
            "validate",
            "answer.yaml",
            "--schema",
            "forms/answer.json",
            "--allow-additional-fields",
        ])
        .unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.instance, "answer.yaml");
            assert_eq!(args.schema, "forms/answer.json");
            assert!(args.allow_additional_fields);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_stdin() {
        let cli = Cli::try_parse_from(["jsv", "validate", "-", "--schema", "a.json"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.instance, "-");
            assert!(!args.allow_additional_fields);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_requires_schema() {
        assert!(Cli::try_parse_from(["jsv", "validate", "a.json"]).is_err());
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "jsv",
            "build",
            "a.json",
            "-vv",
            "--schema-dir",
            "defs",
            "--cache-dir",
            "cache",
            "--no-cache",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let overrides = cli.overrides();
        assert_eq!(overrides.schema_dir, Some(PathBuf::from("defs")));
        assert_eq!(overrides.cache_dir, Some(PathBuf::from("cache")));
        assert!(overrides.no_cache);
    }

    #[test]
    fn cli_parse_config_path() {
        let cli = Cli::try_parse_from(["jsv", "--config", "jsv.yaml", "build", "a.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("jsv.yaml")));
    }

    #[test]
    fn cli_parse_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["jsv", "lint"]).is_err());
    }
}
