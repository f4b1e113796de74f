//! # Build Subcommand
//!
//! Prints a schema with every `extends` resolved.

use anyhow::{Context, Result};
use clap::Args;
use jsv_schema::SchemaRegistry;

use crate::config::CliConfig;
use crate::{schema_failure, EXIT_OK};

/// Arguments for the `jsv build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Logical schema name, relative to the schema directory.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Pretty-print the built schema.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the build subcommand.
///
/// Returns exit code: 0 on success, 2 if the schema is missing or invalid.
pub fn run_build(args: &BuildArgs, config: &CliConfig) -> Result<u8> {
    let registry = SchemaRegistry::from_config(&config.registry);
    let built = match registry.get_schema(&args.name) {
        Ok(built) => built,
        Err(e) => return schema_failure(e),
    };
    println!("{}", render(&built, args.pretty)?);
    Ok(EXIT_OK)
}

fn render(built: &str, pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(built.to_string());
    }
    let value: serde_json::Value =
        serde_json::from_str(built).context("built schema is not valid JSON")?;
    serde_json::to_string_pretty(&value).context("failed to format built schema")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EXIT_SCHEMA_ERROR;
    use jsv_schema::RegistryConfig;

    fn config_for(dir: &std::path::Path) -> CliConfig {
        CliConfig {
            registry: RegistryConfig::new(dir),
            ..CliConfig::default()
        }
    }

    #[test]
    fn builds_existing_schema() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{"type": "string"}"#).unwrap();
        let args = BuildArgs {
            name: "a.json".into(),
            pretty: true,
        };
        assert_eq!(run_build(&args, &config_for(dir.path())).unwrap(), EXIT_OK);
    }

    #[test]
    fn missing_schema_exits_with_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = BuildArgs {
            name: "nope.json".into(),
            pretty: false,
        };
        assert_eq!(
            run_build(&args, &config_for(dir.path())).unwrap(),
            EXIT_SCHEMA_ERROR
        );
    }

    #[test]
    fn cache_dir_receives_built_schema() {
        let dir = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.json"), r#"{"type": "integer"}"#).unwrap();
        std::fs::write(
            dir.path().join("child.json"),
            r#"{"extends": "base.json", "minimum": 0}"#,
        )
        .unwrap();
        let config = CliConfig {
            registry: RegistryConfig::new(dir.path()).with_cache_dir(cache.path()),
            ..CliConfig::default()
        };
        let args = BuildArgs {
            name: "child.json".into(),
            pretty: false,
        };
        assert_eq!(run_build(&args, &config).unwrap(), EXIT_OK);

        let key = jsv_core::CacheKey::for_schema("child.json");
        let cached = std::fs::read_to_string(cache.path().join(key.as_str())).unwrap();
        let cached: serde_json::Value = serde_json::from_str(&cached).unwrap();
        assert_eq!(cached, serde_json::json!({"minimum": 0, "type": "integer"}));
    }

    #[test]
    fn render_keeps_compact_text_verbatim() {
        assert_eq!(render(r#"{"b":1,"a":2}"#, false).unwrap(), r#"{"b":1,"a":2}"#);
        assert_eq!(
            render(r#"{"b":1,"a":2}"#, true).unwrap(),
            "{\n  \"b\": 1,\n  \"a\": 2\n}"
        );
    }
}
