//! # Validate Subcommand
//!
//! Builds the named schema, validates one instance against it and prints
//! the [`ValidationReport`] as JSON on stdout.

use anyhow::{Context, Result};
use clap::Args;
use jsv_schema::SchemaRegistry;
use jsv_validate::{ValidationReport, Validator};

use crate::config::CliConfig;
use crate::input::read_instance;
use crate::{schema_failure, EXIT_INVALID, EXIT_OK};

/// Arguments for the `jsv validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Instance document (JSON, or YAML by extension); `-` reads stdin.
    #[arg(value_name = "INSTANCE")]
    pub instance: String,

    /// Logical name of the schema to validate against.
    #[arg(long, value_name = "NAME")]
    pub schema: String,

    /// Accept object keys the schema does not declare.
    #[arg(long)]
    pub allow_additional_fields: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if the instance is valid, 1 if it is invalid or
/// malformed, 2 if the schema is missing or invalid.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let report = match validate_instance(args, config)? {
        Ok(report) => report,
        Err(code) => return Ok(code),
    };

    let rendered =
        serde_json::to_string_pretty(&report).context("failed to serialize validation report")?;
    println!("{rendered}");

    if report.is_valid() {
        Ok(EXIT_OK)
    } else {
        tracing::info!(
            code = ?report.code,
            paths = report.errors.len(),
            "instance rejected"
        );
        Ok(EXIT_INVALID)
    }
}

/// Produce the report, or the exit code of a schema failure.
fn validate_instance(
    args: &ValidateArgs,
    config: &CliConfig,
) -> Result<std::result::Result<ValidationReport, u8>> {
    let registry = SchemaRegistry::from_config(&config.registry);
    let schema = match registry.get_schema(&args.schema) {
        Ok(schema) => schema,
        Err(e) => return schema_failure(e).map(Err),
    };

    let instance = read_instance(&args.instance)?;

    let mut validator_config = config.validator.clone();
    validator_config.allow_additional_fields |= args.allow_additional_fields;
    let validator = Validator::new(validator_config);

    match validator.validate(&instance, &schema) {
        Ok(report) => Ok(Ok(report)),
        Err(e) => schema_failure(e).map(Err),
    }
}
