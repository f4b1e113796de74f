//! # jsv-cli: CLI Tool for jsv
//!
//! Provides the `jsv` command-line interface over the schema registry and
//! the validation engine.
//!
//! ## Subcommands
//!
//! - `jsv build <NAME>`: print a schema with its inheritance resolved.
//! - `jsv validate <INSTANCE|-> --schema <NAME>`: validate a JSON or YAML
//!   document and print the report as JSON.
//!
//! ```bash
//! jsv --schema-dir schemas build forms/question.json
//! jsv --cache-dir .jsv-cache validate answer.yaml --schema forms/answer.json
//! cat answer.json | jsv validate - --schema forms/answer.json
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | schema built, or instance valid |
//! | 1 | instance invalid or malformed, or an operational failure |
//! | 2 | the schema itself is missing or invalid |

pub mod build;
pub mod config;
pub mod input;
pub mod validate;

use jsv_core::SchemaError;

/// Success.
pub const EXIT_OK: u8 = 0;
/// The instance failed validation or could not be parsed.
pub const EXIT_INVALID: u8 = 1;
/// The schema is missing, unparsable or grammatically invalid.
pub const EXIT_SCHEMA_ERROR: u8 = 2;

/// Map a registry failure to an exit code, or hand it back when it is an
/// operational failure (cache, store) rather than a schema problem.
pub(crate) fn schema_failure(err: SchemaError) -> anyhow::Result<u8> {
    if !err.is_invalid_schema() {
        return Err(err.into());
    }
    eprintln!("schema error: {err}");
    Ok(EXIT_SCHEMA_ERROR)
}
