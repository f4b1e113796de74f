//! # jsv-validate: Instance Validation Engine
//!
//! Validates JSON instances against built schemas (see `jsv-schema`).
//!
//! ## Dispatch
//!
//! [`Validator::check`] reads a schema node's `type` and hands the
//! instance to the [`Constraint`] for that type. A union type tries each
//! member in turn and succeeds on the first one that reports nothing.
//! `any`, a missing `type`, and type names outside the vocabulary are
//! accepted without checks.
//!
//! ## Error Reporting
//!
//! Failures are never returned as `Err`. They are collected into
//! [`ValidationErrors`], keyed by instance path (`$`, `$.name`,
//! `$.items.3`), so one pass reports every problem. Two checks stop early:
//! a malformed instance document, and an array whose length is out of
//! bounds.
//!
//! ## Crate Policy
//!
//! - Depends only on `jsv-core` internally. The builder appears only as a
//!   dev-dependency of the integration tests.
//! - `Validator` holds configuration and a shared cache of compiled
//!   patterns. Every `validate` call owns its own error accumulator.

pub mod constraints;
pub mod equality;
pub mod errors;
pub mod validator;

pub use constraints::Constraint;
pub use equality::values_equal;
pub use errors::ValidationErrors;
pub use validator::{ResultCode, ValidationReport, Validator, ValidatorConfig, ROOT_PATH};
