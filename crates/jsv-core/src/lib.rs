//! # jsv-core: Foundational Types for jsv
//!
//! Leaf crate of the workspace. Both the schema builder (`jsv-schema`) and
//! the validation engine (`jsv-validate`) depend on it; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed type vocabulary.** `SchemaType` is an enum of the eight
//!    recognised type names. Every dispatch point matches on it
//!    exhaustively.
//!
//! 2. **Grammar as data.** The per-type allowed-property table lives in
//!    [`spec`] and is consulted by the builder's syntax check.
//!
//! 3. **Two disjoint error worlds.** [`SchemaError`] describes a schema
//!    that cannot be built. Instance-validation failures are never errors;
//!    they are reported as data by `jsv-validate`.
//!
//! 4. **Stable cache keys.** [`CacheKey`] is a fixed-width SHA-256 digest of
//!    the logical schema name.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jsv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod path;
pub mod spec;

pub use digest::CacheKey;
pub use error::{SchemaError, StoreError};
pub use path::{join_logical, logical_dirname, normalize_logical};
pub use spec::{allowed_properties, is_property_allowed, SchemaType, TypeDecl, DEFAULT_TYPE};
