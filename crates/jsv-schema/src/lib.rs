//! # jsv-schema: Schema Provider & Builder
//!
//! Turns schema documents that inherit from one another into concrete,
//! grammar-checked schemas.
//!
//! ## Building (`builder`)
//!
//! [`SchemaBuilder`] resolves `extends` references through a
//! [`SchemaRegistry`], merges inherited fields with child-wins precedence,
//! checks every node against the type grammar in `jsv_core::spec`, and
//! recurses into `properties` and `items`.
//!
//! ## Providing (`registry`, `store`, `resolver`)
//!
//! [`SchemaRegistry`] reads raw documents from a [`SchemaStore`], maps
//! `extends` references to logical names with a [`PathResolver`], and
//! optionally caches built schemas in a second store keyed by
//! [`jsv_core::CacheKey`].
//!
//! ## Crate Policy
//!
//! - Depends only on `jsv-core` internally.
//! - A failed build never yields a partial schema.
//! - Cyclic `extends` chains are detected and rejected.

pub mod builder;
pub mod registry;
pub mod resolver;
pub mod store;

pub use builder::{build_schema, extend, SchemaBuilder};
pub use registry::{RegistryConfig, SchemaRegistry};
pub use resolver::{BasicResolver, PathResolver};
pub use store::{FsStore, MemoryStore, SchemaStore};
