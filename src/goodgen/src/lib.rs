//! # goodgen
//!
//! Normalization and stat-scaling engine for upstream game-configuration data.
//!
//! This library provides functionality to:
//! - Map upstream enumerated codes (stat types, equip slots, weapon classes)
//!   onto the stable GOOD-flavored vocabulary
//! - Project loosely-typed upstream records into validated entity types
//! - Expand sparse growth-curve and promotion breakpoint tables into dense
//!   per-level (0-99) and per-ascension-tier (0-6) scaling matrices
//! - Join artifact sets to their localized names through the affix table
//!
//! The library never touches the network or the filesystem. Upstream tables
//! arrive through the [`raw::TableSource`] trait; callers (the CLI) decide
//! where records come from and where resolved data goes.
//!
//! ## Example
//!
//! ```no_run
//! use goodgen::context::RunContext;
//! use goodgen::project::project_characters;
//! use goodgen::scaling::resolve_character_scaling;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let source = goodgen::raw::MemorySource::new();
//! let ctx = RunContext::load(&source)?;
//! let characters = project_characters(&ctx.characters, ctx.schema);
//! let scalings = resolve_character_scaling(
//!     &characters,
//!     &ctx.character_curves,
//!     &ctx.character_promotes,
//!     ctx.schema,
//! );
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod mapping;
pub mod project;
pub mod raw;
pub mod scaling;
pub mod schema;
pub mod sets;
pub mod textmap;

// Re-export commonly used items
#[doc(inline)]
pub use context::RunContext;
#[doc(inline)]
pub use raw::{RawRecord, RawTable, TableError, TableSource, UpstreamTable};
#[doc(inline)]
pub use schema::UpstreamSchema;
#[doc(inline)]
pub use textmap::TextMap;
