//! Core types for spec-derived builtin tables.
//!
//! This crate defines what the extractor produces and the policy it uses:
//!
//! - [`BuiltinTable`]: function names with inclusive [`ArityRange`]s, in
//!   first-seen order.
//! - [`ArityMerger`]: folds `(name, argument count)` observations into a
//!   table, leaving names in the override set at their first observation.
//! - [`ExtractionConfig`]: the table allow-list, override set and reduction
//!   operators, loadable from YAML.
//! - [`SmoothNumbers`] and [`reinterpret_builtins`]: generated listings
//!   that accompany the extracted table in the same code generator.
//!
//! # Example
//!
//! ```
//! use spec_builtins_core::*;
//!
//! let config = ExtractionConfig::default();
//! let mut merger = ArityMerger::new(&config.skip_second_variant);
//! merger.observe("mad", 3);
//! merger.observe("get_global_id", 1);
//! merger.observe("get_global_id", 0);
//!
//! let table = merger.finish();
//! assert_eq!(table.get("mad"), Some(ArityRange::exact(3)));
//! assert_eq!(table.get("get_global_id"), Some(ArityRange::exact(1)));
//! ```

mod config;
mod error;
mod merge;
mod powers;
mod reinterpret;
mod types;

pub use config::{
    DEFAULT_OPERATORS, DEFAULT_SKIP_SECOND_VARIANT, DEFAULT_TABLES, ExtractionConfig,
};
pub use error::{BuiltinError, Result};
pub use merge::{ArityMerger, MergeOutcome};
pub use powers::{SMOOTH_PRIMES, SmoothNumbers};
pub use reinterpret::{SCALAR_TYPES, VECTOR_WIDTHS, reinterpret_builtins};
pub use types::*;
