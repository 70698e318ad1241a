//! Arity merging with a per-name override policy.
//!
//! Every extracted signature becomes one `(name, count)` observation.
//! [`ArityMerger`] folds those observations into a [`BuiltinTable`]:
//!
//! - the first observation of a name fixes its range to `[count, count]`;
//! - later observations widen the range to cover `count`;
//! - later observations of a name in the override set are dropped, so the
//!   range stays at the first observation.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use spec_builtins_core::{ArityMerger, ArityRange, MergeOutcome};
//!
//! let overrides: BTreeSet<String> = ["fmax".to_string()].into();
//! let mut merger = ArityMerger::new(&overrides);
//!
//! merger.observe("clamp", 3);
//! merger.observe("clamp", 2);
//! merger.observe("fmax", 2);
//! assert_eq!(merger.observe("fmax", 3), MergeOutcome::Skipped);
//!
//! let table = merger.finish();
//! assert_eq!(table.get("clamp"), Some(ArityRange { min: 2, max: 3 }));
//! assert_eq!(table.get("fmax"), Some(ArityRange::exact(2)));
//! ```

use std::collections::BTreeSet;

use tracing::debug;

use crate::{ArityRange, BuiltinTable};

/// What a single observation did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First time the name was seen.
    Inserted,
    /// The stored range grew to cover the new count.
    Widened,
    /// The count was already inside the stored range.
    Unchanged,
    /// The name is in the override set; the observation was ignored.
    Skipped,
}

/// Accumulates observations into a [`BuiltinTable`].
#[derive(Debug)]
pub struct ArityMerger<'a> {
    overrides: &'a BTreeSet<String>,
    table: BuiltinTable,
}

impl<'a> ArityMerger<'a> {
    /// Creates a merger that never widens names listed in `overrides`.
    pub fn new(overrides: &'a BTreeSet<String>) -> Self {
        Self {
            overrides,
            table: BuiltinTable::new(),
        }
    }

    /// Records one observation of `name` taking `count` arguments.
    pub fn observe(&mut self, name: &str, count: usize) -> MergeOutcome {
        if self.overrides.contains(name) && self.table.contains(name) {
            debug!(name, count, "Ignoring later overload of override-listed builtin");
            return MergeOutcome::Skipped;
        }

        match self.table.get_mut(name) {
            Some(arity) => {
                if arity.widen(count) {
                    MergeOutcome::Widened
                } else {
                    MergeOutcome::Unchanged
                }
            }
            None => {
                self.table.insert(name, ArityRange::exact(count));
                MergeOutcome::Inserted
            }
        }
    }

    /// Table built so far.
    pub fn table(&self) -> &BuiltinTable {
        &self.table
    }

    pub fn finish(self) -> BuiltinTable {
        self.table
    }
}
