//! Extraction report types.

use serde::Serialize;

use crate::scanner::ScanStats;

/// Per-table signature counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    /// Caption identifier.
    pub id: u32,
    /// Signatures matched in the table markup.
    pub signatures: usize,
    /// Observations after operator expansion.
    pub observations: usize,
}

/// Summary of one extraction run, serializable for `--report`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Scanner counters.
    pub scan: ScanStats,
    /// Committed tables in processing order.
    pub tables: Vec<TableReport>,
    /// Observations that created a new entry.
    pub inserted: usize,
    /// Observations that widened an existing range.
    pub widened: usize,
    /// Observations already covered by the stored range.
    pub unchanged: usize,
    /// Observations dropped by the override set.
    pub skipped: usize,
    /// Entries in the final table.
    pub builtins: usize,
}

impl ExtractionReport {
    pub fn total_signatures(&self) -> usize {
        self.tables.iter().map(|t| t.signatures).sum()
    }

    pub fn total_observations(&self) -> usize {
        self.tables.iter().map(|t| t.observations).sum()
    }

    /// Allow-listed tables that contributed nothing.
    pub fn empty_tables(&self) -> Vec<u32> {
        self.tables
            .iter()
            .filter(|t| t.signatures == 0)
            .map(|t| t.id)
            .collect()
    }
}
