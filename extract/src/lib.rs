//! Builtin function extraction from specification documents.
//!
//! This crate turns an HTML rendering of a language specification into a
//! [`BuiltinTable`] of function names and accepted argument counts. The
//! pipeline has three stages:
//!
//! 1. [`scanner`]: keeps the raw markup of allow-listed `<table>`s.
//! 2. [`signature`]: finds `<strong>name</strong>(args)` signatures in
//!    each table and expands the reduction operator placeholder.
//! 3. [`ArityMerger`]: folds the observations into arity ranges.
//!
//! # Example
//!
//! ```
//! use spec_builtins_core::{ArityRange, ExtractionConfig};
//! use spec_builtins_extract::BuiltinExtractor;
//!
//! let doc = "\
//! <table class=\"tableblock\">
//! <caption class=\"title\">Table 9. Work-Item Functions</caption>
//! <tr><td><strong>foo</strong>(x)</td></tr>
//! <tr><td><strong>foo</strong>(x, y)</td></tr>
//! </table>
//! ";
//!
//! let run = BuiltinExtractor::new(ExtractionConfig::default()).extract_str(doc);
//! assert_eq!(run.table.get("foo"), Some(ArityRange { min: 1, max: 2 }));
//! assert_eq!(run.report.scan.tables_committed, 1);
//! ```
//!
//! [`ArityMerger`]: spec_builtins_core::ArityMerger

pub mod output;
pub mod report;
pub mod scanner;
pub mod signature;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use spec_builtins_core::{ArityMerger, BuiltinTable, ExtractionConfig, MergeOutcome, Result};
use tracing::{debug, info};

use report::{ExtractionReport, TableReport};
use scanner::{ExtractedTables, ScanStats, TableScanner};

/// Default location of the specification document.
pub const DEFAULT_INPUT: &str = "OpenCL_C.html";

/// Result of one extraction.
#[derive(Debug, Clone)]
pub struct ExtractionRun {
    pub table: BuiltinTable,
    pub report: ExtractionReport,
}

/// Runs the scan, extract and merge pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct BuiltinExtractor {
    config: ExtractionConfig,
}

impl BuiltinExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts builtins from a document held in memory.
    pub fn extract_str(&self, document: &str) -> ExtractionRun {
        let mut scanner = TableScanner::new(&self.config.tables);
        for line in document.lines() {
            scanner.feed_line(line);
        }
        let (tables, stats) = scanner.finish();
        self.merge_tables(&tables, stats)
    }

    /// Extracts builtins from a line-oriented reader.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](spec_builtins_core::BuiltinError::Io) if a line cannot
    /// be read, including when it is not valid UTF-8.
    pub fn extract_reader<R: BufRead>(&self, reader: R) -> Result<ExtractionRun> {
        let mut scanner = TableScanner::new(&self.config.tables);
        for line in reader.lines() {
            scanner.feed_line(&line?);
        }
        let (tables, stats) = scanner.finish();
        Ok(self.merge_tables(&tables, stats))
    }

    /// Extracts builtins from the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](spec_builtins_core::BuiltinError::Io) if the file is
    /// missing or unreadable.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<ExtractionRun> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading specification document");
        let file = File::open(path)?;
        self.extract_reader(BufReader::new(file))
    }

    fn merge_tables(&self, tables: &ExtractedTables, scan: ScanStats) -> ExtractionRun {
        let mut merger = ArityMerger::new(&self.config.skip_second_variant);
        let mut report = ExtractionReport {
            scan,
            ..ExtractionReport::default()
        };

        for table in tables {
            let found = signature::observations(&table.text, self.config.operators.as_slice());

            for obs in &found.observations {
                match merger.observe(&obs.name, obs.args) {
                    MergeOutcome::Inserted => report.inserted += 1,
                    MergeOutcome::Widened => report.widened += 1,
                    MergeOutcome::Unchanged => report.unchanged += 1,
                    MergeOutcome::Skipped => report.skipped += 1,
                }
            }

            debug!(
                id = table.id,
                signatures = found.signatures,
                observations = found.observations.len(),
                "Processed table"
            );
            report.tables.push(TableReport {
                id: table.id,
                signatures: found.signatures,
                observations: found.observations.len(),
            });
        }

        let table = merger.finish();
        report.builtins = table.len();
        info!(
            tables = report.tables.len(),
            signatures = report.total_signatures(),
            builtins = report.builtins,
            skipped = report.skipped,
            "Extracted builtin table"
        );

        ExtractionRun { table, report }
    }
}

/// Extracts builtins from `document` with the default configuration.
pub fn extract_builtins(document: &str) -> BuiltinTable {
    BuiltinExtractor::default().extract_str(document).table
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use spec_builtins_core::ArityRange;

    use super::*;

    fn table_doc(id: u32, body: &str) -> String {
        format!("<table>\n<caption>Table {id}. Functions</caption>\n{body}\n</table>\n")
    }

    #[test]
    fn test_widens_ordinary_names() {
        let doc = table_doc(9, "<strong>foo</strong>(x)\n<strong>foo</strong>(x, y)");
        let table = extract_builtins(&doc);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("foo"), Some(ArityRange { min: 1, max: 2 }));
    }

    #[test]
    fn test_override_keeps_first_observation() {
        let config = ExtractionConfig {
            skip_second_variant: BTreeSet::from(["foo".to_string()]),
            ..ExtractionConfig::default()
        };
        let doc = table_doc(9, "<strong>foo</strong>(x)\n<strong>foo</strong>(x, y)");
        let run = BuiltinExtractor::new(config).extract_str(&doc);
        assert_eq!(run.table.get("foo"), Some(ArityRange::exact(1)));
        assert_eq!(run.report.skipped, 1);
    }

    #[test]
    fn test_non_allow_listed_table_contributes_nothing() {
        let doc = table_doc(99, "<strong>foo</strong>(x)");
        let run = BuiltinExtractor::default().extract_str(&doc);
        assert!(run.table.is_empty());
        assert!(run.report.tables.is_empty());
        assert_eq!(run.report.scan.tables_ignored, 1);
    }

    #[test]
    fn test_empty_allow_listed_table_is_reported() {
        let doc = table_doc(10, "<td>no signatures here</td>");
        let run = BuiltinExtractor::default().extract_str(&doc);
        assert!(run.table.is_empty());
        assert_eq!(run.report.empty_tables(), [10]);
    }

    #[test]
    fn test_reader_matches_str() {
        let doc = table_doc(12, "<strong>sin</strong>(x) <strong>atan2</strong>(y, x)");
        let extractor = BuiltinExtractor::default();
        let from_reader = extractor.extract_reader(doc.as_bytes()).unwrap();
        let from_str = extractor.extract_str(&doc);
        assert_eq!(from_reader.table, from_str.table);
        assert_eq!(from_reader.report, from_str.report);
    }

    #[test]
    fn test_report_counts_match_observations() {
        let doc = table_doc(42, "<strong>scan_&lt;op&gt;</strong>(a) <strong>all</strong>(p)");
        let extractor = BuiltinExtractor::default();
        let run = extractor.extract_str(&doc);
        let expected = signature::observations(&doc, extractor.config().operators.as_slice());

        assert_eq!(run.report.tables[0].signatures, 2);
        assert_eq!(run.report.tables[0].signatures, expected.signatures);
        assert_eq!(run.report.tables[0].observations, expected.observations.len());

        let names: Vec<_> = run.table.iter().map(|e| e.name.as_str()).collect();
        let expected_names: Vec<_> =
            expected.observations.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, expected_names);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = BuiltinExtractor::default()
            .extract_file("/nonexistent/OpenCL_C.html")
            .unwrap_err();
        assert!(matches!(err, spec_builtins_core::BuiltinError::Io(_)));
    }
}
