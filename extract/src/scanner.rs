//! Table scanning for line-oriented HTML documents.
//!
//! [`TableScanner`] walks the document one line at a time and keeps the raw
//! markup of every `<table>` whose caption reads `Table <N>` with `N` on the
//! allow-list. Nothing is parsed beyond the begin/end tags and the caption.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

static PATTERNS: LazyLock<TablePatterns> = LazyLock::new(TablePatterns::new);

struct TablePatterns {
    table_begin: Regex,
    table_end: Regex,
    caption: Regex,
}

impl TablePatterns {
    fn new() -> Self {
        // All regexes here are compile-time constants. An expect() failure indicates
        // a programmer error in the pattern, not a runtime condition.
        Self {
            table_begin: Regex::new(r"<table[^>]*>").expect("static regex must compile"),
            table_end: Regex::new(r"</table>").expect("static regex must compile"),
            caption: Regex::new(r"<caption[^>]*>(?-u:\s)*Table(?-u:\s)*([0-9]+)")
                .expect("static regex must compile"),
        }
    }
}

/// Where the scanner is relative to the table markup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Outside any table.
    #[default]
    Inactive,
    /// Inside a table whose caption has not been seen yet.
    Unresolved { buffer: String },
    /// Inside a table with caption identifier `id`.
    Resolved { id: u32, buffer: String },
}

impl ScanState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ScanState::Inactive)
    }

    /// Caption identifier of the open table, once resolved.
    pub fn caption(&self) -> Option<u32> {
        match self {
            ScanState::Resolved { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Raw text accumulated for the open table.
    pub fn buffer(&self) -> Option<&str> {
        match self {
            ScanState::Inactive => None,
            ScanState::Unresolved { buffer } | ScanState::Resolved { buffer, .. } => Some(buffer),
        }
    }

    fn resolve(&mut self, id: u32) {
        let buffer = match self {
            ScanState::Inactive => return,
            ScanState::Unresolved { buffer } | ScanState::Resolved { buffer, .. } => {
                std::mem::take(buffer)
            }
        };
        *self = ScanState::Resolved { id, buffer };
    }

    fn push_line(&mut self, line: &str) {
        if let ScanState::Unresolved { buffer } | ScanState::Resolved { buffer, .. } = self {
            buffer.push_str(line);
            buffer.push('\n');
        }
    }
}

/// A committed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTable {
    /// Caption identifier.
    pub id: u32,
    /// Raw markup, one document line per line, begin and end tags included.
    pub text: String,
}

/// Allow-listed tables in commit order.
///
/// Committing an identifier a second time replaces the stored text but
/// keeps the identifier's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTables {
    tables: Vec<ExtractedTable>,
}

impl ExtractedTables {
    fn commit(&mut self, id: u32, text: String) {
        match self.tables.iter_mut().find(|t| t.id == id) {
            Some(existing) => existing.text = text,
            None => self.tables.push(ExtractedTable { id, text }),
        }
    }

    pub fn get(&self, id: u32) -> Option<&str> {
        self.tables
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.text.as_str())
    }

    pub fn ids(&self) -> Vec<u32> {
        self.tables.iter().map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedTable> {
        self.tables.iter()
    }
}

impl<'a> IntoIterator for &'a ExtractedTables {
    type Item = &'a ExtractedTable;
    type IntoIter = std::slice::Iter<'a, ExtractedTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

/// Counters collected while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Lines read.
    pub lines: usize,
    /// Table-begin markers seen.
    pub tables_seen: usize,
    /// Tables closed with an allow-listed caption.
    pub tables_committed: usize,
    /// Tables closed with no caption or a caption outside the allow-list.
    pub tables_ignored: usize,
    /// Tables dropped because another table began, or input ended, first.
    pub tables_unterminated: usize,
}

/// Line-driven table scanner.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use spec_builtins_extract::scanner::TableScanner;
///
/// let allow = BTreeSet::from([9]);
/// let mut scanner = TableScanner::new(&allow);
/// for line in [
///     "<table class=\"tableblock\">",
///     "<caption class=\"title\">Table 9. Work-item functions</caption>",
///     "<td><strong>get_work_dim</strong>()</td>",
///     "</table>",
/// ] {
///     scanner.feed_line(line);
/// }
///
/// let (tables, _) = scanner.finish();
/// assert_eq!(tables.ids(), [9]);
/// assert!(tables.get(9).unwrap().contains("get_work_dim"));
/// ```
#[derive(Debug)]
pub struct TableScanner<'a> {
    allow_list: &'a BTreeSet<u32>,
    state: ScanState,
    tables: ExtractedTables,
    stats: ScanStats,
}

impl<'a> TableScanner<'a> {
    /// Creates a scanner that keeps tables whose caption is in `allow_list`.
    pub fn new(allow_list: &'a BTreeSet<u32>) -> Self {
        Self {
            allow_list,
            state: ScanState::Inactive,
            tables: ExtractedTables::default(),
            stats: ScanStats::default(),
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Processes one line, given without its line terminator.
    pub fn feed_line(&mut self, line: &str) {
        self.stats.lines += 1;

        if PATTERNS.table_begin.is_match(line) {
            if self.state.is_open() {
                warn!(
                    line = self.stats.lines,
                    caption = ?self.state.caption(),
                    "Table began before previous table ended; discarding partial table"
                );
                self.stats.tables_unterminated += 1;
            }
            self.state = ScanState::Unresolved {
                buffer: String::new(),
            };
            self.stats.tables_seen += 1;
        }

        if self.state.is_open() {
            if let Some(id) = self.caption_id(line) {
                self.state.resolve(id);
            }
            self.state.push_line(line);
        }

        if PATTERNS.table_end.is_match(line) {
            self.close_table();
        }
    }

    /// Ends the scan, dropping any table still open.
    pub fn finish(mut self) -> (ExtractedTables, ScanStats) {
        if self.state.is_open() {
            warn!(
                caption = ?self.state.caption(),
                "Input ended inside a table; discarding partial table"
            );
            self.stats.tables_unterminated += 1;
        }
        self.state = ScanState::Inactive;
        (self.tables, self.stats)
    }

    fn caption_id(&self, line: &str) -> Option<u32> {
        let caps = PATTERNS.caption.captures(line)?;
        let digits = caps.get(1)?.as_str();
        match digits.parse::<u32>() {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(line = self.stats.lines, caption = digits, error = %e, "Unusable table caption");
                None
            }
        }
    }

    fn close_table(&mut self) {
        match std::mem::take(&mut self.state) {
            ScanState::Resolved { id, buffer } if self.allow_list.contains(&id) => {
                debug!(id, bytes = buffer.len(), "Committing table");
                self.tables.commit(id, buffer);
                self.stats.tables_committed += 1;
            }
            ScanState::Resolved { id, .. } => {
                debug!(id, "Skipping table outside allow-list");
                self.stats.tables_ignored += 1;
            }
            ScanState::Unresolved { .. } => {
                debug!(line = self.stats.lines, "Skipping table without caption");
                self.stats.tables_ignored += 1;
            }
            ScanState::Inactive => {}
        }
    }
}

/// Scans a whole document held in memory.
pub fn scan_tables(document: &str, allow_list: &BTreeSet<u32>) -> ExtractedTables {
    let mut scanner = TableScanner::new(allow_list);
    for line in document.lines() {
        scanner.feed_line(line);
    }
    scanner.finish().0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow(ids: &[u32]) -> BTreeSet<u32> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_begin_enters_unresolved() {
        let ids = allow(&[9]);
        let mut scanner = TableScanner::new(&ids);
        scanner.feed_line("<p>intro</p>");
        assert_eq!(scanner.state(), &ScanState::Inactive);

        scanner.feed_line("<table class=\"tableblock frame-all\">");
        assert!(matches!(scanner.state(), ScanState::Unresolved { .. }));
        assert_eq!(scanner.state().caption(), None);
    }

    #[test]
    fn test_caption_resolves_identifier() {
        let ids = allow(&[9]);
        let mut scanner = TableScanner::new(&ids);
        scanner.feed_line("<table>");
        scanner.feed_line("<caption class=\"title\">Table 12. Math functions</caption>");
        assert_eq!(scanner.state().caption(), Some(12));
        assert_eq!(
            scanner.state().buffer(),
            Some("<table>\n<caption class=\"title\">Table 12. Math functions</caption>\n")
        );
    }

    #[test]
    fn test_caption_outside_table_is_ignored() {
        let ids = allow(&[9]);
        let mut scanner = TableScanner::new(&ids);
        scanner.feed_line("<caption>Table 9</caption>");
        assert_eq!(scanner.state(), &ScanState::Inactive);
    }

    #[test]
    fn test_commit_only_allow_listed() {
        let doc = "\
<table>
<caption>Table 9. Kept</caption>
<td>a</td>
</table>
<table>
<caption>Table 99. Dropped</caption>
<td>b</td>
</table>
";
        let tables = scan_tables(doc, &allow(&[9]));
        assert_eq!(tables.ids(), [9]);
        let text = tables.get(9).unwrap();
        assert!(text.starts_with("<table>\n"));
        assert!(text.ends_with("</table>\n"));
        assert!(!text.contains("Dropped"));
    }

    #[test]
    fn test_table_without_caption_is_ignored() {
        let ids = allow(&[9]);
        let mut scanner = TableScanner::new(&ids);
        for line in ["<table>", "<td>x</td>", "</table>"] {
            scanner.feed_line(line);
        }
        assert_eq!(scanner.state(), &ScanState::Inactive);
        let (tables, stats) = scanner.finish();
        assert!(tables.is_empty());
        assert_eq!(stats.tables_ignored, 1);
    }

    #[test]
    fn test_new_begin_restarts_buffer() {
        let doc = "\
<table>
<caption>Table 9</caption>
<td>lost</td>
<table>
<caption>Table 10</caption>
<td>kept</td>
</table>
";
        let ids = allow(&[9, 10]);
        let mut scanner = TableScanner::new(&ids);
        for line in doc.lines() {
            scanner.feed_line(line);
        }
        let (tables, stats) = scanner.finish();
        assert_eq!(tables.ids(), [10]);
        assert!(!tables.get(10).unwrap().contains("lost"));
        assert_eq!(stats.tables_unterminated, 1);
        assert_eq!(stats.tables_seen, 2);
    }

    #[test]
    fn test_single_line_table() {
        let doc = "<table><caption>Table 9</caption><td>x</td></table>\n";
        let tables = scan_tables(doc, &allow(&[9]));
        assert_eq!(
            tables.get(9),
            Some("<table><caption>Table 9</caption><td>x</td></table>\n")
        );
    }

    #[test]
    fn test_later_caption_wins() {
        let doc = "\
<table>
<caption>Table 99</caption>
<caption>Table 9</caption>
</table>
";
        let tables = scan_tables(doc, &allow(&[9]));
        assert_eq!(tables.ids(), [9]);
    }

    #[test]
    fn test_non_breaking_space_in_caption_is_unresolved() {
        let doc = "<table>\n<caption>Table\u{a0}9</caption>\n</table>\n";
        assert!(scan_tables(doc, &allow(&[9])).is_empty());

        let doc = "<table>\n<caption class=\"title\">\tTable  9</caption>\n</table>\n";
        assert_eq!(scan_tables(doc, &allow(&[9])).ids(), [9]);
    }

    #[test]
    fn test_recommit_keeps_first_position() {
        let doc = "\
<table><caption>Table 10</caption>first</table>
<table><caption>Table 9</caption></table>
<table><caption>Table 10</caption>second</table>
";
        let tables = scan_tables(doc, &allow(&[9, 10]));
        assert_eq!(tables.ids(), [10, 9]);
        assert!(tables.get(10).unwrap().contains("second"));
    }

    #[test]
    fn test_unterminated_table_is_dropped() {
        let ids = allow(&[9]);
        let mut scanner = TableScanner::new(&ids);
        scanner.feed_line("<table>");
        scanner.feed_line("<caption>Table 9</caption>");
        let (tables, stats) = scanner.finish();
        assert!(tables.is_empty());
        assert_eq!(stats.tables_unterminated, 1);
    }

    #[test]
    fn test_oversized_caption_stays_unresolved() {
        let doc = "\
<table>
<caption>Table 99999999999</caption>
</table>
";
        let tables = scan_tables(doc, &allow(&[9]));
        assert!(tables.is_empty());
    }
}
