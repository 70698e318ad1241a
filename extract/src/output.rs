//! Output formatting for builtin tables and reports.

use spec_builtins_core::{BuiltinTable, Result};

use crate::report::ExtractionReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// `X(name, min, max) \` lines for inclusion in a C macro list.
    #[default]
    Macro,
    Json,
    Yaml,
    /// Aligned plain-text columns.
    Table,
}

/// Formats a builtin table in the requested output format.
///
/// # Examples
///
/// ```
/// use spec_builtins_core::{ArityRange, BuiltinTable};
/// use spec_builtins_extract::output::{OutputFormat, format_builtins};
///
/// let mut table = BuiltinTable::new();
/// table.insert("foo", ArityRange { min: 1, max: 2 });
///
/// let out = format_builtins(&table, OutputFormat::Macro).unwrap();
/// assert_eq!(out, "X(foo, 1, 2) \\\n");
/// ```
pub fn format_builtins(table: &BuiltinTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Macro => Ok(table_to_macros(table)),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(table.entries())?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(table.entries())?),
        OutputFormat::Table => Ok(table_to_columns(table)),
    }
}

/// Formats an extraction report as pretty JSON.
pub fn format_report(report: &ExtractionReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn table_to_macros(table: &BuiltinTable) -> String {
    let mut out = String::new();
    for entry in table {
        out.push_str(&format!(
            "X({}, {}, {}) \\\n",
            entry.name, entry.arity.min, entry.arity.max
        ));
    }
    out
}

fn table_to_columns(table: &BuiltinTable) -> String {
    let width = table
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!("{:<width$}  {:>3}  {:>3}\n", "NAME", "MIN", "MAX");
    for entry in table {
        out.push_str(&format!(
            "{:<width$}  {:>3}  {:>3}\n",
            entry.name, entry.arity.min, entry.arity.max
        ));
    }
    out
}
