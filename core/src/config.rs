//! Extraction configuration.
//!
//! Controls which document tables are scanned for signatures, which names
//! keep their first-seen arity, and which operators replace the reduction
//! placeholder. Every field defaults to the settings for the OpenCL C
//! specification, so a YAML file only needs the keys it changes.
//!
//! # Example YAML
//!
//! ```yaml
//! tables: [9, 10, 42]
//! skip_second_variant:
//!   - fmax
//!   - fmin
//! operators: [add, min, max]
//! ```

use std::collections::BTreeSet;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BuiltinError, Result};

/// Caption numbers of the tables that list built-in functions.
pub const DEFAULT_TABLES: &[u32] = &[9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 22, 23, 25, 42];

/// Builtins whose second documented overload is a distinct form rather
/// than another arity, so their range is never widened.
pub const DEFAULT_SKIP_SECOND_VARIANT: &[&str] = &[
    "get_global_size",
    "get_global_id",
    "get_local_size",
    "get_enqueued_local_size",
    "get_local_id",
    "get_num_groups",
    "get_group_id",
    "get_global_offset",
    "fmax",
    "fmin",
    "isordered",
    "isunordered",
    "nextafter",
];

/// Substitutions for the reduction operator placeholder, in output order.
pub const DEFAULT_OPERATORS: &[&str] = &["add", "min", "max"];

fn default_tables() -> BTreeSet<u32> {
    DEFAULT_TABLES.iter().copied().collect()
}

fn default_skip_second_variant() -> BTreeSet<String> {
    DEFAULT_SKIP_SECOND_VARIANT
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_operators() -> Vec<String> {
    DEFAULT_OPERATORS.iter().map(|op| op.to_string()).collect()
}

/// Settings for one extraction run.
///
/// # Examples
///
/// ```
/// use spec_builtins_core::ExtractionConfig;
///
/// let config = ExtractionConfig::default();
/// assert!(config.is_extracted(9));
/// assert!(!config.is_extracted(21));
/// assert!(config.skips_second_variant("fmax"));
/// assert_eq!(config.operators, ["add", "min", "max"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Caption identifiers of tables to extract.
    #[serde(default = "default_tables")]
    pub tables: BTreeSet<u32>,
    /// Names exempt from arity widening.
    #[serde(default = "default_skip_second_variant")]
    pub skip_second_variant: BTreeSet<String>,
    /// Operators substituted for the placeholder token.
    #[serde(default = "default_operators")]
    pub operators: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            tables: default_tables(),
            skip_second_variant: default_skip_second_variant(),
            operators: default_operators(),
        }
    }
}

impl ExtractionConfig {
    /// Loads configuration from a YAML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](BuiltinError::Io) if the file cannot be read,
    /// [`Yaml`](BuiltinError::Yaml) if parsing fails, or
    /// [`InvalidConfig`](BuiltinError::InvalidConfig) if validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Renders the configuration as a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Returns `true` if the table with caption `id` should be extracted.
    pub fn is_extracted(&self, id: u32) -> bool {
        self.tables.contains(&id)
    }

    /// Returns `true` if later overloads of `name` are ignored.
    pub fn skips_second_variant(&self, name: &str) -> bool {
        self.skip_second_variant.contains(name)
    }

    /// Checks that the configuration can produce usable output.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](BuiltinError::InvalidConfig) when no tables
    /// are selected, no operators are given, or an operator or override name
    /// contains anything other than ASCII word characters.
    pub fn validate(&self) -> Result<()> {
        if self.tables.is_empty() {
            return Err(BuiltinError::InvalidConfig(
                "at least one table must be selected".to_string(),
            ));
        }
        if self.operators.is_empty() {
            return Err(BuiltinError::InvalidConfig(
                "operator list must not be empty".to_string(),
            ));
        }
        for op in &self.operators {
            if !is_word(op) {
                return Err(BuiltinError::InvalidConfig(format!(
                    "operator '{op}' must contain only ASCII letters, digits and underscores"
                )));
            }
        }
        for name in &self.skip_second_variant {
            if !is_word(name) {
                return Err(BuiltinError::InvalidConfig(format!(
                    "override name '{name}' must contain only ASCII letters, digits and underscores"
                )));
            }
        }
        Ok(())
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
