//! Builtin table type definitions.
//!
//! A [`BuiltinTable`] maps each function name to the inclusive range of
//! argument counts seen for it. Iteration follows first-seen insertion
//! order, which is the order the downstream code generator expects.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Inclusive range of accepted argument counts.
///
/// # Examples
///
/// ```
/// use spec_builtins_core::ArityRange;
///
/// let mut arity = ArityRange::exact(2);
/// assert!(arity.widen(1));
/// assert_eq!((arity.min, arity.max), (1, 2));
/// assert!(!arity.widen(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArityRange {
    /// Smallest observed argument count.
    pub min: usize,
    /// Largest observed argument count.
    pub max: usize,
}

impl ArityRange {
    /// Creates a range holding exactly one argument count.
    pub fn exact(count: usize) -> Self {
        Self {
            min: count,
            max: count,
        }
    }

    /// Widens the range to include `count`. Returns `true` if a bound moved.
    pub fn widen(&mut self, count: usize) -> bool {
        let before = *self;
        self.min = self.min.min(count);
        self.max = self.max.max(count);
        *self != before
    }

    /// Returns `true` if `count` lies inside the range.
    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// One row of the builtin table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinEntry {
    /// Cleaned function name.
    pub name: String,
    /// Accepted argument counts.
    #[serde(flatten)]
    pub arity: ArityRange,
}

/// Function names with their arity ranges, in first-seen order.
///
/// Names are unique; inserting a name twice replaces its range in place
/// without moving it.
///
/// # Examples
///
/// ```
/// use spec_builtins_core::{ArityRange, BuiltinTable};
///
/// let mut table = BuiltinTable::new();
/// table.insert("sin", ArityRange::exact(1));
/// table.insert("atan2", ArityRange::exact(2));
/// table.insert("sin", ArityRange::exact(1));
///
/// let names: Vec<_> = table.iter().map(|e| e.name.as_str()).collect();
/// assert_eq!(names, ["sin", "atan2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltinTable {
    entries: Vec<BuiltinEntry>,
    index: HashMap<String, usize>,
}

impl BuiltinTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the range for `name`.
    ///
    /// Returns the previous range if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, arity: ArityRange) -> Option<ArityRange> {
        let name = name.into();
        if let Some(&pos) = self.index.get(&name) {
            let previous = self.entries[pos].arity;
            self.entries[pos].arity = arity;
            return Some(previous);
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(BuiltinEntry { name, arity });
        None
    }

    /// Returns the range for `name`, if present.
    pub fn get(&self, name: &str) -> Option<ArityRange> {
        self.index.get(name).map(|&pos| self.entries[pos].arity)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut ArityRange> {
        let pos = *self.index.get(name)?;
        Some(&mut self.entries[pos].arity)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[BuiltinEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BuiltinEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a BuiltinTable {
    type Item = &'a BuiltinEntry;
    type IntoIter = std::slice::Iter<'a, BuiltinEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<BuiltinEntry> for BuiltinTable {
    fn from_iter<I: IntoIterator<Item = BuiltinEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry.name, entry.arity);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_range() {
        let arity = ArityRange::exact(3);
        assert_eq!(arity.min, 3);
        assert_eq!(arity.max, 3);
        assert!(arity.contains(3));
        assert!(!arity.contains(2));
    }

    #[test]
    fn test_widen_moves_both_bounds() {
        let mut arity = ArityRange::exact(2);
        assert!(arity.widen(3));
        assert!(arity.widen(0));
        assert_eq!(arity, ArityRange { min: 0, max: 3 });
        assert!(!arity.widen(1));
    }

    #[test]
    fn test_insert_keeps_first_position() {
        let mut table = BuiltinTable::new();
        assert!(table.insert("b", ArityRange::exact(1)).is_none());
        table.insert("a", ArityRange::exact(2));
        let previous = table.insert("b", ArityRange::exact(4));

        assert_eq!(previous, Some(ArityRange::exact(1)));
        assert_eq!(table.len(), 2);
        let names: Vec<_> = table.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(table.get("b"), Some(ArityRange::exact(4)));
    }

    #[test]
    fn test_entry_serializes_flat() {
        let entry = BuiltinEntry {
            name: "clamp".into(),
            arity: ArityRange::exact(3),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "clamp");
        assert_eq!(json["min"], 3);
        assert_eq!(json["max"], 3);
    }

    #[test]
    fn test_from_iterator_deduplicates() {
        let table: BuiltinTable = [
            BuiltinEntry {
                name: "x".into(),
                arity: ArityRange::exact(1),
            },
            BuiltinEntry {
                name: "x".into(),
                arity: ArityRange::exact(2),
            },
        ]
        .into_iter()
        .collect();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("x"), Some(ArityRange::exact(2)));
    }
}
