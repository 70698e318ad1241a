//! Reinterpret-cast builtins.
//!
//! `as_<type><width>` is defined for every scalar type and vector width and
//! always takes one argument, so the listing is generated rather than
//! extracted.

use crate::{ArityRange, BuiltinTable};

/// Scalar type names, in output order.
pub const SCALAR_TYPES: &[&str] = &[
    "char", "uchar", "short", "ushort", "int", "uint", "long", "ulong", "float", "double",
];

/// Vector widths; the empty string is the scalar form.
pub const VECTOR_WIDTHS: &[&str] = &["", "2", "3", "4", "8", "16"];

/// Builds the `as_*` table, types outermost.
///
/// # Examples
///
/// ```
/// use spec_builtins_core::reinterpret_builtins;
///
/// let table = reinterpret_builtins();
/// assert_eq!(table.len(), 60);
/// assert_eq!(table.entries()[0].name, "as_char");
/// assert_eq!(table.entries()[1].name, "as_char2");
/// ```
pub fn reinterpret_builtins() -> BuiltinTable {
    let mut table = BuiltinTable::new();
    for ty in SCALAR_TYPES {
        for width in VECTOR_WIDTHS {
            table.insert(format!("as_{ty}{width}"), ArityRange::exact(1));
        }
    }
    table
}
