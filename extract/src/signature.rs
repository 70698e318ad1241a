//! Signature extraction from table markup.
//!
//! A signature is a `<strong>` name followed by a parenthesized argument
//! list, e.g. `<strong>clamp</strong>(gentype x, gentype minval, gentype maxval)`.
//! Names may contain single emphasized characters (`<strong>vload<em>n</em></strong>`)
//! and the reduction placeholder `&lt;op&gt;`. The argument list is never
//! parsed; arguments are counted by commas.

use std::sync::LazyLock;

use regex::Regex;

/// Escaped `<op>` token standing in for a family of reduction builtins.
pub const OP_PLACEHOLDER: &str = "&lt;op&gt;";

static PATTERNS: LazyLock<SignaturePatterns> = LazyLock::new(SignaturePatterns::new);

struct SignaturePatterns {
    signature: Regex,
    tag: Regex,
}

impl SignaturePatterns {
    fn new() -> Self {
        Self {
            // Word characters and whitespace are ASCII only.
            signature: Regex::new(
                r"<strong>((?:[0-9A-Za-z_]|<em>[0-9A-Za-z_]</em>|&lt;op&gt;)+)</strong>(?-u:\s)*\(([^)]*)\)",
            )
            .expect("static regex must compile"),
            tag: Regex::new(r"<[^>]*>").expect("static regex must compile"),
        }
    }
}

/// A raw name and argument list found in table markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<'a> {
    /// Name as written, markup included.
    pub raw_name: &'a str,
    /// Text between the parentheses.
    pub args: &'a str,
}

impl Signature<'_> {
    /// Name with inline markup removed.
    pub fn name(&self) -> String {
        clean_name(self.raw_name)
    }

    pub fn arg_count(&self) -> usize {
        count_arguments(self.args)
    }

    /// Concrete names this signature stands for.
    pub fn expanded_names<S: AsRef<str>>(&self, operators: &[S]) -> Vec<String> {
        expand_operators(&self.name(), operators)
    }
}

/// One `(name, argument count)` observation fed to the arity merger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub name: String,
    pub args: usize,
}

/// Finds every signature in `text`, in document order.
///
/// # Examples
///
/// ```
/// use spec_builtins_extract::signature::find_signatures;
///
/// let row = "<td><strong>fma</strong>(a, b, c)</td><td><strong>mad</strong> (a, b, c)</td>";
/// let sigs = find_signatures(row);
/// assert_eq!(sigs.len(), 2);
/// assert_eq!(sigs[1].raw_name, "mad");
/// assert_eq!(sigs[1].args, "a, b, c");
/// ```
pub fn find_signatures(text: &str) -> Vec<Signature<'_>> {
    PATTERNS
        .signature
        .captures_iter(text)
        .filter_map(|caps| {
            Some(Signature {
                raw_name: caps.get(1)?.as_str(),
                args: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

/// Strips every markup tag from `raw`.
///
/// The escaped placeholder contains no literal angle brackets and survives.
pub fn clean_name(raw: &str) -> String {
    PATTERNS.tag.replace_all(raw, "").into_owned()
}

/// Substitutes each operator for the placeholder, in order.
///
/// Names without the placeholder come back unchanged as the only element.
///
/// # Examples
///
/// ```
/// use spec_builtins_extract::signature::expand_operators;
///
/// let names = expand_operators("work_group_reduce_&lt;op&gt;", &["add", "min", "max"]);
/// assert_eq!(names, ["work_group_reduce_add", "work_group_reduce_min", "work_group_reduce_max"]);
/// assert_eq!(expand_operators("sin", &["add"]), ["sin"]);
/// ```
pub fn expand_operators<S: AsRef<str>>(name: &str, operators: &[S]) -> Vec<String> {
    if !name.contains(OP_PLACEHOLDER) {
        return vec![name.to_string()];
    }
    operators
        .iter()
        .map(|op| name.replace(OP_PLACEHOLDER, op.as_ref()))
        .collect()
}

/// Counts arguments as one more than the number of commas.
///
/// Blank argument lists count as zero. Commas inside nested constructs are
/// counted too.
pub fn count_arguments(args: &str) -> usize {
    if args.trim().is_empty() {
        return 0;
    }
    args.matches(',').count() + 1
}

/// Observations drawn from one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableObservations {
    /// Signatures matched before operator expansion.
    pub signatures: usize,
    pub observations: Vec<Observation>,
}

/// Flattens every signature in `text` into observations, expanding the
/// operator placeholder.
pub fn observations<S: AsRef<str>>(text: &str, operators: &[S]) -> TableObservations {
    let signatures = find_signatures(text);
    let observations = signatures
        .iter()
        .flat_map(|sig| {
            let args = sig.arg_count();
            sig.expanded_names(operators)
                .into_iter()
                .map(move |name| Observation { name, args })
        })
        .collect();
    TableObservations {
        signatures: signatures.len(),
        observations,
    }
}
