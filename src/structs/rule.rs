use regex::Regex;

/// One detection rule: a vulnerability type with its ordered patterns.
/// Patterns are tried independently; any match counts. Immutable once the
/// store is loaded.
#[derive(Debug, Clone)]
pub struct Rule {
    pub vulnerability_type: String,
    pub description: String,
    pub patterns: Vec<Regex>,
}
