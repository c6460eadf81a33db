use crate::enums::language::Language;

/// One pattern match flagged as a candidate vulnerability. Two patterns of
/// the same type matching the same line produce two findings; the LLM
/// verdicts sort that out later, not the scanner.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Finding {
    pub file_path: String,
    pub language: Language,
    /// 1-based physical line number.
    pub line_number: usize,
    pub vulnerability_type: String,
    pub description: String,
    pub matched_pattern: String,
    pub raw_line: String,
}
