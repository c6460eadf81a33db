use crate::enums::severity::Severity;

/// The LLM judgment for one finding.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Verdict {
    pub severity: Severity,
    pub is_false_positive: bool,
    pub analysis: String,
    pub recommendation: String,
}

impl Verdict {
    /// Conservative placeholder used when the provider fails or its response
    /// cannot be parsed for a finding. Low severity, never a false positive,
    /// so nothing silently drops out of the report.
    pub fn fallback(reason: &str) -> Self {
        Self {
            severity: Severity::Low,
            is_false_positive: false,
            analysis: reason.to_string(),
            recommendation: "Review this finding manually.".to_string(),
        }
    }
}
