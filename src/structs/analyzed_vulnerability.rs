use crate::structs::code_context::CodeContext;
use crate::structs::finding::Finding;
use crate::structs::verdict::Verdict;

/// A finding together with its LLM verdict, the unit reporting consumes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AnalyzedVulnerability {
    pub finding: Finding,
    pub context: CodeContext,
    pub verdict: Verdict,
}
