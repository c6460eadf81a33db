use crate::structs::code_context::CodeContext;
use crate::structs::finding::Finding;

/// A finding paired with its extracted context, the unit the analyzer
/// batches up for the LLM.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Extraction {
    pub finding: Finding,
    pub context: CodeContext,
}
