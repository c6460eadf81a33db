use crate::structs::finding::Finding;

/// Everything the scanner produced for one target: findings in discovery
/// order plus the non-fatal warnings recorded along the way.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub target_path: String,
    pub files_scanned: usize,
    pub findings: Vec<Finding>,
    pub warnings: Vec<String>,
}
