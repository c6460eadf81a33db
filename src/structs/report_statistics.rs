use crate::enums::severity::Severity;
use crate::structs::analyzed_vulnerability::AnalyzedVulnerability;

/// Derived counts over the final analyzed set. Always recomputed in a
/// single pass, never mutated independently.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ReportStatistics {
    pub files_scanned: usize,
    pub vulnerabilities_analyzed: usize,
    /// Confirmed (non false positive) findings.
    pub total_vulnerabilities: usize,
    pub high_severity: usize,
    pub medium_severity: usize,
    pub low_severity: usize,
    pub false_positives: usize,
}

impl ReportStatistics {
    pub fn compute(analyzed: &[AnalyzedVulnerability], files_scanned: usize) -> Self {
        let mut stats = Self {
            files_scanned,
            vulnerabilities_analyzed: analyzed.len(),
            ..Self::default()
        };

        for vulnerability in analyzed {
            if vulnerability.verdict.is_false_positive {
                stats.false_positives += 1;
                continue;
            }

            stats.total_vulnerabilities += 1;
            match vulnerability.verdict.severity {
                Severity::High => stats.high_severity += 1,
                Severity::Medium => stats.medium_severity += 1,
                Severity::Low => stats.low_severity += 1,
            }
        }

        stats
    }
}
