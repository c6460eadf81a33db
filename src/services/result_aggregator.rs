use crate::errors::{VulnhoundError, VulnhoundResult};
use crate::structs::analyzed_vulnerability::AnalyzedVulnerability;
use crate::structs::extraction::Extraction;
use crate::structs::report_statistics::ReportStatistics;
use crate::structs::verdict::Verdict;

/// Joins extractions with their verdicts and derives the report
/// statistics in one place.
pub struct ResultAggregator;

impl ResultAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Extractions and verdicts must line up one-to-one; a mismatch means
    /// an upstream bug, not something to paper over.
    pub fn aggregate(
        &self,
        extractions: Vec<Extraction>,
        verdicts: Vec<Verdict>,
        files_scanned: usize,
    ) -> VulnhoundResult<(Vec<AnalyzedVulnerability>, ReportStatistics)> {
        if extractions.len() != verdicts.len() {
            return Err(VulnhoundError::analysis_error(
                "aggregation",
                &format!(
                    "verdict count {} does not match finding count {}",
                    verdicts.len(),
                    extractions.len()
                ),
            ));
        }

        let analyzed: Vec<AnalyzedVulnerability> = extractions
            .into_iter()
            .zip(verdicts)
            .map(|(extraction, verdict)| AnalyzedVulnerability {
                finding: extraction.finding,
                context: extraction.context,
                verdict,
            })
            .collect();

        let statistics = ReportStatistics::compute(&analyzed, files_scanned);
        Ok((analyzed, statistics))
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::language::Language;
    use crate::enums::severity::Severity;
    use crate::structs::code_context::CodeContext;
    use crate::structs::finding::Finding;

    fn extraction(line: usize) -> Extraction {
        Extraction {
            finding: Finding {
                file_path: "app.php".to_string(),
                language: Language::Php,
                line_number: line,
                vulnerability_type: "XSS".to_string(),
                description: "Cross-site scripting".to_string(),
                matched_pattern: "echo\\s+\\$_GET".to_string(),
                raw_line: "echo $_GET['name'];".to_string(),
            },
            context: CodeContext {
                start_line: line,
                end_line: line,
                code: "echo $_GET['name'];".to_string(),
            },
        }
    }

    fn verdict(severity: Severity, is_false_positive: bool) -> Verdict {
        Verdict {
            severity,
            is_false_positive,
            analysis: "analysis".to_string(),
            recommendation: "recommendation".to_string(),
        }
    }

    #[test]
    fn pairs_verdicts_in_order_and_counts() {
        let extractions = vec![extraction(1), extraction(2), extraction(3)];
        let verdicts = vec![
            verdict(Severity::High, false),
            verdict(Severity::Low, true),
            verdict(Severity::Medium, false),
        ];

        let (analyzed, stats) = ResultAggregator::new()
            .aggregate(extractions, verdicts, 4)
            .unwrap();

        assert_eq!(analyzed.len(), 3);
        assert_eq!(analyzed[0].finding.line_number, 1);
        assert_eq!(analyzed[0].verdict.severity, Severity::High);
        assert_eq!(stats.files_scanned, 4);
        assert_eq!(stats.vulnerabilities_analyzed, 3);
        assert_eq!(stats.total_vulnerabilities, 2);
        assert_eq!(stats.high_severity, 1);
        assert_eq!(stats.medium_severity, 1);
        assert_eq!(stats.low_severity, 0);
        assert_eq!(stats.false_positives, 1);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let result =
            ResultAggregator::new().aggregate(vec![extraction(1)], Vec::new(), 1);
        assert!(result.is_err());
    }
}
