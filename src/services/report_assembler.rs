use chrono::Local;

use crate::structs::analyzed_vulnerability::AnalyzedVulnerability;
use crate::structs::report_statistics::ReportStatistics;

const TEMPLATE: &str = include_str!("../../templates/report_template_en.md");

const FINDINGS_LOOP_START: &str = "{for each vulnerability}";
const FALSE_POSITIVES_LOOP_START: &str = "{for each false_positive}";
const LOOP_END: &str = "{end for}";

/// Renders the Markdown report from the English template. Conditional
/// regions and the per-finding loops are expanded by plain string
/// substitution; the template is baked into the binary so the report
/// cannot go missing at runtime.
pub struct ReportAssembler;

impl ReportAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(
        &self,
        target: &str,
        languages: &[String],
        analyzed: &[AnalyzedVulnerability],
        statistics: &ReportStatistics,
    ) -> String {
        let mut report = TEMPLATE.to_string();

        report = report.replace("{target}", target);
        report = report.replace("{scan_date}", &Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        report = report.replace(
            "{languages}",
            &if languages.is_empty() {
                "all supported".to_string()
            } else {
                languages.join(", ")
            },
        );
        report = report.replace("{files_scanned}", &statistics.files_scanned.to_string());
        report = report.replace(
            "{vulnerabilities_analyzed}",
            &statistics.vulnerabilities_analyzed.to_string(),
        );
        report = report.replace(
            "{total_vulnerabilities}",
            &statistics.total_vulnerabilities.to_string(),
        );
        report = report.replace("{high_severity}", &statistics.high_severity.to_string());
        report = report.replace("{medium_severity}", &statistics.medium_severity.to_string());
        report = report.replace("{low_severity}", &statistics.low_severity.to_string());
        report = report.replace("{false_positives}", &statistics.false_positives.to_string());

        report = apply_conditional(&report, "high_severity", statistics.high_severity > 0);
        report = apply_conditional(
            &report,
            "no_vulnerabilities",
            statistics.total_vulnerabilities == 0,
        );
        report = apply_conditional(&report, "false_positives", statistics.false_positives > 0);

        let confirmed: Vec<(usize, &AnalyzedVulnerability)> = analyzed
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.verdict.is_false_positive)
            .collect();
        let false_positives: Vec<(usize, &AnalyzedVulnerability)> = analyzed
            .iter()
            .enumerate()
            .filter(|(_, item)| item.verdict.is_false_positive)
            .collect();

        report = expand_loop(&report, FINDINGS_LOOP_START, &confirmed, render_finding);
        report = expand_loop(
            &report,
            FALSE_POSITIVES_LOOP_START,
            &false_positives,
            render_false_positive,
        );

        report
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps or drops a `{if_name}...{end_if_name}` region. The markers are
/// stripped either way.
fn apply_conditional(report: &str, name: &str, keep: bool) -> String {
    let start_marker = format!("{{if_{}}}", name);
    let end_marker = format!("{{end_if_{}}}", name);

    let (Some(start), Some(end)) = (report.find(&start_marker), report.find(&end_marker)) else {
        return report.to_string();
    };
    if end < start {
        return report.to_string();
    }

    let mut result = String::with_capacity(report.len());
    result.push_str(&report[..start]);
    if keep {
        let inner = &report[start + start_marker.len()..end];
        result.push_str(inner.trim_matches('\n'));
        result.push('\n');
    }
    let mut rest = &report[end + end_marker.len()..];
    if !keep {
        rest = rest.strip_prefix('\n').unwrap_or(rest);
    }
    result.push_str(rest);
    result
}

fn expand_loop(
    report: &str,
    start_marker: &str,
    items: &[(usize, &AnalyzedVulnerability)],
    render: fn(&str, usize, &AnalyzedVulnerability) -> String,
) -> String {
    let Some(start) = report.find(start_marker) else {
        return report.to_string();
    };
    let body_start = start + start_marker.len();
    let Some(end_offset) = report[body_start..].find(LOOP_END) else {
        return report.to_string();
    };
    let body = report[body_start..body_start + end_offset].trim_matches('\n');

    let rendered = if items.is_empty() {
        "None.\n".to_string()
    } else {
        items
            .iter()
            .map(|(index, item)| render(body, *index, item))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut result = String::with_capacity(report.len() + rendered.len());
    result.push_str(&report[..start]);
    result.push_str(&rendered);
    result.push_str(&report[body_start + end_offset + LOOP_END.len()..]);
    result
}

fn fill_common(body: &str, index: usize, item: &AnalyzedVulnerability) -> String {
    body.replace("{vulnerability_id}", &format!("VULN-{:03}", index + 1))
        .replace(
            "{vulnerability_type}",
            &title_case(&item.finding.vulnerability_type),
        )
        .replace("{file_path}", &item.finding.file_path)
        .replace("{line_number}", &item.finding.line_number.to_string())
        .replace("{analysis}", &item.verdict.analysis)
}

fn render_finding(body: &str, index: usize, item: &AnalyzedVulnerability) -> String {
    let mut block = fill_common(body, index, item);
    block = block
        .replace("{severity}", &title_case(&item.verdict.severity.to_string()))
        .replace("{matched_pattern}", &item.finding.matched_pattern)
        .replace("{language}", item.finding.language.as_str())
        .replace("{code_context}", &item.context.code)
        .replace("{recommendation}", &item.verdict.recommendation);
    block.push('\n');
    block
}

fn render_false_positive(body: &str, index: usize, item: &AnalyzedVulnerability) -> String {
    let mut block = fill_common(body, index, item);
    block.push('\n');
    block
}

/// `SQL_INJECTION` becomes `Sql Injection`.
fn title_case(value: &str) -> String {
    value
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::language::Language;
    use crate::enums::severity::Severity;
    use crate::structs::code_context::CodeContext;
    use crate::structs::finding::Finding;
    use crate::structs::verdict::Verdict;

    fn analyzed(severity: Severity, is_false_positive: bool) -> AnalyzedVulnerability {
        AnalyzedVulnerability {
            finding: Finding {
                file_path: "src/login.php".to_string(),
                language: Language::Php,
                line_number: 42,
                vulnerability_type: "SQL_INJECTION".to_string(),
                description: "SQL injection vulnerabilities".to_string(),
                matched_pattern: "mysql_query\\s*\\(".to_string(),
                raw_line: "mysql_query($sql);".to_string(),
            },
            context: CodeContext {
                start_line: 40,
                end_line: 44,
                code: "mysql_query($sql);".to_string(),
            },
            verdict: Verdict {
                severity,
                is_false_positive,
                analysis: "Unsanitized input reaches the query.".to_string(),
                recommendation: "Use prepared statements.".to_string(),
            },
        }
    }

    #[test]
    fn renders_confirmed_findings_with_ids() {
        let items = vec![analyzed(Severity::High, false), analyzed(Severity::Low, true)];
        let stats = ReportStatistics::compute(&items, 3);
        let report = ReportAssembler::new().assemble("src", &["php".to_string()], &items, &stats);

        assert!(report.contains("**Target:** src"));
        assert!(report.contains("VULN-001: Sql Injection"));
        assert!(report.contains("**Severity:** High"));
        assert!(report.contains("high severity vulnerabilities were found"));
        assert!(report.contains("VULN-002"));
        assert!(!report.contains("{for each"));
        assert!(!report.contains("{if_"));
        assert!(!report.contains("{end"));
    }

    #[test]
    fn empty_scan_drops_warning_and_notes_no_findings() {
        let items: Vec<AnalyzedVulnerability> = Vec::new();
        let stats = ReportStatistics::compute(&items, 5);
        let report = ReportAssembler::new().assemble("src", &[], &items, &stats);

        assert!(!report.contains("high severity vulnerabilities were found"));
        assert!(report.contains("No confirmed vulnerabilities were found"));
        assert!(report.contains("None."));
        assert!(report.contains("all supported"));
        assert!(!report.contains("## False Positives"));
    }

    #[test]
    fn false_positive_section_only_appears_when_counted() {
        let items = vec![analyzed(Severity::High, false)];
        let stats = ReportStatistics::compute(&items, 1);
        let report = ReportAssembler::new().assemble("src", &[], &items, &stats);

        assert_eq!(stats.false_positives, 0);
        assert!(!report.contains("## False Positives"));
        assert!(!report.contains("{if_false_positives}"));

        let items = vec![analyzed(Severity::High, false), analyzed(Severity::Low, true)];
        let stats = ReportStatistics::compute(&items, 1);
        let report = ReportAssembler::new().assemble("src", &[], &items, &stats);

        assert!(report.contains("## False Positives"));
        assert!(report.contains("VULN-002"));
        assert!(!report.contains("{end_if_false_positives}"));
    }

    #[test]
    fn false_positive_ids_share_the_numbering() {
        let items = vec![analyzed(Severity::Low, true)];
        let stats = ReportStatistics::compute(&items, 1);
        let report = ReportAssembler::new().assemble("src", &[], &items, &stats);

        assert!(report.contains("VULN-001: Sql Injection"));
    }
}
