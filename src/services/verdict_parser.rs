use crate::enums::severity::Severity;
use crate::structs::verdict::Verdict;

const ANALYSIS_MARKER: &str = "ANALYSIS FOR VULNERABILITY";
const ASSESSMENT_HEADER: &str = "## Assessment";
const SEVERITY_HEADER: &str = "## Severity";
const ANALYSIS_HEADER: &str = "## Analysis";
const RECOMMENDATION_HEADER: &str = "## Recommendation";

/// Parses model responses back into verdicts. The parser is deliberately
/// forgiving: a response that drops a block or mangles a section still
/// yields one verdict per expected finding, defaulting the gaps instead
/// of failing the batch.
pub struct VerdictParser;

impl VerdictParser {
    pub fn new() -> Self {
        Self
    }

    /// Always returns exactly `expected` verdicts, in finding order.
    pub fn parse_batch(&self, response: &str, expected: usize) -> Vec<Verdict> {
        let blocks = split_blocks(response, expected);

        (1..=expected)
            .map(|number| match blocks.get(&number) {
                Some(block) => self.parse_block(block),
                None => {
                    log::warn!("Response missing analysis block for vulnerability {}", number);
                    Verdict::fallback("The model response did not include an analysis for this finding.")
                }
            })
            .collect()
    }

    fn parse_block(&self, block: &str) -> Verdict {
        let assessment = section_text(block, ASSESSMENT_HEADER);
        let severity_text = section_text(block, SEVERITY_HEADER);
        let analysis = section_text(block, ANALYSIS_HEADER);
        let recommendation = section_text(block, RECOMMENDATION_HEADER);

        let is_false_positive = assessment
            .as_deref()
            .map(|text| text.to_lowercase().contains("false positive"))
            .unwrap_or(false);

        let severity = severity_text
            .as_deref()
            .and_then(parse_severity)
            .unwrap_or(Severity::Low);

        Verdict {
            severity,
            is_false_positive,
            analysis: analysis
                .unwrap_or_else(|| "No detailed analysis was provided.".to_string()),
            recommendation: recommendation
                .unwrap_or_else(|| "Review this finding manually.".to_string()),
        }
    }
}

impl Default for VerdictParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits the response on `ANALYSIS FOR VULNERABILITY n` markers, keyed by
/// the number the model wrote. Duplicate numbers keep the first block.
fn split_blocks(response: &str, expected: usize) -> std::collections::HashMap<usize, String> {
    let mut blocks = std::collections::HashMap::new();
    let mut current_number: Option<usize> = None;
    let mut current_lines: Vec<&str> = Vec::new();

    for line in response.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix(ANALYSIS_MARKER) {
            if let Some(number) = marker_number(rest) {
                if let Some(previous) = current_number.take() {
                    blocks.entry(previous).or_insert_with(|| current_lines.join("\n"));
                }
                current_lines = Vec::new();
                current_number = (number >= 1 && number <= expected).then_some(number);
                continue;
            }
        }

        if current_number.is_some() {
            current_lines.push(line);
        }
    }

    if let Some(number) = current_number {
        blocks.entry(number).or_insert_with(|| current_lines.join("\n"));
    }

    blocks
}

fn marker_number(rest: &str) -> Option<usize> {
    let digits: String = rest
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Returns the trimmed text between a `##` header and the next one.
fn section_text(block: &str, header: &str) -> Option<String> {
    let mut collecting = false;
    let mut lines: Vec<&str> = Vec::new();

    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case(header) {
            collecting = true;
            continue;
        }
        if collecting && trimmed.starts_with("## ") {
            break;
        }
        if collecting {
            lines.push(line);
        }
    }

    if !collecting {
        return None;
    }

    let text = lines.join("\n").trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Severity lines often arrive bracketed or embedded in a sentence, so
/// look for the keyword rather than demanding an exact token.
fn parse_severity(text: &str) -> Option<Severity> {
    let lowered = text.to_lowercase();
    if lowered.contains("high") {
        Some(Severity::High)
    } else if lowered.contains("medium") {
        Some(Severity::Medium)
    } else if lowered.contains("low") {
        Some(Severity::Low)
    } else {
        Severity::parse(text.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "ANALYSIS FOR VULNERABILITY 1:\n\
## Assessment\nVulnerable\n\n\
## Severity\nHigh\n\n\
## Analysis\nUser input reaches the query without escaping.\n\n\
## Recommendation\nUse prepared statements.\n\n\
ANALYSIS FOR VULNERABILITY 2:\n\
## Assessment\nFalse Positive\n\n\
## Severity\nLow\n\n\
## Analysis\nThe value is a constant.\n\n\
## Recommendation\nNo action needed.\n";

    #[test]
    fn parses_each_block_in_order() {
        let verdicts = VerdictParser::new().parse_batch(WELL_FORMED, 2);

        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].severity, Severity::High);
        assert!(!verdicts[0].is_false_positive);
        assert!(verdicts[0].analysis.contains("without escaping"));
        assert!(verdicts[1].is_false_positive);
    }

    #[test]
    fn missing_block_falls_back_without_shifting_others() {
        let response = "ANALYSIS FOR VULNERABILITY 2:\n## Assessment\nVulnerable\n\n## Severity\nMedium\n\n## Analysis\nReal issue.\n\n## Recommendation\nFix it.\n";
        let verdicts = VerdictParser::new().parse_batch(response, 3);

        assert_eq!(verdicts.len(), 3);
        assert_eq!(verdicts[0].severity, Severity::Low);
        assert!(!verdicts[0].is_false_positive);
        assert_eq!(verdicts[1].severity, Severity::Medium);
        assert_eq!(verdicts[2].severity, Severity::Low);
    }

    #[test]
    fn garbage_severity_defaults_to_low() {
        let response = "ANALYSIS FOR VULNERABILITY 1:\n## Assessment\nVulnerable\n\n## Severity\nCatastrophic\n\n## Analysis\nBad.\n\n## Recommendation\nFix.\n";
        let verdicts = VerdictParser::new().parse_batch(response, 1);

        assert_eq!(verdicts[0].severity, Severity::Low);
        assert!(!verdicts[0].is_false_positive);
    }

    #[test]
    fn bracketed_severity_is_recognized() {
        let response = "ANALYSIS FOR VULNERABILITY 1:\n## Assessment\n[Vulnerable]\n\n## Severity\n[High]\n\n## Analysis\nInjection.\n\n## Recommendation\nParameterize.\n";
        let verdicts = VerdictParser::new().parse_batch(response, 1);

        assert_eq!(verdicts[0].severity, Severity::High);
    }

    #[test]
    fn unparseable_response_yields_all_fallbacks() {
        let verdicts = VerdictParser::new().parse_batch("I cannot help with that.", 2);

        assert_eq!(verdicts.len(), 2);
        for verdict in &verdicts {
            assert_eq!(verdict.severity, Severity::Low);
            assert!(!verdict.is_false_positive);
        }
    }
}
