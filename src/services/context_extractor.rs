use std::collections::HashMap;
use std::fs;

use crate::structs::code_context::CodeContext;
use crate::structs::extraction::Extraction;
use crate::structs::finding::Finding;

/// Pulls the surrounding lines for each finding so the analysis prompt
/// shows real code instead of a lone matched line.
pub struct ContextExtractor {
    context_lines: usize,
}

impl ContextExtractor {
    pub fn new(context_lines: usize) -> Self {
        Self { context_lines }
    }

    /// Every finding gets an extraction. When a file cannot be re-read
    /// the matched line itself stands in as the context.
    pub fn extract(&self, findings: &[Finding]) -> Vec<Extraction> {
        let mut file_cache: HashMap<String, Option<Vec<String>>> = HashMap::new();
        let mut extractions = Vec::with_capacity(findings.len());

        for finding in findings {
            let lines = file_cache
                .entry(finding.file_path.clone())
                .or_insert_with(|| read_lines(&finding.file_path));

            let context = match lines {
                Some(lines) if !lines.is_empty() => self.window(lines, finding.line_number),
                _ => CodeContext {
                    start_line: finding.line_number,
                    end_line: finding.line_number,
                    code: finding.raw_line.clone(),
                },
            };

            extractions.push(Extraction {
                finding: finding.clone(),
                context,
            });
        }

        extractions
    }

    fn window(&self, lines: &[String], line_number: usize) -> CodeContext {
        let index = line_number.saturating_sub(1).min(lines.len().saturating_sub(1));
        let start = index.saturating_sub(self.context_lines);
        let end = (index + self.context_lines).min(lines.len().saturating_sub(1));

        CodeContext {
            start_line: start + 1,
            end_line: end + 1,
            code: lines[start..=end].join("\n"),
        }
    }
}

fn read_lines(path: &str) -> Option<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content.lines().map(|line| line.to_string()).collect()),
        Err(e) => {
            log::warn!("Cannot re-read {} for context: {}", path, e);
            None
        }
    }
}
