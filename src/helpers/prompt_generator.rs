use crate::prompts::analysis_prompt::{RESPONSE_FORMAT, SYSTEM_ROLE};
use crate::structs::extraction::Extraction;

const OMISSION_MARKER: &str = "[Additional vulnerabilities omitted due to token limit]";

/// Builds the batched analysis prompt: one numbered block per finding,
/// the shared instructions, and the response contract the parser expects.
/// Blocks that would push the prompt past the token budget are dropped
/// and replaced by a single omission marker.
pub fn batch_analysis_prompt(extractions: &[Extraction], max_tokens: usize) -> String {
    let header = format!(
        "{}\n\nYou will be shown {} potential vulnerabilities found by pattern matching. \
         For each one, determine whether it is a real vulnerability or a false positive.\n",
        SYSTEM_ROLE,
        extractions.len()
    );

    let footer = format!("\n{}", RESPONSE_FORMAT);
    let reserved = estimate_tokens(&header) + estimate_tokens(&footer);

    let mut body = String::new();
    let mut used = reserved;
    let mut omitted = false;

    for (index, extraction) in extractions.iter().enumerate() {
        let block = vulnerability_block(index + 1, extraction);
        let block_tokens = estimate_tokens(&block);

        if used + block_tokens > max_tokens && !body.is_empty() {
            omitted = true;
            break;
        }

        used += block_tokens;
        body.push_str(&block);
    }

    if omitted {
        body.push_str(OMISSION_MARKER);
        body.push('\n');
    }

    format!("{}\n{}{}", header, body, footer)
}

fn vulnerability_block(number: usize, extraction: &Extraction) -> String {
    let finding = &extraction.finding;
    let context = &extraction.context;

    format!(
        "VULNERABILITY {}:\nType: {}\nDescription: {}\nFile: {}\nLine: {}\nPattern matched: {}\n\nCode context (lines {}-{}):\n```{}\n{}\n```\n\n",
        number,
        finding.vulnerability_type,
        finding.description,
        finding.file_path,
        finding.line_number,
        finding.matched_pattern,
        context.start_line,
        context.end_line,
        finding.language.as_str(),
        context.code
    )
}

/// Rough token estimate at four characters per token. Good enough for
/// budgeting; providers enforce the real limit.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}
