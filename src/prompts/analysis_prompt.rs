pub const SYSTEM_ROLE: &str =
    "You are a security expert analyzing potential vulnerabilities in source code.";

/// Response contract for batched analysis. The parser anchors on the
/// `ANALYSIS FOR VULNERABILITY` blocks and the `##` section headers, so this
/// text and the parser must stay in sync.
pub const RESPONSE_FORMAT: &str = r#"For each vulnerability, provide your analysis in the following format:

ANALYSIS FOR VULNERABILITY X:
## Assessment
[Vulnerable/False Positive]

## Severity
[High/Medium/Low]

## Analysis
[Detailed explanation of whether and why this is exploitable]

## Recommendation
[Specific remediation advice]

Replace X with the vulnerability number (1, 2, 3, etc.). Always include every section for every vulnerability, in the order given."#;
