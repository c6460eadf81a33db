/// Fixed glossary the translator pins so security terminology stays
/// consistent across chunks and languages.
pub const SECURITY_GLOSSARY: &str = r#"- "vulnerability" — the standard security term for an exploitable weakness
- "false positive" — a flagged finding that is not actually exploitable
- "severity" — the High/Medium/Low risk classification; keep the English level names
- "SQL injection", "cross-site scripting (XSS)", "CSRF", "path traversal", "command injection" — keep the established local security terms; do not invent new ones
- Keep vulnerability type identifiers (e.g. SQL_INJECTION) exactly as written"#;

pub fn translation_prompt(text: &str, target_language: &str) -> String {
    format!(
        r#"You are a professional translator specializing in technical and security documentation.

# Translation Task
Translate the following text from English to {target_language}. Output only the translated text, nothing else.

# Terminology Glossary
{glossary}

# Guidelines
- Preserve all markdown formatting exactly as it appears
- Preserve all technical terms, file paths, and variable names
- Maintain the same tone and level of formality as the original

# Text to Translate
{text}"#,
        target_language = target_language,
        glossary = SECURITY_GLOSSARY,
        text = text,
    )
}
