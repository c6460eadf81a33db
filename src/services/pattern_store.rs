use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::config::constants::framework_language;
use crate::enums::language::Language;
use crate::errors::{VulnhoundError, VulnhoundResult};
use crate::structs::rule::Rule;

const DESCRIPTION_FIELD: &str = "description:";
const PATTERNS_MARKER: &str = "patterns:";
const PATTERN_ITEM: &str = "- ";

/// One parsed pattern file: the rules that survived, plus the problems
/// found along the way (malformed blocks, invalid regexes).
pub struct ParsedPatternFile {
    pub rules: Vec<Rule>,
    pub issues: Vec<VulnhoundError>,
}

/// Indexed detection rules, loaded once at startup and read-only for the
/// rest of the process. Language rules and framework rules are kept apart
/// and merged on request.
#[derive(Default)]
pub struct PatternStore {
    language_rules: HashMap<Language, Vec<Rule>>,
    // Declaration order matters for finding determinism, so no map here.
    framework_rules: Vec<(String, Language, Vec<Rule>)>,
}

impl PatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn languages(&self) -> Vec<Language> {
        self.language_rules.keys().copied().collect()
    }

    pub fn load_language_file(&mut self, path: &Path, language: Language) -> VulnhoundResult<usize> {
        let parsed = Self::parse_file(path)?;
        for issue in &parsed.issues {
            log::warn!("{}", issue);
        }

        let loaded = parsed.rules.len();
        let entry = self.language_rules.entry(language).or_default();
        for rule in parsed.rules {
            merge_rule(entry, rule);
        }

        log::debug!("Loaded {} rules for {} from {}", loaded, language, path.display());
        Ok(loaded)
    }

    pub fn load_framework_file(
        &mut self,
        path: &Path,
        framework: &str,
        language: Language,
    ) -> VulnhoundResult<usize> {
        let parsed = Self::parse_file(path)?;
        for issue in &parsed.issues {
            log::warn!("{}", issue);
        }

        let loaded = parsed.rules.len();
        self.framework_rules
            .push((framework.to_string(), language, parsed.rules));

        log::debug!("Loaded {} rules for framework {} from {}", loaded, framework, path.display());
        Ok(loaded)
    }

    /// Loads every `.txt` pattern file in a directory. Language files are
    /// named after their language; framework files map to a language via
    /// the static framework table, unknown ones are skipped with a warning.
    pub fn load_directory(&mut self, directory: &Path, is_framework: bool) -> VulnhoundResult<usize> {
        let entries = fs::read_dir(directory).map_err(|e| {
            VulnhoundError::file_error(&directory.display().to_string(), "read directory", &e.to_string())
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().map(|ext| ext == "txt").unwrap_or(false))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let name = match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            if is_framework {
                match framework_language(&name).and_then(Language::from_identifier) {
                    Some(language) => loaded += self.load_framework_file(&path, &name, language)?,
                    None => log::warn!("Unknown language for framework pattern file: {}", name),
                }
            } else {
                match Language::from_identifier(&name) {
                    Some(language) => loaded += self.load_language_file(&path, language)?,
                    None => log::warn!("Unknown language pattern file: {}", name),
                }
            }
        }

        Ok(loaded)
    }

    /// Rules for a language, with the requested frameworks' rules merged
    /// in: patterns accumulate onto an existing vulnerability type without
    /// duplicating identical pattern strings, new types append in
    /// declaration order.
    pub fn rules_for(&self, language: Language, frameworks: &[String]) -> Vec<Rule> {
        let mut rules = self
            .language_rules
            .get(&language)
            .cloned()
            .unwrap_or_default();

        for requested in frameworks {
            for (framework, framework_language, framework_rules) in &self.framework_rules {
                if framework != requested || *framework_language != language {
                    continue;
                }
                for rule in framework_rules {
                    merge_rule(&mut rules, rule.clone());
                }
            }
        }

        rules
    }

    /// Parses the rule file format: `[VULN_TYPE]` section headers, a
    /// `description:` line, a `patterns:` marker, then `- regex` items.
    /// Blocks missing their description or with no usable pattern are
    /// reported and skipped; the rest of the file still loads.
    pub fn parse_file(path: &Path) -> VulnhoundResult<ParsedPatternFile> {
        let file_label = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| VulnhoundError::file_error(&file_label, "read", &e.to_string()))?;

        let mut rules = Vec::new();
        let mut issues = Vec::new();

        let mut current_section: Option<String> = None;
        let mut current_description: Option<String> = None;
        let mut current_patterns: Vec<String> = Vec::new();

        let mut close_section =
            |section: Option<String>,
             description: Option<String>,
             patterns: Vec<String>,
             rules: &mut Vec<Rule>,
             issues: &mut Vec<VulnhoundError>| {
                let section = match section {
                    Some(section) => section,
                    None => return,
                };

                let description = match description {
                    Some(description) => description,
                    None => {
                        issues.push(VulnhoundError::pattern_format_error(
                            &file_label,
                            &section,
                            "missing description",
                        ));
                        return;
                    }
                };

                if patterns.is_empty() {
                    issues.push(VulnhoundError::pattern_format_error(
                        &file_label,
                        &section,
                        "empty pattern list",
                    ));
                    return;
                }

                let mut compiled = Vec::new();
                for pattern in patterns {
                    match Regex::new(&pattern) {
                        Ok(regex) => compiled.push(regex),
                        Err(e) => issues.push(VulnhoundError::pattern_format_error(
                            &file_label,
                            &section,
                            &format!("invalid regex '{}': {}", pattern, e),
                        )),
                    }
                }

                if compiled.is_empty() {
                    issues.push(VulnhoundError::pattern_format_error(
                        &file_label,
                        &section,
                        "no valid patterns",
                    ));
                    return;
                }

                rules.push(Rule {
                    vulnerability_type: section,
                    description,
                    patterns: compiled,
                });
            };

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                close_section(
                    current_section.take(),
                    current_description.take(),
                    std::mem::take(&mut current_patterns),
                    &mut rules,
                    &mut issues,
                );
                current_section = Some(line[1..line.len() - 1].to_string());
                continue;
            }

            if let Some(description) = line.strip_prefix(DESCRIPTION_FIELD) {
                current_description = Some(description.trim().to_string());
                continue;
            }

            if line == PATTERNS_MARKER {
                continue;
            }

            if let Some(pattern) = line.strip_prefix(PATTERN_ITEM) {
                current_patterns.push(pattern.trim().to_string());
            }
        }

        close_section(
            current_section,
            current_description,
            current_patterns,
            &mut rules,
            &mut issues,
        );

        Ok(ParsedPatternFile { rules, issues })
    }
}

/// Merge one rule into an ordered rule list: same vulnerability type
/// accumulates new pattern strings, new types append at the end.
fn merge_rule(rules: &mut Vec<Rule>, rule: Rule) {
    if let Some(existing) = rules
        .iter_mut()
        .find(|r| r.vulnerability_type == rule.vulnerability_type)
    {
        for pattern in rule.patterns {
            if !existing.patterns.iter().any(|p| p.as_str() == pattern.as_str()) {
                existing.patterns.push(pattern);
            }
        }
    } else {
        rules.push(rule);
    }
}
