use std::fs;
use std::path::Path;

use crate::enums::language::Language;
use crate::errors::{VulnhoundError, VulnhoundResult};
use crate::services::pattern_store::PatternStore;
use crate::structs::finding::Finding;
use crate::structs::scan_outcome::ScanOutcome;

/// Applies the loaded rules to a target tree. Read-only: unreadable or
/// undecodable files are recorded as warnings and skipped, never fatal.
pub struct FileScanner<'a> {
    store: &'a PatternStore,
    languages: Vec<Language>,
    frameworks: Vec<String>,
}

impl<'a> FileScanner<'a> {
    pub fn new(store: &'a PatternStore, languages: Vec<Language>, frameworks: Vec<String>) -> Self {
        Self {
            store,
            languages,
            frameworks,
        }
    }

    /// Scans a file or directory. Findings come out in file-traversal
    /// order, then line order, then rule-declaration order.
    pub fn scan(&self, target: &str) -> VulnhoundResult<ScanOutcome> {
        let target_path = Path::new(target);
        if !target_path.exists() {
            return Err(VulnhoundError::scan_error(target, "target path not found"));
        }

        let mut outcome = ScanOutcome {
            target_path: target.to_string(),
            ..ScanOutcome::default()
        };

        if target_path.is_dir() {
            self.scan_directory(target_path, &mut outcome);
        } else {
            self.scan_file(target_path, &mut outcome);
        }

        Ok(outcome)
    }

    fn scan_directory(&self, directory: &Path, outcome: &mut ScanOutcome) {
        log::debug!("Scanning directory: {}", directory.display());

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                let warning = format!("Cannot read directory {}: {}", directory.display(), e);
                log::warn!("{}", warning);
                outcome.warnings.push(warning);
                return;
            }
        };

        // Sorted traversal keeps finding order stable across platforms.
        let mut paths: Vec<_> = entries.filter_map(|entry| entry.ok().map(|e| e.path())).collect();
        paths.sort();

        for path in paths {
            let hidden = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with('.'))
                .unwrap_or(false);
            if hidden {
                continue;
            }

            if path.is_dir() {
                self.scan_directory(&path, outcome);
            } else {
                self.scan_file(&path, outcome);
            }
        }
    }

    fn scan_file(&self, path: &Path, outcome: &mut ScanOutcome) {
        let language = match self.language_for(path) {
            Some(language) => language,
            None => return,
        };

        let rules = self.store.rules_for(language, &self.frameworks);
        if rules.is_empty() {
            return;
        }

        let file_label = path.display().to_string();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let warning = format!("Cannot read file {}: {}", file_label, e);
                log::warn!("{}", warning);
                outcome.warnings.push(warning);
                return;
            }
        };

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(_) => {
                let warning = format!("Skipping undecodable file {}", file_label);
                log::warn!("{}", warning);
                outcome.warnings.push(warning);
                return;
            }
        };

        log::debug!("Scanning file: {}", file_label);
        outcome.files_scanned += 1;

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;

            for rule in &rules {
                for pattern in &rule.patterns {
                    if pattern.is_match(line) {
                        outcome.findings.push(Finding {
                            file_path: file_label.clone(),
                            language,
                            line_number,
                            vulnerability_type: rule.vulnerability_type.clone(),
                            description: rule.description.clone(),
                            matched_pattern: pattern.as_str().to_string(),
                            raw_line: line.trim().to_string(),
                        });
                    }
                }
            }
        }
    }

    /// Attribute the file to a language by extension, honoring the
    /// requested language filter when one was given.
    fn language_for(&self, path: &Path) -> Option<Language> {
        let extension = path.extension().and_then(|ext| ext.to_str())?;
        let language = Language::from_extension(extension)?;

        if self.languages.is_empty() || self.languages.contains(&language) {
            Some(language)
        } else {
            None
        }
    }
}
