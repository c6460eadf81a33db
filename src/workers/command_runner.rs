use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::language::Language;
use crate::enums::report_language::ReportLanguage;
use crate::errors::{VulnhoundError, VulnhoundResult};
use crate::logger::scan_logger::ScanLogger;
use crate::services::ai_providers::create_judge;
use crate::services::batch_analyzer::BatchAnalyzer;
use crate::services::context_extractor::ContextExtractor;
use crate::services::file_scanner::FileScanner;
use crate::services::pattern_store::PatternStore;
use crate::services::report_assembler::ReportAssembler;
use crate::services::result_aggregator::ResultAggregator;
use crate::services::transcript_logger::TranscriptLogger;
use crate::services::translator::Translator;
use crate::structs::config::config::Config;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> VulnhoundResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Scan {
                target,
                language,
                framework,
                patterns,
                output,
                report_language,
                batch_size,
                context_lines,
                log_chat,
            } => {
                self.scan_command(ScanRequest {
                    target,
                    languages: language,
                    frameworks: framework,
                    patterns,
                    output,
                    report_language,
                    batch_size,
                    context_lines,
                    log_chat,
                })
                .await
            }
            Commands::Validate { patterns } => self.validate_command(&patterns),
        };

        if let Some(start) = self.start_time {
            log::info!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    async fn scan_command(&self, request: ScanRequest) -> VulnhoundResult<()> {
        let languages = parse_languages(&request.languages)?;
        let report_language = parse_report_language(&request.report_language);

        let mut config = ConfigManager::load()?;
        config.scan.batch_size = request.batch_size.max(1);
        config.scan.context_lines = request.context_lines;
        if request.log_chat {
            config.scan.log_transcript = true;
        }

        let store = load_patterns(&request.patterns, &request.frameworks)?;

        ScanLogger::log_scan_start(&request.target, &request.languages);
        let scanner = FileScanner::new(&store, languages, request.frameworks.clone());
        let outcome = scanner.scan(&request.target)?;
        ScanLogger::log_scan_outcome(&outcome);

        let extractor = ContextExtractor::new(config.scan.context_lines);
        let extractions = extractor.extract(&outcome.findings);

        let (analyzed, statistics, judge) = if extractions.is_empty() {
            log::info!("No findings to analyze, generating empty report");
            let aggregator = ResultAggregator::new();
            let (analyzed, statistics) =
                aggregator.aggregate(Vec::new(), Vec::new(), outcome.files_scanned)?;
            (analyzed, statistics, None)
        } else {
            ScanLogger::log_analysis_start(extractions.len(), config.scan.batch_size);

            let judge = create_judge(&config.ai)?;
            let transcript = transcript_logger(&config);
            let analyzer = BatchAnalyzer::new(
                judge.clone(),
                transcript,
                config.scan.batch_size,
                config.scan.max_prompt_tokens,
            );
            let verdicts = analyzer.analyze(&extractions).await?;

            let aggregator = ResultAggregator::new();
            let (analyzed, statistics) =
                aggregator.aggregate(extractions, verdicts, outcome.files_scanned)?;
            (analyzed, statistics, Some(judge))
        };

        ScanLogger::log_summary(&statistics);

        let assembler = ReportAssembler::new();
        let mut report =
            assembler.assemble(&request.target, &request.languages, &analyzed, &statistics);

        if report_language != ReportLanguage::English {
            let judge = match judge {
                Some(judge) => judge,
                None => create_judge(&config.ai)?,
            };
            let translator = Translator::new(judge, transcript_logger(&config));
            report = translator.translate(&report, report_language).await;
        }

        fs::write(&request.output, &report).map_err(|e| {
            VulnhoundError::file_error(&request.output, "write", &e.to_string())
        })?;
        ScanLogger::log_report_written(&request.output);

        Ok(())
    }

    /// Parses every pattern file under the directory and reports malformed
    /// rule blocks without touching any target code.
    fn validate_command(&self, patterns: &str) -> VulnhoundResult<()> {
        let base = Path::new(patterns);
        if !base.exists() {
            return Err(VulnhoundError::file_error(patterns, "read directory", "not found"));
        }

        let mut files = 0;
        let mut total_rules = 0;
        let mut total_issues = 0;

        for subdirectory in ["languages", "frameworks"] {
            let directory = base.join(subdirectory);
            if !directory.is_dir() {
                continue;
            }

            let mut paths: Vec<_> = fs::read_dir(&directory)
                .map_err(|e| {
                    VulnhoundError::file_error(
                        &directory.display().to_string(),
                        "read directory",
                        &e.to_string(),
                    )
                })?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.extension().map(|ext| ext == "txt").unwrap_or(false))
                .collect();
            paths.sort();

            for path in paths {
                files += 1;
                let parsed = PatternStore::parse_file(&path)?;
                total_rules += parsed.rules.len();
                total_issues += parsed.issues.len();

                if parsed.issues.is_empty() {
                    println!("✅ {} ({} rules)", path.display(), parsed.rules.len());
                } else {
                    println!("❌ {} ({} rules, {} issues)", path.display(), parsed.rules.len(), parsed.issues.len());
                    for issue in &parsed.issues {
                        println!("   {}", issue);
                    }
                }
            }
        }

        println!(
            "\n📋 Validated {} file{}: {} rules, {} issues",
            files,
            if files == 1 { "" } else { "s" },
            total_rules,
            total_issues
        );
        Ok(())
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

struct ScanRequest {
    target: String,
    languages: Vec<String>,
    frameworks: Vec<String>,
    patterns: String,
    output: String,
    report_language: String,
    batch_size: usize,
    context_lines: usize,
    log_chat: bool,
}

fn parse_languages(identifiers: &[String]) -> VulnhoundResult<Vec<Language>> {
    identifiers
        .iter()
        .map(|identifier| {
            Language::from_identifier(identifier).ok_or_else(|| {
                VulnhoundError::config_error(
                    &format!("Unsupported language: {}", identifier),
                    Some("language"),
                    Some(&format!(
                        "Supported languages: {}",
                        Language::all()
                            .iter()
                            .map(|l| l.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    )),
                )
            })
        })
        .collect()
}

/// Unknown report language codes fall back to English with a warning
/// rather than aborting a scan that already cost LLM calls to run.
fn parse_report_language(code: &str) -> ReportLanguage {
    match ReportLanguage::from_code(code) {
        Some(language) => language,
        None => {
            log::warn!("Unsupported report language '{}', using English", code);
            ReportLanguage::English
        }
    }
}

fn load_patterns(patterns: &str, frameworks: &[String]) -> VulnhoundResult<PatternStore> {
    let base = Path::new(patterns);
    let mut store = PatternStore::new();

    let loaded = store.load_directory(&base.join("languages"), false)?;
    if loaded == 0 {
        return Err(VulnhoundError::config_error(
            &format!("No pattern rules loaded from {}/languages", patterns),
            Some("patterns"),
            Some("Add language pattern files or point --patterns at a pattern directory"),
        ));
    }

    let frameworks_dir = base.join("frameworks");
    if !frameworks.is_empty() && frameworks_dir.is_dir() {
        store.load_directory(&frameworks_dir, true)?;
    }

    Ok(store)
}

fn transcript_logger(config: &Config) -> Option<TranscriptLogger> {
    config
        .scan
        .log_transcript
        .then(|| TranscriptLogger::new(&config.scan.transcript_dir))
}
