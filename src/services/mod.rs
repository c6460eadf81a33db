pub mod pattern_store;
pub mod file_scanner;
pub mod context_extractor;
pub mod batch_analyzer;
pub mod verdict_parser;
pub mod result_aggregator;
pub mod report_assembler;
pub mod translator;
pub mod transcript_logger;
pub mod ai_providers;
