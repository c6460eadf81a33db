pub mod cli;
pub mod config;
pub mod rule;
pub mod finding;
pub mod code_context;
pub mod extraction;
pub mod verdict;
pub mod analyzed_vulnerability;
pub mod report_statistics;
pub mod scan_outcome;
