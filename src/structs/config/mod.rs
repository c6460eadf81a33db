pub mod config;
pub mod ai_config;
pub mod scan_config;
