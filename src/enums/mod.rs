pub mod commands;
pub mod severity;
pub mod language;
pub mod report_language;
pub mod report_segment;
pub mod ai_provider_error;
