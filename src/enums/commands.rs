use clap::Subcommand;
use crate::config::constants::{DEFAULT_BATCH_SIZE, DEFAULT_CONTEXT_LINES, DEFAULT_PATTERN_DIR};

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a file or directory for security vulnerabilities
    Scan {
        /// Target directory or file to scan
        target: String,
        /// Programming languages to scan for (all supported languages when omitted)
        #[clap(short, long)]
        language: Vec<String>,
        /// Frameworks to include framework-specific patterns for
        #[clap(short, long)]
        framework: Vec<String>,
        /// Directory containing pattern files
        #[clap(short, long, default_value = DEFAULT_PATTERN_DIR)]
        patterns: String,
        /// Output report file (markdown format)
        #[clap(short, long, default_value = "report.md")]
        output: String,
        /// Language code for the generated report
        #[clap(long, default_value = "en")]
        report_language: String,
        /// Number of findings analyzed per LLM request
        #[clap(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
        /// Context lines extracted before and after each matched line
        #[clap(long, default_value_t = DEFAULT_CONTEXT_LINES)]
        context_lines: usize,
        /// Persist every LLM request/response pair for auditing
        #[clap(long)]
        log_chat: bool,
    },
    /// Check pattern files for malformed rule blocks without scanning
    Validate {
        /// Directory containing pattern files
        #[clap(default_value = DEFAULT_PATTERN_DIR)]
        patterns: String,
    },
}
