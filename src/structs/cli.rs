use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "vulnhound")]
#[clap(about = "White-box vulnerability scanner with LLM-based triage", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
