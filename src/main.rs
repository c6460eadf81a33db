use clap::Parser;
use vulnhound::structs::cli::Cli;
use vulnhound::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    CommandRunner::new().run_command(cli.command).await?;
    Ok(())
}
