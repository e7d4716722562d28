use clap::Parser;
use review_forge::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli::bootstrap(cli.config.as_deref())?;

    match cli.command {
        Command::Serve => cli::serve::run(config).await,
        Command::Generate(args) => cli::generate::run(config, args).await,
        Command::Compare(args) => cli::generate::run_compare(config, args).await,
        Command::Categories => cli::categories::run(config).await,
    }
}
