use clap::Parser;
use movies_session::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Issue(args) => cli::issue::run(args),
        Command::HashPassword(args) => cli::issue::hash_password(args),
    }
}
