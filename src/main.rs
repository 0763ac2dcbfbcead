use clap::Parser;
use principal_list_lib::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    principal_list_lib::run(cli).await
}
