use clap::Parser;
use eventfeed::adapter::inbound::cli::{run, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Serve(args) => run::execute_serve(args).await,
        Commands::Migrate(args) => run::execute_migrate(args),
        Commands::Check(args) => run::execute_check(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
