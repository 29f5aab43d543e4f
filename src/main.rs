use clap::Parser;
use polyexec::adapter::inbound::cli::{check, output, trade, CheckCommand, Cli, Commands};
use polyexec::config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    config::init_logging(cli.verbose, cli.json);

    let code = match cli.command {
        Commands::Trade(ref args) => trade::execute(args).await,
        Commands::Check(CheckCommand::Config) => check::execute_config(),
    };

    std::process::exit(i32::from(code));
}
