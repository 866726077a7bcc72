use clap::Parser;
use dotenvy::dotenv;

use fitrec::cli::{Cli, run};
use fitrec::logging::init_logging;
use fitrec_config::LogConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let log_config = match LogConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = init_logging(&log_config) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
