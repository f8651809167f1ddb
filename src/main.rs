use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use message_display::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = cli.effective_config();

    let result = cli::run(cli, &app_config).await;
    match &result {
        Ok(output) => println!("{output}"),
        // retrieval failures were already surfaced by the notifier
        Err(err) if !err.is_user_visible() => {
            log::error!("{err}");
            eprintln!("{err}");
        }
        Err(_) => {}
    }
    ExitCode::from(cli::exit_status(&result))
}
