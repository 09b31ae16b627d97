//! hk: manage apps and processes on the hosted platform

use clap::Parser;

use hk_cli::cli::Cli;
use hk_cli::domain::error::error_code;
use hk_cli::output::json;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(e) = hk_cli::logging::init(cli.verbose, cli.no_color) {
        eprintln!("Warning: {e}");
    }

    if let Err(e) = cli.run().await {
        tracing::debug!(error = ?e, "command failed");
        report(&e, json_mode);
        std::process::exit(1);
    }
}

fn report(err: &anyhow::Error, json_mode: bool) {
    if json_mode {
        match json::format_error(&format!("{err:#}"), error_code(err)) {
            Ok(doc) => println!("{doc}"),
            Err(_) => eprintln!("Error: {err:#}"),
        }
    } else {
        eprintln!("Error: {err:#}");
    }
}
