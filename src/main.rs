use clap::Parser;
use quip::core::config::{self, CliOverrides};
use quip::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "quip", about = "Random jokes from chucknorris.io, one category at a time")]
struct Args {
    /// API base URL (default https://api.chucknorris.io)
    #[arg(long)]
    base_url: Option<String>,

    /// Seed for category sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds to pick a category
    #[arg(long)]
    countdown: Option<u32>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to quip.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("quip.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::QuipConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            seed: args.seed,
            countdown_secs: args.countdown,
        },
    );

    log::info!("Quip starting up against {}", resolved.base_url);

    tui::run(resolved)
}
