use clap::Parser;
use parking_system::config::{self, Config, StorageBackend};
use tracing_subscriber::EnvFilter;

/// Parking lot attendant shell.
#[derive(Parser)]
#[command(name = "parking-system")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Keep spots and tickets in memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = if cli.in_memory {
        let config = Config::from_env_with_backend(StorageBackend::Memory)?;
        config.validate()?;
        config
    } else {
        config::load_from_env()?
    };

    init_tracing(&config);
    config.print_summary();

    parking_system::app::run(config).await
}

/// Logs go to stderr so they do not interleave with the menu on stdout.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
