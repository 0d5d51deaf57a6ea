mod accounting;
mod collector;
mod config;
mod diskspace;
mod footer;
mod node;
mod stats;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::Config;
use footer::Footer;
use stats::SharedStats;

#[derive(Parser)]
#[command(name = "statline", about = "Status line for a storage node")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the status line once
    Show,
    /// Keep printing the status line as stats refresh
    Watch,
    /// Dump the current snapshot as JSON
    Stats,
    /// Dump the space accounting reports as JSON
    Space,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        None | Some(Commands::Show) => show(&config),
        Some(Commands::Watch) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(watch(config))
        }
        Some(Commands::Stats) => stats_json(&config),
        Some(Commands::Space) => space_json(&config),
    }
}

fn show(config: &Config) -> anyhow::Result<()> {
    let measurements = collector::Measurements::take(config);
    let snapshot = collector::assemble(config, &measurements, collector::now_timestamp());
    let footer = Footer::new(Some(Arc::new(snapshot)), config.footer.clone());
    println!("{}", footer.line());
    Ok(())
}

async fn watch(config: Config) -> anyhow::Result<()> {
    let interval_secs = config.footer.update_interval_secs;
    let shared = SharedStats::new();
    let mut handle = shared.handle();
    let footer = Footer::new(handle.clone(), config.footer.clone());

    collector::start_collector(shared, config, interval_secs);

    while handle.changed().await.is_ok() {
        println!("{}", footer.line());
    }
    Ok(())
}

fn stats_json(config: &Config) -> anyhow::Result<()> {
    let measurements = collector::Measurements::take(config);
    let snapshot = collector::assemble(config, &measurements, collector::now_timestamp());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn space_json(config: &Config) -> anyhow::Result<()> {
    let measurements = collector::Measurements::take(config);
    let (consumed, donated, local) = collector::reports(config, &measurements);
    let reports = serde_json::json!({
        "consumed": consumed,
        "donated": donated,
        "local": local,
    });
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
