//! A small demonstration CLI: compiles a condition and evaluates it against a JSON event read
//! from a file or stdin, printing `true`/`false`.
//!
//! This binary is a thin external consumer of the library, mirroring `src/main.rs`'s
//! `Cli` struct and `tracing_subscriber` initialization. It is not part of the condition
//! language core itself.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use condition_lang::{compile, MapEvent};

#[derive(Parser)]
#[command(name = "condition-lang")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compile a condition and evaluate it against a JSON event")]
#[command(long_about = None)]
struct Cli {
    /// The condition text, e.g. EQ(name,first,"jia") && !EQ(name,last,"liu")
    condition: String,

    /// Path to a JSON event file. Reads from stdin if omitted.
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("condition_lang={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("compiling condition");
    let filter = compile(&cli.condition)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("failed to compile condition")?;

    let event_json = match &cli.event {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read event from stdin")?;
            buf
        }
    };

    let parsed: serde_json::Value =
        serde_json::from_str(&event_json).context("event is not valid JSON")?;
    let event = MapEvent::from(parsed);

    let result = filter.evaluate(&event);
    info!(result, "evaluation complete");
    println!("{result}");

    Ok(())
}
