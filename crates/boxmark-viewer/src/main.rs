//! Boxmark - native entry point

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "boxmark")]
#[command(about = "Place, inspect and delete marker boxes on a 3D model")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "boxmark.toml")]
    config: PathBuf,

    /// glTF model to load (overrides the config file)
    #[arg(short, long)]
    model: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&args.log_level))
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Boxmark v{}", env!("CARGO_PKG_VERSION"));

    let mut config = boxmark_core::load_config(&args.config)?;

    if let Some(model) = args.model {
        config.model.path = model;
    }

    boxmark_viewer::app::run(config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_falls_back_to_info() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_args_override_model() {
        let args = Args::parse_from(["boxmark", "--model", "assets/tower.glb", "-l", "warn"]);
        assert_eq!(args.model.as_deref(), Some("assets/tower.glb"));
        assert_eq!(args.config, PathBuf::from("boxmark.toml"));
        assert_eq!(parse_level(&args.log_level), Level::WARN);
    }
}
