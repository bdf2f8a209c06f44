use clap::{CommandFactory, Parser, ValueHint};
use demo_to_json::{
    config::{Config, ConfigError, DEFAULT_TARGET_PLAYER},
    parser, Result,
};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "demo2json",
    version,
    about = "Convert a demo capture into tick-indexed JSON events"
)]
struct Cli {
    /// Capture to convert; output lands next to it with a .json extension.
    #[arg(value_hint = ValueHint::FilePath)]
    demo: Option<PathBuf>,

    #[arg(
        short,
        long,
        default_value = DEFAULT_TARGET_PLAYER,
        help = "Substring of the player name to follow (case-insensitive)"
    )]
    target: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();
    let Some(demo) = args.demo else {
        println!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::new(args.target);
    match cmd_convert(&demo, &config).await {
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

async fn cmd_convert(demo_path: &Path, config: &Config) -> Result<()> {
    config.validate()?;
    let bytes = tokio::fs::read(demo_path)
        .await
        .map_err(|source| ConfigError::UnreadableInput {
            path: demo_path.to_path_buf(),
            source,
        })?;

    let out_path = parser::output_path(demo_path)?;
    let summary = parser::convert(&bytes, &out_path, config)?;

    info!("Demo data written to: {}", out_path.display());
    info!(
        "Map: {}, Ticks: {}, Events: {}",
        summary.map_name,
        summary.ticks.len(),
        summary.event_count()
    );

    Ok(())
}
