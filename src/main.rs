//! Stylefusion - identity-preserving style transfer CLI.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod intake;
mod model;
mod output;
mod pipeline;
mod ports;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::FusionError;
use crate::intake::load_image;
use crate::model::resolve_model;
use crate::output::{resolve_output_path, save_data_uri, validate_format};
use crate::pipeline::{GenerationRequest, StylePipeline};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr. `STYLEFUSION_LOG` takes an `EnvFilter` directive and wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "stylefusion=debug" } else { "stylefusion=warn" };
    let filter =
        EnvFilter::try_from_env("STYLEFUSION_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), FusionError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(FusionError::Config)?;

    // Resolve arguments against config defaults
    let mode = cli.mode.unwrap_or(config.defaults.mode);
    let generation_model =
        resolve_model(cli.model.as_deref().unwrap_or(&config.defaults.generation_model))
            .map_err(FusionError::InvalidArgument)?;
    let analysis_model =
        resolve_model(cli.analysis_model.as_deref().unwrap_or(&config.defaults.analysis_model))
            .map_err(FusionError::InvalidArgument)?;
    let format = cli.format.clone().unwrap_or_else(|| config.defaults.format.clone());
    validate_format(&format).map_err(FusionError::InvalidArgument)?;
    let instruction = cli.resolve_prompt()?;

    // Read inputs; a request without a subject is rejected before any client exists
    let identity = match cli.identity.as_deref() {
        Some(arg) => Some(load_image(arg).await?),
        None => None,
    };
    let style = match cli.style.as_deref() {
        Some(arg) => Some(load_image(arg).await?),
        None => None,
    };
    let request = GenerationRequest::new(identity, style, mode, instruction)?;

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("STYLEFUSION_REPLAY").ok();
    let is_recording = std::env::var("STYLEFUSION_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::info!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    tracing::debug!(
        %analysis_model,
        %generation_model,
        mode = ?request.mode(),
        identity = %request.identity().inline.mime_type,
        has_style = request.style().is_some(),
        instruction_chars = request.instruction().chars().count(),
        "request ready"
    );

    // Generate
    let pipeline = StylePipeline::new(ctx.client.as_ref(), analysis_model, generation_model);
    let result = pipeline.generate_transformed_image(&request).await;
    drop(ctx);

    // Finish recording if active, whether or not generation succeeded
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    let image = result?;

    if cli.data_uri {
        println!("{}", image.data_uri);
        return Ok(());
    }

    let output_path = resolve_output_path(cli.output.as_deref(), image.timestamp, &format);
    save_data_uri(&image.data_uri, &format, &output_path)?;
    eprintln!("Saved: {}", output_path.display());

    Ok(())
}
