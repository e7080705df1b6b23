//! Map poster generator.
//!
//! Turns a handful of options into a theme and a layer spec, hands them to an
//! external renderer and finishes the raster for print:
//! - Theme presets and color schemes (built-in plus a YAML file)
//! - Black & white and circular posters
//! - Print margins with resolution metadata

mod args;
mod renderer;

use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use poster_common::PosterError;
use poster_core::{generate_poster, prepare_request, PosterTables, PresetCatalog};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use args::Args;
use renderer::CommandRenderer;

fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = init_tracing(&args) {
        eprintln!("failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Poster generation failed");
            let code = e
                .downcast_ref::<PosterError>()
                .map(PosterError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn load_tables(args: &Args) -> Result<PosterTables> {
    let mut tables = PosterTables::builtin()?;
    if let Some(path) = &args.themes_file {
        let user = PresetCatalog::from_file(path)
            .with_context(|| format!("loading theme presets from {}", path.display()))?;
        tables.presets = tables.presets.merge(user);
    }
    Ok(tables)
}

fn run(args: &Args) -> Result<()> {
    let tables = load_tables(args)?;

    if args.list_themes {
        println!("Theme presets:");
        for name in tables.presets.names() {
            println!("  {}", name);
        }
        println!("Color schemes (append _r to reverse):");
        for name in tables.schemes.names() {
            println!("  {}", name);
        }
        return Ok(());
    }

    let params = args
        .to_params()
        .ok_or_else(|| anyhow!("--location is required"))?;

    if let Some(path) = &args.emit_spec {
        let request = prepare_request(&params, &tables)?;
        let json = serde_json::to_vec_pretty(&request).map_err(PosterError::from)?;
        std::fs::write(path, json)
            .map_err(PosterError::from)
            .with_context(|| format!("writing render request to {}", path.display()))?;
        info!(path = %path.display(), "Wrote render request");
        return Ok(());
    }

    let command = args.renderer_cmd.as_deref().ok_or_else(|| {
        PosterError::Config(
            "no renderer configured, set --renderer-cmd or POSTER_RENDERER_CMD".to_string(),
        )
    })?;
    let renderer = CommandRenderer::new(command, args.renderer_args.clone())?;

    if let Some(dir) = &params.output_dir {
        std::fs::create_dir_all(dir)
            .map_err(PosterError::from)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    let path = generate_poster(&params, &tables, &renderer)?;
    println!("{}", path.display());
    Ok(())
}
