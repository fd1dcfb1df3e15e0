mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use imagecraft_core::bmp;
use imagecraft_core::pipeline::Pipeline;
use imagecraft_core::pipeline::recipe::Recipe;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            eprintln!("Run 'imagecraft --help' for usage.");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let filters = cli.validate()?;

    if cli.info {
        let (width, height) = bmp::probe(&cli.input)
            .with_context(|| format!("failed to read {}", cli.input.display()))?;
        println!("{}: {width}x{height}", cli.input.display());
        return Ok(());
    }

    let mut plan = match &cli.recipe {
        Some(path) => Recipe::load(path)
            .with_context(|| format!("failed to load recipe {}", path.display()))?,
        None => Recipe::default(),
    };
    plan.filters.extend(filters);

    let mut image = bmp::decode(&cli.input)
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;
    info!(
        path = %cli.input.display(),
        width = image.width(),
        height = image.height(),
        "loaded image"
    );

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let mut pipeline = Pipeline::new();
    plan.extend_pipeline(&mut pipeline);
    let report = pipeline.apply(&mut image);

    // `output` is required by clap unless --info was given.
    let output = cli.output.as_deref().context("missing output path")?;
    bmp::encode(output, &image)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        path = %output.display(),
        width = image.width(),
        height = image.height(),
        applied = report.applied.len(),
        "saved image"
    );
    Ok(())
}
