use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use form_coach::{
    config::{AnalysisConfig, OutputFormat},
    pipeline, summarize,
    track::PoseTrack,
};

/// Rates exercise form from pose tracks, one track per camera viewpoint.
#[derive(Parser, Debug)]
#[command(name = "form-coach", version, about)]
struct Args {
    /// TOML run configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format, overriding the configuration.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Pose track JSON files of the same exercise.
    #[arg(required = true)]
    tracks: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(format) = args.format {
        config.output = format;
    }

    let mut tracks = Vec::with_capacity(args.tracks.len());
    let mut load_failures = Vec::new();
    for path in &args.tracks {
        match PoseTrack::load(path) {
            Ok(track) => tracks.push(track),
            Err(err) => load_failures.push(err),
        }
    }

    let Some(first) = tracks.first() else {
        for err in &load_failures {
            log::error!("{err:#}");
        }
        bail!("none of the {} pose tracks could be loaded", args.tracks.len());
    };
    let fps = first.fps.unwrap_or(config.fps);
    let exercise = pipeline::report_exercise(&tracks)
        .context("no pose track names a supported exercise")?;

    let results = pipeline::evaluate_viewpoints(&tracks);
    let report = summarize(
        results
            .into_iter()
            .chain(load_failures.into_iter().map(Err))
            .map(|result| result.map_err(|err| format!("{err:#}"))),
        exercise,
    );
    if report.is_empty() {
        bail!("no viewpoint could be evaluated");
    }

    match config.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", report.render_text(fps, config.include_perfect)),
    }

    Ok(())
}
