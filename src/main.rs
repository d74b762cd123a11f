use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use blobtrack_rs::{
    GatingReference, OverlayText, ReplaySource, TraceMarker, TrackerConfig, TrackerOutput,
    TrackerPipeline, trace_markers,
};

/// Replay recorded blob detections through the continuity tracker.
#[derive(Parser)]
#[clap(name = "blobtrack")]
pub struct Args {
    /// JSON-lines file, one array of detections per frame
    input: PathBuf,
    /// Tracker configuration (JSON); missing keys keep their defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// Frame width in pixels
    #[clap(long)]
    width: Option<u32>,
    /// Frame height in pixels
    #[clap(long)]
    height: Option<u32>,
    /// Gate against the mean of the trace instead of the last selection
    #[clap(long)]
    trailing_average: bool,
    /// Stop after this many frames (at least 1)
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    stop_after: Option<u64>,
}

#[derive(Serialize)]
struct FrameReport<'a> {
    #[serde(flatten)]
    output: &'a TrackerOutput,
    trace: Vec<TraceMarker>,
    overlay: OverlayText,
}

fn load_config(args: &Args) -> Result<TrackerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("unable to open config '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => TrackerConfig::default(),
    };
    if let Some(width) = args.width {
        config.frame_size.width = width;
    }
    if let Some(height) = args.height {
        config.frame_size.height = height;
    }
    if args.trailing_average {
        config.gating_reference = GatingReference::TrailingAverage;
    }
    Ok(config)
}

fn open_input(path: &Path) -> Result<ReplaySource<BufReader<File>>> {
    let file =
        File::open(path).with_context(|| format!("unable to open file '{}'", path.display()))?;
    info!("successfully opened file '{}'", path.display());
    Ok(ReplaySource::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // setup logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(&args)?;
    let source = open_input(&args.input)?;
    let mut pipeline = TrackerPipeline::new(source, config).context("invalid tracker config")?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_result = Ok(());

    let frames = pipeline.run(|output, tracker| {
        let report = FrameReport {
            output,
            trace: trace_markers(tracker),
            overlay: OverlayText::new(output, tracker),
        };
        write_result = serde_json::to_writer(&mut out, &report)
            .map_err(anyhow::Error::from)
            .and_then(|_| writeln!(out).map_err(anyhow::Error::from));
        if write_result.is_err() {
            return ControlFlow::Break(());
        }
        match args.stop_after {
            Some(limit) if output.frame_index >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    });
    let frames = match frames {
        Ok(frames) => frames,
        Err(e) => {
            warn!(line = pipeline.source().line(), "replay aborted");
            return Err(e).context("replay failed");
        }
    };
    write_result.context("unable to write frame report")?;
    out.flush().context("unable to write frame report")?;

    let state = pipeline.tracker().state();
    info!(
        smooth_frames = state.smooth_frame_count,
        smooth_rate = state.smooth_rate_percent(),
        "Read {} frames.",
        frames
    );

    Ok(())
}
