use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use nalgebra::Vector3;
use nematic_view::frame::{field_names, FieldRange, Frame};
use nematic_view::import::expand_patterns;
use nematic_view::lattice::LatticeDims;
use nematic_view::sampling::{coarsen, slice, Plane, SampledGrid};
use nematic_view::{EngineSettings, FrameSequence};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "nematic-view")]
#[command(about = "Derive director, order and elastic energy fields from nematic Q-tensor snapshots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    /// JSON file with engine settings
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Chirality offset q0, overrides the settings file
    #[arg(long, global = true, allow_hyphen_values = true)]
    q0: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a run and summarise every frame
    Summary {
        /// Input files or glob patterns
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one field on a plane through a frame as tab separated rows
    Slice {
        /// Input files or glob patterns
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Frame index; out-of-range values select the first or last frame
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        frame: isize,

        /// Sampling stride (default: director resolution of the settings)
        #[arg(long)]
        stride: Option<usize>,

        /// Plane normal as x,y,z
        #[arg(long, value_delimiter = ',', default_values_t = [1.0, 0.0, 0.0], allow_hyphen_values = true)]
        normal: Vec<f64>,

        /// Plane origin as x,y,z (default: box centre)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        origin: Option<Vec<f64>>,

        /// Field to print
        #[arg(long, default_value = field_names::ORDER)]
        field: String,
    },
}

#[derive(Serialize)]
struct NamedRange {
    name: String,
    range: FieldRange,
}

#[derive(Serialize)]
struct FrameSummary {
    source: PathBuf,
    timestamp: Option<u64>,
    dims: LatticeDims,
    boundaries: usize,
    defect_sites: usize,
    ranges: Vec<NamedRange>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            let _ = threads;
            warn!("Thread count specified but parallel feature not enabled. Ignoring.");
        }
    }

    info!("Starting nematic-view v{}", nematic_view::VERSION);

    let mut settings = match &cli.settings {
        Some(path) => EngineSettings::from_json_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => EngineSettings::default(),
    };
    if let Some(q0) = cli.q0 {
        settings.q0 = q0;
    }

    match cli.command {
        Commands::Summary { patterns, json } => {
            let sequence = load(&patterns, &settings)?;
            summarize(&sequence, &settings, json)
        }
        Commands::Slice {
            patterns,
            frame,
            stride,
            normal,
            origin,
            field,
        } => {
            let sequence = load(&patterns, &settings)?;
            let stride = stride.unwrap_or(settings.director_resolution);
            print_slice(&sequence, frame, stride, &normal, origin.as_deref(), &field)
        }
    }
}

fn load(patterns: &[String], settings: &EngineSettings) -> anyhow::Result<FrameSequence> {
    let files = expand_patterns(patterns).context("failed to resolve input patterns")?;
    info!("Loading {} file(s)", files.len());
    FrameSequence::load(&files, settings).context("failed to load frames")
}

fn frame_summary(frame: &Frame, settings: &EngineSettings) -> FrameSummary {
    let ranges = frame
        .scalar_field_names()
        .into_iter()
        .filter_map(|name| {
            frame.scalar_range(name).map(|range| NamedRange {
                name: name.to_string(),
                range,
            })
        })
        .collect();
    FrameSummary {
        source: frame.source().to_path_buf(),
        timestamp: frame.timestamp(),
        dims: frame.dims(),
        boundaries: frame.num_boundaries(),
        defect_sites: frame.defect_sites(settings.defect_order).len(),
        ranges,
    }
}

fn summarize(sequence: &FrameSequence, settings: &EngineSettings, json: bool) -> anyhow::Result<()> {
    let summaries: Vec<FrameSummary> = sequence
        .iter()
        .map(|frame| frame_summary(frame, settings))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if let Some(dims) = sequence.dims() {
        println!("{} frame(s) on a {} lattice", sequence.len(), dims);
    }
    for (index, summary) in summaries.iter().enumerate() {
        let timestamp = summary
            .timestamp
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        println!(
            "[{}] {} (t = {}, {} boundary object(s), {} defect site(s) below S = {})",
            index,
            summary.source.display(),
            timestamp,
            summary.boundaries,
            summary.defect_sites,
            settings.defect_order
        );
        for NamedRange { name, range } in &summary.ranges {
            println!("    {:<14} {:>12.6} {:>12.6}", name, range.min, range.max);
        }
    }
    Ok(())
}

fn vector_arg(name: &str, values: &[f64]) -> anyhow::Result<Vector3<f64>> {
    if values.len() != 3 {
        bail!("--{} takes three comma separated values, got {}", name, values.len());
    }
    Ok(Vector3::from_column_slice(values))
}

fn print_slice(
    sequence: &FrameSequence,
    frame: isize,
    stride: usize,
    normal: &[f64],
    origin: Option<&[f64]>,
    field: &str,
) -> anyhow::Result<()> {
    let index = sequence.clamp_index(frame).context("no frames loaded")?;
    let frame = sequence
        .get_frame(index)
        .with_context(|| format!("frame {} missing", index))?;
    let coarse = coarsen(frame, stride)?;
    if coarse.fields().get(field).is_none() {
        bail!(
            "unknown field '{}'; available: {}",
            field,
            frame.fields().names().collect::<Vec<_>>().join(", ")
        );
    }

    let normal = vector_arg("normal", normal)?;
    let origin = match origin {
        Some(origin) => vector_arg("origin", origin)?,
        None => frame.dims().center(),
    };
    let plane = Plane::new(normal, origin)?;
    let cut = slice(&coarse, &plane, stride)?;
    info!(
        "Frame {}: {} point(s) on the plane through ({}, {}, {})",
        index,
        cut.len(),
        cut.origin.x,
        cut.origin.y,
        cut.origin.z
    );

    let values = cut
        .fields
        .get(field)
        .with_context(|| format!("field '{}' missing from slice", field))?;
    for (point, position) in cut.positions.iter().enumerate() {
        let components: Vec<String> = values.site(point).iter().map(|v| format!("{:.6}", v)).collect();
        println!(
            "{}\t{}\t{}\t{}",
            position.x,
            position.y,
            position.z,
            components.join("\t")
        );
    }
    Ok(())
}
