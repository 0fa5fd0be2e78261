use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use silencecut::config::AppConfig;
use silencecut::pipeline::{self, PipelineOutput, PipelineRequest};
use silencecut::tools::CommandTools;

/// silencecut - Split recordings on silence and pack the pieces
///
/// Detects silent intervals with ffmpeg, extracts every sound between them
/// into its own file, and optionally concatenates those files into merges of
/// bounded duration (e.g. for a sampler's drum kit).
#[derive(Parser, Debug)]
#[command(name = "silencecut")]
#[command(version = "0.1.0")]
#[command(about = "Split audio on silence and pack segments into bounded merges", long_about = None)]
struct Args {
    /// Input audio file path
    #[arg(value_name = "INPUT")]
    input_file: PathBuf,

    /// Output directory for segment files, merges and waveform images
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// File name prefix for outputs (defaults to the input file stem)
    #[arg(long)]
    prefix: Option<String>,

    /// Noise floor in dB below which audio counts as silence
    #[arg(long, default_value_t = -30, allow_hyphen_values = true)]
    noise_db: i32,

    /// Minimum silence duration in seconds to split on
    #[arg(long, default_value_t = 0.25)]
    min_silence: f64,

    /// Append a short silence tail to every segment
    #[arg(long)]
    pad: bool,

    /// Pack segments into merges of at most this many seconds
    #[arg(long, value_name = "SECONDS")]
    merge_seconds: Option<f64>,

    /// Path to a JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the produced segments as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Validate CLI arguments
    fn validate(&self) -> Result<()> {
        if !self.input_file.exists() {
            anyhow::bail!("Input file does not exist: {:?}", self.input_file);
        }

        if !self.input_file.is_file() {
            anyhow::bail!("Input path is not a file: {:?}", self.input_file);
        }

        if self.min_silence <= 0.0 {
            anyhow::bail!(
                "Minimum silence must be positive, got: {}",
                self.min_silence
            );
        }

        if let Some(budget) = self.merge_seconds {
            if budget <= 0.0 {
                anyhow::bail!("Merge duration must be positive, got: {}", budget);
            }
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            anyhow::bail!("Output path must be a directory: {:?}", self.output_dir);
        }

        Ok(())
    }

    fn output_stem(&self) -> String {
        self.prefix.clone().unwrap_or_else(|| {
            self.input_file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "segment".to_string())
        })
    }

    fn request(&self) -> PipelineRequest {
        let base = self.output_dir.join(self.output_stem());
        let base = base.to_string_lossy();
        PipelineRequest {
            input: self.input_file.clone(),
            split_prefix: base.to_string(),
            merge_prefix: format!("{base}-merged"),
            noise_db: self.noise_db,
            min_silence: self.min_silence,
            add_silence: self.pad,
            merge_budget: self.merge_seconds,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    args.validate()
        .context("Failed to validate command-line arguments")?;
    let config = AppConfig::from_override(args.config.clone())
        .context("Failed to load configuration")?;

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", args.output_dir))?;

    let tools = CommandTools::new(config.tools.clone());
    let request = args.request();
    let output = pipeline::run(&tools, &request, &config.settings)
        .with_context(|| format!("Failed to process {:?}", args.input_file))?;

    if args.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{json}");
    } else {
        print_summary(&output);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(output: &PipelineOutput) {
    println!("Split into {} segments:", output.segments.len());
    for segment in &output.segments {
        println!(
            "   {} ({:.3}s - {:.3}s, {:.3}s)",
            segment.filename.display(),
            segment.start,
            segment.end,
            segment.duration
        );
    }
    if !output.merges.is_empty() {
        println!("Packed into {} merges:", output.merges.len());
        for merge in &output.merges {
            println!("   {} ({:.3}s)", merge.filename.display(), merge.duration);
        }
    }
}
