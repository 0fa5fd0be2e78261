//! End-to-end run: detect silence, split, then optionally merge.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::materializer::split_segments;
use crate::packer::merge_segments;
use crate::segmenter::split_on_silence;
use crate::tools::MediaTools;
use crate::types::{AudioSegment, SplitSettings};

/// One processing request for a single input file.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub input: PathBuf,
    /// Prefix for split files (`<prefix><i>.wav`).
    pub split_prefix: String,
    /// Prefix for merged files (`<prefix><k>.wav`).
    pub merge_prefix: String,
    pub noise_db: i32,
    pub min_silence: f64,
    pub add_silence: bool,
    /// Merge budget in seconds; `None` skips merging.
    pub merge_budget: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub segments: Vec<AudioSegment>,
    pub merges: Vec<AudioSegment>,
}

pub fn run<T: MediaTools + ?Sized>(
    tools: &T,
    request: &PipelineRequest,
    settings: &SplitSettings,
) -> Result<PipelineOutput> {
    let found = split_on_silence(
        tools,
        &request.input,
        request.noise_db,
        request.min_silence,
        settings,
    )?;
    info!(segments = found.len(), "found segments");

    let segments = split_segments(
        tools,
        &found,
        &request.split_prefix,
        request.add_silence,
        settings,
    )?;

    let merges = match request.merge_budget {
        Some(budget) => merge_segments(tools, &segments, &request.merge_prefix, budget, settings)?,
        None => Vec::new(),
    };

    Ok(PipelineOutput { segments, merges })
}
