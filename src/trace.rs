// src/trace.rs
//
// Recorded landmark traces stand in for the live camera + detector.
// One JSON object per line:
//   {"width":640,"height":480,"hand":[[x,y], ... 21 points]}
// `hand` is null on frames where the detector saw nothing.

use crate::landmarks::{FrameSize, Landmark};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFrame {
    pub width: u32,
    pub height: u32,
    pub hand: Option<Vec<[f32; 2]>>,
}

impl TraceFrame {
    pub fn frame_size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    pub fn landmarks(&self) -> Option<Vec<Landmark>> {
        self.hand
            .as_ref()
            .map(|points| points.iter().map(|p| Landmark::new(p[0], p[1])).collect())
    }
}

/// Collect every .jsonl trace under the input directory, sorted for a
/// deterministic replay order.
pub fn find_trace_files(input_dir: &str) -> Vec<PathBuf> {
    let mut traces: Vec<PathBuf> = WalkDir::new(input_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("jsonl"))
        })
        .map(|e| e.into_path())
        .collect();

    traces.sort();
    info!("Found {} trace files", traces.len());
    traces
}

pub fn read_trace(path: &Path) -> Result<Vec<TraceFrame>> {
    let file =
        File::open(path).with_context(|| format!("opening trace {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut frames = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: TraceFrame = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed trace frame", path.display(), lineno + 1))?;
        frames.push(frame);
    }
    Ok(frames)
}
