//! Append-only results file. Each run appends one [`BenchmarkResult`] plus
//! the environment it ran under, read-modify-write with an atomic
//! write-then-rename so a crash or concurrent run never truncates or
//! corrupts prior entries.

use crate::cpu_info::CpuInfo;
use crate::error::ResultsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    pub producer_count: usize,
    /// Ring capacity in bytes (`queue_size_elements * size_of::<OrderEvent>()`), not element count.
    #[serde(rename = "queueSize")]
    pub queue_size_bytes: u64,
    /// Every pop attempt the consumer made, successful or not.
    pub total_pops: u64,
    /// The subset of `total_pops` that returned a value.
    pub successful_pops: u64,
    pub duration_secs: u64,
    pub events_pushed: u64,
    pub events_rejected_full: u64,
    pub throughput_events_per_sec: f64,
    pub unix_timestamp_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsFile {
    pub benchmark_results: Vec<BenchmarkResult>,
    pub cpu_info: Option<CpuInfo>,
}

impl Default for ResultsFile {
    fn default() -> Self {
        Self {
            benchmark_results: Vec::new(),
            cpu_info: None,
        }
    }
}

/// Reads the existing results file at `path` if present, appends `result`,
/// stamps (or re-stamps) the environment info, and writes the file back
/// atomically via a sibling temp file + rename.
pub fn append_result(
    path: &Path,
    result: BenchmarkResult,
    cpu_info: &CpuInfo,
) -> Result<(), ResultsError> {
    let mut file = read_existing(path)?;
    file.benchmark_results.push(result);
    file.cpu_info = Some(cpu_info.clone());

    let serialized = serde_json::to_vec_pretty(&file).map_err(|source| ResultsError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, serialized).map_err(|source| ResultsError::Write {
        path: tmp_path.display().to_string(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| ResultsError::Write {
        path: path.display().to_string(),
        source,
    })?;

    Ok(())
}

fn read_existing(path: &Path) -> Result<ResultsFile, ResultsError> {
    match fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| ResultsError::Parse {
            path: path.display().to_string(),
            source,
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ResultsFile::default()),
        Err(source) => Err(ResultsError::Read {
            path: path.display().to_string(),
            source,
        }),
    }
}
