use thiserror::Error;

/// Failures appending a run to the on-disk results file.
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("failed reading existing results file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("existing results file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed writing results file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level failure of the benchmark binary, converted to a process exit
/// code in `main`.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Config(#[from] ringmpsc::ConfigError),
    #[error(transparent)]
    Results(#[from] ResultsError),
}
