use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A required directory could not be created. Fatal: without a writable
/// layout nothing downstream can run.
#[derive(Debug, Error)]
#[error("failed to provision directory {path:?}: {source}")]
pub struct ProvisionError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Per-artifact failures. All of these are recoverable at the per-design
/// boundary: the pipeline logs them and moves on to the next design.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transfer of {url} failed: {source}")]
    Transfer {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server returned {status} for {url}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("artifact {path:?} is implausibly small ({len} bytes)")]
    Corrupt { path: PathBuf, len: u64 },

    #[error("failed to decompress {path:?}: {source}")]
    Decompression {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{design}: {missing} of {total} constituent files could not be fetched")]
    PartialAssembly {
        design: String,
        missing: usize,
        total: usize,
    },
}
