//! Config document error types.

use std::path::PathBuf;

use thiserror::Error;

use super::ConfigFormat;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Config document {name} not found (searched: {})", display_paths(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {} as {format}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        format: ConfigFormat,
        message: String,
    },

    #[error("Failed to serialize {} as {format}: {message}", .path.display())]
    Serialize {
        path: PathBuf,
        format: ConfigFormat,
        message: String,
    },

    #[error("Cannot set {key} in {}: {reason}", .path.display())]
    InvalidPath {
        path: PathBuf,
        key: String,
        reason: String,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = anyhow::Result<T>;
