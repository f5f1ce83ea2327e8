//! Locate and rewrite image values inside YAML/JSON config documents.
//!
//! Targets are processed in order. The first target whose value is already
//! the requested one stops the run (`MutationOutcome::AlreadySet`); writes
//! made for earlier targets are not undone. Multi-document updates are
//! best-effort and non-transactional.

mod document;
mod error;
mod key_path;

use std::fmt;
use std::path::{Path, PathBuf};

pub use document::CurrentValue;
use document::Document;
pub use error::{DocumentError, Result};
pub use key_path::{KeyPath, KeyPathError};

/// Serialization format of the config documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// File extensions tried when a document name is given without one.
    fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Yaml => &["yaml", "yml"],
            Self::Json => &["json"],
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        })
    }
}

/// One (document, key) pair to update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTarget {
    pub document: String,
    pub key: KeyPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedChange {
    pub path: PathBuf,
    pub key: KeyPath,
    pub previous: CurrentValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Every target was rewritten.
    Applied(Vec<AppliedChange>),
    /// A target already held the value; nothing after it was touched.
    AlreadySet { path: PathBuf, key: KeyPath },
}

/// Resolve the config folder against the working tree root.
///
/// A leading `/` on `folder` is relative to the root, not the filesystem.
pub fn resolve_folder(root: &Path, folder: &str) -> PathBuf {
    let relative = folder.trim_start_matches('/');
    if relative.is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}

/// Find a document by name: `<name>.<ext>` for each format extension, then `<name>` as is.
pub fn locate(folder: &Path, name: &str, format: ConfigFormat) -> Result<PathBuf> {
    let searched: Vec<PathBuf> = format
        .extensions()
        .iter()
        .map(|ext| folder.join(format!("{name}.{ext}")))
        .chain(std::iter::once(folder.join(name)))
        .collect();

    searched
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .ok_or_else(|| {
            DocumentError::NotFound {
                name: name.to_string(),
                searched,
            }
            .into()
        })
}

/// Read the current value of `key` in a document file.
#[cfg(test)]
pub fn read_value(path: &Path, format: ConfigFormat, key: &KeyPath) -> Result<CurrentValue> {
    Ok(load(path, format)?.get(key))
}

/// Apply `new_value` to each target in order.
pub fn mutate(
    root: &Path,
    folder: &str,
    format: ConfigFormat,
    targets: &[ConfigTarget],
    new_value: &str,
) -> Result<MutationOutcome> {
    let folder = resolve_folder(root, folder);
    let mut applied = Vec::with_capacity(targets.len());

    for target in targets {
        let path = locate(&folder, &target.document, format)?;
        let mut doc = load(&path, format)?;

        let previous = doc.get(&target.key);
        if previous.is(new_value) {
            tracing::info!(
                path = %path.display(),
                key = %target.key,
                value = new_value,
                "value already set"
            );
            return Ok(MutationOutcome::AlreadySet {
                path,
                key: target.key.clone(),
            });
        }

        doc.set(&target.key, new_value)
            .map_err(|conflict| DocumentError::InvalidPath {
                path: path.clone(),
                key: target.key.to_string(),
                reason: conflict.0,
            })?;
        store(&path, format, &doc)?;

        tracing::info!(
            path = %path.display(),
            key = %target.key,
            previous = %previous,
            value = new_value,
            "updated config value"
        );
        applied.push(AppliedChange {
            path,
            key: target.key.clone(),
            previous,
        });
    }

    Ok(MutationOutcome::Applied(applied))
}

fn load(path: &Path, format: ConfigFormat) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Document::parse(format, &content).map_err(|message| {
        DocumentError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        }
        .into()
    })
}

fn store(path: &Path, format: ConfigFormat, doc: &Document) -> Result<()> {
    let rendered = doc.render().map_err(|message| DocumentError::Serialize {
        path: path.to_path_buf(),
        format,
        message,
    })?;
    std::fs::write(path, rendered).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
