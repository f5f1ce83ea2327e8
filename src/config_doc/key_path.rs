//! Dot-separated search keys such as `image.tag` or `containers.0.image`.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid search key {key:?}: {reason}")]
pub struct KeyPathError {
    pub key: String,
    pub reason: &'static str,
}

/// A parsed, case-sensitive search key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    raw: String,
    segments: Vec<String>,
}

impl KeyPath {
    pub fn parse(raw: &str) -> Result<Self, KeyPathError> {
        if raw.is_empty() {
            return Err(KeyPathError {
                key: raw.to_string(),
                reason: "key is empty",
            });
        }

        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(KeyPathError {
                key: raw.to_string(),
                reason: "key contains an empty segment",
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse a path segment as a sequence index.
pub(super) fn as_index(segment: &str) -> Option<usize> {
    if segment.chars().all(|c| c.is_ascii_digit()) {
        segment.parse().ok()
    } else {
        None
    }
}
