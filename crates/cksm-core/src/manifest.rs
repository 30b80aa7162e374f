//! Manifest records and the tab-separated line format.
//!
//! One record per line: `<path>\t<checksum>`. Paths containing tabs or
//! newlines cannot be represented; the format does no escaping.

use crate::digest::DIGEST_HEX_LEN;
use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

/// One path/checksum pair, the unit exchanged between computation,
/// serialization and verification. Two records are equal when both fields are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub path: String,
    pub checksum: String,
}

impl ManifestRecord {
    pub fn new(path: impl Into<String>, checksum: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            checksum: checksum.into(),
        }
    }
}

/// Failure while reading or parsing a manifest.
#[derive(Debug)]
pub enum ManifestError {
    /// Underlying read failed mid-manifest.
    Io(io::Error),
    /// A line did not parse into `path TAB checksum` with a well-sized digest.
    Format { line: usize, detail: String },
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Io(e) => write!(f, "manifest read failed: {}", e),
            ManifestError::Format { line, detail } => {
                write!(f, "manifest line {}: {}", line, detail)
            }
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::Io(e) => Some(e),
            ManifestError::Format { .. } => None,
        }
    }
}

/// Serialize a record to one manifest line, without the trailing newline
/// (the sink appends it).
pub fn serialize_record(record: &ManifestRecord) -> String {
    format!("{}\t{}", record.path, record.checksum)
}

/// Parse one manifest line. Trailing whitespace is stripped; the line must
/// split on a tab into exactly two fields, and the checksum field must have
/// the digest's hex length. `line_no` is 1-based and only used in errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<ManifestRecord, ManifestError> {
    let line = line.trim_end();
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 2 {
        return Err(ManifestError::Format {
            line: line_no,
            detail: format!("expected 2 tab-separated fields, got {}", fields.len()),
        });
    }
    if fields[1].len() != DIGEST_HEX_LEN {
        return Err(ManifestError::Format {
            line: line_no,
            detail: format!(
                "checksum must be {} hex chars, got {}",
                DIGEST_HEX_LEN,
                fields[1].len()
            ),
        });
    }
    Ok(ManifestRecord::new(fields[0], fields[1]))
}

/// Streaming reader over a manifest file; yields one parsed record per line.
pub struct ManifestReader {
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl ManifestReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("open manifest {}", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

impl Iterator for ManifestReader {
    type Item = Result<ManifestRecord, ManifestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(ManifestError::Io(e))),
        };
        self.line_no += 1;
        Some(parse_line(&line, self.line_no))
    }
}
