//! Output sinks for manifest records and verification verdicts.
//!
//! Comments (summary lines, separators) are human-readable and never written
//! to a manifest file, so a saved manifest stays machine-parseable.

use crate::manifest::{serialize_record, ManifestRecord};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Destination for computed manifest records.
pub trait RecordSink {
    fn write_record(&mut self, record: &ManifestRecord) -> Result<()>;
    fn write_comment(&mut self, text: &str) -> Result<()>;
    /// Flush and release any held resource. Called on every exit path of the
    /// compute workflow, success or failure.
    fn close(&mut self) -> Result<()>;
}

/// Destination for per-record verification verdicts.
pub trait VerdictSink {
    fn write_success(&mut self, record: &ManifestRecord) -> Result<()>;
    fn write_failure(&mut self, record: &ManifestRecord) -> Result<()>;
    fn write_comment(&mut self, text: &str) -> Result<()>;
}

/// Console-only sink; records and comments go to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl RecordSink for ConsoleSink {
    fn write_record(&mut self, record: &ManifestRecord) -> Result<()> {
        println!("{}", serialize_record(record));
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl VerdictSink for ConsoleSink {
    fn write_success(&mut self, record: &ManifestRecord) -> Result<()> {
        println!("OK\t{}", record.path);
        Ok(())
    }

    fn write_failure(&mut self, record: &ManifestRecord) -> Result<()> {
        println!("ERR\t{}", record.path);
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }
}

/// Sink that echoes everything to the console and additionally writes record
/// lines to a manifest file. Comments stay console-only.
pub struct FileSink {
    console: ConsoleSink,
    out: BufWriter<File>,
}

impl FileSink {
    /// Create (truncate) the manifest file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("create output {}", path.display()))?;
        Ok(Self {
            console: ConsoleSink::new(),
            out: BufWriter::new(file),
        })
    }
}

impl RecordSink for FileSink {
    fn write_record(&mut self, record: &ManifestRecord) -> Result<()> {
        self.console.write_record(record)?;
        writeln!(self.out, "{}", serialize_record(record)).context("write output file")?;
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        RecordSink::write_comment(&mut self.console, text)
    }

    fn close(&mut self) -> Result<()> {
        self.out.flush().context("flush output file")?;
        Ok(())
    }
}
