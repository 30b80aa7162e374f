//! Compute command: hash the requested files and directories.

use anyhow::Result;
use cksm_core::compute;
use cksm_core::digest::Digester;
use cksm_core::sink::{ConsoleSink, FileSink};
use cksm_core::walk::PathQueue;
use std::path::{Path, PathBuf};

/// Hash every requested path and emit the manifest on the console, teeing
/// records into `output` when given.
pub fn run_compute(
    files: &[PathBuf],
    directories: &[PathBuf],
    output: Option<&Path>,
    digester: &Digester,
) -> Result<()> {
    let mut queue = PathQueue::new();
    for file in files {
        queue.push_file(file);
    }
    for dir in directories {
        queue.push_directory(dir);
    }

    let summary = match output {
        Some(path) => {
            let mut sink = FileSink::create(path)?;
            compute::run(queue, digester, &mut sink)?
        }
        None => {
            let mut sink = ConsoleSink::new();
            compute::run(queue, digester, &mut sink)?
        }
    };
    tracing::info!("wrote {} manifest records", summary.count);
    Ok(())
}
