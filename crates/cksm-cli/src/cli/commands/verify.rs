//! Verify command: check a tree against a saved manifest.

use anyhow::Result;
use cksm_core::digest::Digester;
use cksm_core::manifest::ManifestReader;
use cksm_core::sink::ConsoleSink;
use cksm_core::verify;
use std::path::Path;

/// Recompute every record in `manifest` and print OK/ERR verdicts.
pub fn run_verify(manifest: &Path, digester: &Digester) -> Result<()> {
    let reader = ManifestReader::open(manifest)?;
    let mut sink = ConsoleSink::new();
    let summary = verify::run(reader, digester, &mut sink)?;
    tracing::info!(
        "verified {} records, all_valid={}",
        summary.count,
        summary.all_valid
    );
    Ok(())
}
