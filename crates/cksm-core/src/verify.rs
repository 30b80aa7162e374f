//! Verify workflow: recompute digests for manifest records and report verdicts.

use crate::digest::Digester;
use crate::manifest::{ManifestError, ManifestRecord};
use crate::sink::VerdictSink;
use anyhow::Result;
use std::path::Path;
use std::time::{Duration, Instant};

/// Trailing accounting for one verify run.
#[derive(Debug, Clone, Copy)]
pub struct VerifySummary {
    pub count: u64,
    pub all_valid: bool,
    pub elapsed: Duration,
}

/// Recompute the digest for each record and compare it to the recorded
/// checksum (exact, case-sensitive). An unreadable file is a mismatch for
/// that record, not a fatal abort: independently failing files must not mask
/// each other's verdicts. A malformed or unreadable manifest line does abort
/// the run; no summary is written in that case.
pub fn run<R, S>(records: R, digester: &Digester, sink: &mut S) -> Result<VerifySummary>
where
    R: IntoIterator<Item = Result<ManifestRecord, ManifestError>>,
    S: VerdictSink + ?Sized,
{
    let start = Instant::now();
    let mut count: u64 = 0;
    let mut all_valid = true;

    for record in records {
        let record = record?;
        match digester.digest_path(Path::new(&record.path)) {
            Ok(actual) if actual == record.checksum => sink.write_success(&record)?,
            Ok(_) => {
                sink.write_failure(&record)?;
                all_valid = false;
            }
            Err(err) => {
                tracing::warn!("digest failed for {}: {:#}", record.path, err);
                sink.write_failure(&record)?;
                all_valid = false;
            }
        }
        count += 1;
    }

    let elapsed = start.elapsed();
    sink.write_comment("--------------")?;
    sink.write_comment(&format!("All valid:\t\t\t{}", all_valid))?;
    sink.write_comment(&format!("Calculated hashes:\t{}", count))?;
    sink.write_comment(&format!("Time:\t\t\t\t{:.3} s", elapsed.as_secs_f64()))?;

    tracing::debug!("verified {} records in {:?}, all_valid={}", count, elapsed, all_valid);
    Ok(VerifySummary {
        count,
        all_valid,
        elapsed,
    })
}
