//! Compute workflow: hash every enumerated path and emit manifest records.

use crate::digest::Digester;
use crate::manifest::ManifestRecord;
use crate::sink::RecordSink;
use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Trailing accounting for one compute run.
#[derive(Debug, Clone, Copy)]
pub struct ComputeSummary {
    pub count: u64,
    pub elapsed: Duration,
}

/// Hash each path from `paths` in order and write one record per path to the
/// sink. Aborts on the first failure (walk error, unreadable file, sink write
/// failure), but the trailing summary block and `sink.close()` run on every
/// exit path before the error is surfaced; records already written stay on
/// the sink.
pub fn run<I, S>(paths: I, digester: &Digester, sink: &mut S) -> Result<ComputeSummary>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
    S: RecordSink + ?Sized,
{
    let start = Instant::now();
    let mut count: u64 = 0;

    // The pass runs in a closure so the summary below is written no matter
    // how the pass ends.
    let pass = (|| -> Result<()> {
        for entry in paths {
            let path = entry.context("directory walk failed")?;
            let checksum = digester.digest_path(&path)?;
            let record = ManifestRecord::new(path.display().to_string(), checksum);
            sink.write_record(&record)?;
            count += 1;
        }
        Ok(())
    })();

    let elapsed = start.elapsed();
    if let Err(err) = &pass {
        tracing::warn!("compute aborted after {} records: {:#}", count, err);
    }
    sink.write_comment("--------------")?;
    sink.write_comment(&format!("Calculated hashes:\t{}", count))?;
    sink.write_comment(&format!("Time:\t\t\t\t{:.3} s", elapsed.as_secs_f64()))?;
    sink.close()?;
    pass?;

    tracing::debug!("computed {} checksums in {:?}", count, elapsed);
    Ok(ComputeSummary { count, elapsed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::PathQueue;

    /// Records everything written to it, for asserting workflow output.
    #[derive(Default)]
    struct RecordingSink {
        records: Vec<ManifestRecord>,
        comments: Vec<String>,
        closed: bool,
    }

    impl RecordSink for RecordingSink {
        fn write_record(&mut self, record: &ManifestRecord) -> Result<()> {
            self.records.push(record.clone());
            Ok(())
        }

        fn write_comment(&mut self, text: &str) -> Result<()> {
            self.comments.push(text.to_string());
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            self.closed = true;
            Ok(())
        }
    }

    #[test]
    fn one_record_per_file_with_matching_digests() {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in [("a", "alpha"), ("b", "beta"), ("c", "gamma")] {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let mut queue = PathQueue::new();
        queue.push_directory(dir.path());

        let digester = Digester::default();
        let mut sink = RecordingSink::default();
        let summary = run(queue, &digester, &mut sink).unwrap();

        assert_eq!(summary.count, 3);
        assert_eq!(sink.records.len(), 3);
        assert!(sink.closed);
        for record in &sink.records {
            let expected = digester
                .digest_path(std::path::Path::new(&record.path))
                .unwrap();
            assert_eq!(record.checksum, expected);
        }
    }

    #[test]
    fn empty_queue_yields_summary_with_count_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut queue = PathQueue::new();
        queue.push_directory(dir.path());

        let mut sink = RecordingSink::default();
        let summary = run(queue, &Digester::default(), &mut sink).unwrap();

        assert_eq!(summary.count, 0);
        assert!(sink.records.is_empty());
        assert!(sink.comments.iter().any(|c| c == "Calculated hashes:\t0"));
        assert!(sink.closed);
    }

    #[test]
    fn failure_still_writes_summary_and_closes_sink() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good");
        std::fs::write(&good, b"ok").unwrap();

        let mut queue = PathQueue::new();
        queue.push_file(&good);
        queue.push_file(dir.path().join("missing"));
        queue.push_file(&good); // never reached

        let mut sink = RecordingSink::default();
        let err = run(queue, &Digester::default(), &mut sink).unwrap_err();

        assert!(format!("{:#}", err).contains("missing"));
        // The record before the failure survives; the rest was aborted.
        assert_eq!(sink.records.len(), 1);
        assert!(sink.comments.iter().any(|c| c == "Calculated hashes:\t1"));
        assert!(sink.closed);
    }

    #[test]
    fn explicit_files_are_hashed_before_directory_contents() {
        let dir = tempfile::tempdir().unwrap();
        let lone = dir.path().join("lone");
        std::fs::write(&lone, b"lone").unwrap();
        let tree = dir.path().join("tree");
        std::fs::create_dir(&tree).unwrap();
        std::fs::write(tree.join("inner"), b"inner").unwrap();

        let mut queue = PathQueue::new();
        queue.push_file(&lone);
        queue.push_directory(&tree);

        let mut sink = RecordingSink::default();
        run(queue, &Digester::default(), &mut sink).unwrap();

        assert_eq!(sink.records.len(), 2);
        assert_eq!(sink.records[0].path, lone.display().to_string());
    }
}
