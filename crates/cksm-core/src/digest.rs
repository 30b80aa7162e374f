//! Streaming file digests.
//!
//! Files are read in fixed-size chunks so memory use stays bounded no matter
//! how large the file is; the whole file is never held in memory.

use anyhow::{Context, Result};
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default read chunk size: 1 MiB.
pub const DEFAULT_CHUNK_BYTES: usize = 1024 * 1024;

/// Hex length of the digest (SHA-1, 160 bits).
pub const DIGEST_HEX_LEN: usize = 40;

/// Streaming SHA-1 engine. The chunk size can be overridden via config.toml;
/// the algorithm itself is fixed at compile time (swapping it means changing
/// the hasher type here and `DIGEST_HEX_LEN`, nothing else).
#[derive(Debug, Clone, Copy)]
pub struct Digester {
    chunk_bytes: usize,
}

impl Default for Digester {
    fn default() -> Self {
        Self {
            chunk_bytes: DEFAULT_CHUNK_BYTES,
        }
    }
}

impl Digester {
    /// Engine with a non-default read chunk size (min 1 byte).
    pub fn with_chunk_bytes(chunk_bytes: usize) -> Self {
        Self {
            chunk_bytes: chunk_bytes.max(1),
        }
    }

    /// Compute the digest of the file at `path` and return it as lowercase hex.
    /// The file handle is scoped to this call.
    pub fn digest_path(&self, path: &Path) -> Result<String> {
        let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let mut hasher = Sha1::new();
        let mut buf = vec![0u8; self.chunk_bytes];
        loop {
            let n = f
                .read(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        let digest = hasher.finalize();
        Ok(hex::encode(digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn digest_empty_file() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let digest = Digester::default().digest_path(f.path()).unwrap();
        assert_eq!(digest, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn digest_known_content() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello\n").unwrap();
        f.flush().unwrap();
        let digest = Digester::default().digest_path(f.path()).unwrap();
        assert_eq!(digest, "f572d396fae9206628714fb2ce00f72e94f2258f");
    }

    #[test]
    fn digest_is_lowercase_hex_of_fixed_length() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"some bytes").unwrap();
        f.flush().unwrap();
        let digest = Digester::default().digest_path(f.path()).unwrap();
        assert_eq!(digest.len(), DIGEST_HEX_LEN);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn digest_depends_on_content_not_path() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("deeply-different-name.dat");
        std::fs::write(&a, b"same content").unwrap();
        std::fs::write(&b, b"same content").unwrap();
        let d = Digester::default();
        assert_eq!(d.digest_path(&a).unwrap(), d.digest_path(&b).unwrap());
    }

    #[test]
    fn chunk_size_does_not_change_result() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"spans multiple tiny chunks").unwrap();
        f.flush().unwrap();
        let whole = Digester::default().digest_path(f.path()).unwrap();
        let chunked = Digester::with_chunk_bytes(3).digest_path(f.path()).unwrap();
        assert_eq!(whole, chunked);
    }

    #[test]
    fn digest_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = Digester::default().digest_path(&missing).unwrap_err();
        assert!(format!("{:#}", err).contains("open"));
    }
}
