//! Path enumeration: explicit files plus recursively expanded directories.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Ordered collection of paths to hash: explicit files first, then each
/// directory expanded recursively. Built once per invocation and consumed
/// once via [`PathQueue::into_paths`].
#[derive(Debug, Default)]
pub struct PathQueue {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
}

impl PathQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single file, kept verbatim in insertion order.
    pub fn push_file(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    /// Append a directory to expand depth-first when the queue is consumed.
    pub fn push_directory(&mut self, path: impl Into<PathBuf>) {
        self.directories.push(path.into());
    }

    /// Consume the queue into a lazy, single-pass path iterator.
    pub fn into_paths(self) -> Paths {
        Paths {
            files: self.files.into_iter(),
            directories: self.directories.into_iter(),
            pending_dirs: Vec::new(),
            pending_files: VecDeque::new(),
        }
    }
}

impl IntoIterator for PathQueue {
    type Item = io::Result<PathBuf>;
    type IntoIter = Paths;

    fn into_iter(self) -> Paths {
        self.into_paths()
    }
}

/// Lazy depth-first walk over a [`PathQueue`]. Yields explicit files first in
/// insertion order, then for each directory its files in the filesystem's
/// native enumeration order followed by its subdirectories, recursively.
/// Only one directory's entries are held in memory at a time.
///
/// Walk errors (unreadable directory, failed entry) are yielded as `Err`
/// items; the iterator does not catch them.
#[derive(Debug)]
pub struct Paths {
    files: std::vec::IntoIter<PathBuf>,
    directories: std::vec::IntoIter<PathBuf>,
    // LIFO stack of directories awaiting descent (depth-first).
    pending_dirs: Vec<PathBuf>,
    // Files of the most recently listed directory.
    pending_files: VecDeque<PathBuf>,
}

impl Paths {
    /// List one directory: queue its files, stack its subdirectories so the
    /// nearest one is descended into first.
    fn enter(&mut self, dir: &Path) -> io::Result<()> {
        let mut subdirs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                subdirs.push(entry.path());
            } else {
                // Symlinks are not followed into; they count as files.
                self.pending_files.push_back(entry.path());
            }
        }
        // Reversed so the LIFO stack pops subdirectories in listed order.
        while let Some(d) = subdirs.pop() {
            self.pending_dirs.push(d);
        }
        Ok(())
    }
}

impl Iterator for Paths {
    type Item = io::Result<PathBuf>;

    fn next(&mut self) -> Option<io::Result<PathBuf>> {
        if let Some(p) = self.files.next() {
            return Some(Ok(p));
        }
        loop {
            if let Some(p) = self.pending_files.pop_front() {
                return Some(Ok(p));
            }
            let dir = match self.pending_dirs.pop() {
                Some(d) => d,
                None => self.directories.next()?,
            };
            if let Err(e) = self.enter(&dir) {
                return Some(Err(e));
            }
        }
    }
}
