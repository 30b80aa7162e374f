//! CLI for the cksm checksum manifest tool.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cksm_core::config;
use cksm_core::digest::Digester;
use std::path::PathBuf;

use commands::{run_compute, run_verify};

/// Compute checksums for files and directories, or verify a manifest.
#[derive(Debug, Parser)]
#[command(name = "cksm")]
#[command(version)]
#[command(about = "Calculates and verifies SHA-1 checksum manifests", long_about = None)]
#[command(after_help = "Examples:

    Hash one file and print the record on the console
        cksm --file archive.tar

    Hash a directory tree and save the manifest next to it
        cksm --directory backup --output backup.sha1

    Check a tree against a previously saved manifest
        cksm --verify backup.sha1
")]
pub struct Cli {
    /// File to hash; may be given multiple times.
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Directory to hash recursively; may be given multiple times.
    #[arg(short, long = "directory", value_name = "PATH")]
    pub directories: Vec<PathBuf>,

    /// Also write the manifest to this file (console output is kept).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Verify checksums from a previously written manifest.
    #[arg(
        short,
        long,
        value_name = "MANIFEST",
        conflicts_with_all = ["files", "directories", "output"]
    )]
    pub verify: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let digester = match cfg.chunk_bytes {
            Some(n) => Digester::with_chunk_bytes(n),
            None => Digester::default(),
        };

        if let Some(manifest) = &cli.verify {
            return run_verify(manifest, &digester);
        }
        if cli.files.is_empty() && cli.directories.is_empty() {
            // No mode selected: show usage, do no work.
            Cli::command().print_help()?;
            return Ok(());
        }
        run_compute(&cli.files, &cli.directories, cli.output.as_deref(), &digester)
    }
}
