//! CLI command handlers, one per file.

mod compute;
mod verify;

pub use compute::run_compute;
pub use verify::run_verify;
