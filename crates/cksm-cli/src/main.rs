use cksm_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Log to a file so stdout stays clean for manifest output; fall back to
    // stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("cksm error: {:#}", err);
        std::process::exit(1);
    }
}
