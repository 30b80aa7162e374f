pub mod config;
pub mod logging;

pub mod compute;
pub mod digest;
pub mod manifest;
pub mod sink;
pub mod verify;
pub mod walk;
