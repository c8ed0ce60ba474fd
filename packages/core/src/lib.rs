// Library root — exposes internal modules for integration tests in `tests/`.
// Production entry point remains `src/main.rs`.

pub mod alerts;
pub mod config;
pub mod error;
pub mod job;
pub mod lists;
pub mod services;
pub mod summary;

// Only needed by the binary.
pub mod cli;
pub mod logging;
