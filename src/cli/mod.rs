//! Command Line Interface (CLI) layer for SARSEL.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the three flows: emitting a
//! Process API request payload, evaluating a scene locally, and rendering
//! backscatter quicklooks.
//!
//! If you are embedding SARSEL into another application, prefer using the
//! high-level `sarsel::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
