//! Core building blocks: the evalscript contract, the host-side executor,
//! backscatter processing primitives, and preset-friendly parameters. These
//! are consumed by the high-level `api` module.
pub mod evalscript;
pub mod executor;
pub mod params;
pub mod processing;
