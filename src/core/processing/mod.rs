//! Consumer-side processing of evaluated scenes: dB conversion, no-data and
//! noise masking, and display scaling for quicklooks.
pub mod autoscale;
pub mod ops;
