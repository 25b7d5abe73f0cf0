//! # TRN Runtime
//!
//! The adaptation engine and everything around a run.
//!
//! The engine is the state machine: it owns the pointers and the learned
//! topology, steps them through a fixed budget under scheduled control
//! parameters, and hands results back. Around it live the input pattern
//! providers, observers for progress reporting, network metrics and the
//! JSON exporter consumed by external renderers.

pub mod engine;
pub mod observer;
pub mod dataset;
pub mod metrics;
pub mod export;
pub mod prelude;
