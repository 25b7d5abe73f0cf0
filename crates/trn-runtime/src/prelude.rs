//! TRN Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use trn_runtime::prelude::*;
//! ```

// Re-export the engine
pub use crate::engine::{
    adapt, AdaptConfig, Adaptation, AdaptationEngine, ScheduledParameter, StepReport,
};

// Re-export observers
pub use crate::observer::{AdaptObserver, NoopObserver, RecordingObserver, Tee, TracingObserver};

// Re-export datasets
pub use crate::dataset::{load_delimited, square_manifold, DatasetSpec};

// Re-export metrics and export
pub use crate::metrics::NetworkMetrics;
pub use crate::export::{ExportMetadata, ExportedEdge, ExportedPointer, NetworkExport};

// Re-export from core
pub use trn_core::prelude::*;
