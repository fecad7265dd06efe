//! Synthetic ground-roll seismic noise generation.
//!
//! Builds dispersive surface-wave gathers (time samples × traces) from a small
//! set of kinematic parameters and sweeps those parameters to produce training
//! datasets. Gathers are plain `ndarray::Array2<f64>` values and are persisted
//! through the [`storage::MatrixStore`] interface.

pub mod params;
pub mod shared_args;
pub mod storage;
pub mod sweep;
pub mod synthesis;

pub use params::{ParameterError, SynthesisParameters};
pub use storage::{MatrixStore, NpyStore, StorageError};
pub use sweep::{ParameterRanges, SweepConfig, SweepDriver, SweepError, SweepReport};
pub use synthesis::{synthesize_gather, synthesize_gather_parallel, GatherSummary, SynthesizedGather};
