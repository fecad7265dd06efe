//! Dataset generation by sweeping gather parameters.
//!
//! A sweep walks the Cartesian product of eleven parameter lists, screens
//! each combination with a cheap window check, synthesizes the survivors and
//! persists them under sequential artifact names until a generation cap is
//! reached.

pub mod config;
pub mod driver;
pub mod grid;
pub mod report;

use thiserror::Error;

pub use config::SweepConfig;
pub use driver::{worst_case_window, SweepDriver};
pub use grid::{Combinations, ParameterRanges};
pub use report::{ArtifactRecord, FailedArtifact, SweepReport};

/// Errors that abort a sweep before or after the enumeration itself.
///
/// Per-artifact storage failures are not in here; they are recorded in the
/// [`SweepReport`] and the sweep carries on.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Parameter range '{0}' is empty")]
    EmptyRange(&'static str),
    #[error("Parameter space has more combinations than fit in usize")]
    TooManyCombinations,
    #[error("Artifact file prefix must not be empty")]
    EmptyPrefix,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
