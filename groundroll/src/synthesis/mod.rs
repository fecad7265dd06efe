//! Per-trace synthesis and gather assembly

pub mod chirp;
pub mod gather;
pub mod trace;
pub mod window;

pub use chirp::{chirp_len, linear_chirp};
pub use gather::{synthesize_gather, synthesize_gather_parallel, GatherSummary, SynthesizedGather};
pub use trace::{place_signal, Placement, Trace, TraceOutcome};
pub use window::EdgeWindow;
