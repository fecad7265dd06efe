//! Sweep execution.
//!
//! Combinations are screened with the window rule at the last trace of the
//! gather, the cheapest check that rejects most unusable parameter sets,
//! before anything is allocated. Survivors are synthesized and written under
//! consecutive artifact numbers until `max_artifacts` have been generated.
//!
//! Two drivers share that pipeline:
//! * [`SweepDriver::run`] walks the enumeration in order, so artifact `n` is
//!   always the `n`-th accepted combination.
//! * [`SweepDriver::run_parallel`] spreads positions over a worker pool and
//!   admits writes through atomic counters. The cap counts successful writes
//!   exactly, but which combinations fill it depends on scheduling.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::params::{ParameterError, SynthesisParameters};
use crate::storage::MatrixStore;
use crate::sweep::config::SweepConfig;
use crate::sweep::report::{ArtifactRecord, FailedArtifact, SweepReport};
use crate::sweep::SweepError;
use crate::synthesis::{synthesize_gather, EdgeWindow, Trace};

/// Window of the longest trace a gather would contain.
///
/// Durations grow with trace index, so if this window is invalid every
/// earlier one is too and the gather would come out empty.
pub fn worst_case_window(params: &SynthesisParameters) -> EdgeWindow {
    Trace::new(params, params.num_traces.saturating_sub(1)).window()
}

enum Screening {
    Accept,
    RejectWindow(EdgeWindow),
    RejectInvalid(ParameterError),
}

fn screen(params: &SynthesisParameters) -> Screening {
    if let Err(e) = params.validate() {
        return Screening::RejectInvalid(e);
    }
    let window = worst_case_window(params);
    if window.is_valid() {
        Screening::Accept
    } else {
        Screening::RejectWindow(window)
    }
}

/// Write admission for the parallel sweep.
///
/// `reserved` counts writes that succeeded or are in flight and never exceeds
/// the cap. A failed write hands its reservation back, so only successful
/// writes count toward the cap. Artifact numbers come from a separate counter
/// and are never reused.
struct CapGate {
    cap: usize,
    reserved: AtomicUsize,
    committed: AtomicUsize,
    names: AtomicUsize,
}

impl CapGate {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            reserved: AtomicUsize::new(0),
            committed: AtomicUsize::new(0),
            names: AtomicUsize::new(0),
        }
    }

    /// True once `cap` writes have succeeded.
    fn is_full(&self) -> bool {
        self.committed.load(Ordering::Acquire) >= self.cap
    }

    /// Reserve one write and return its artifact number.
    ///
    /// While every slot is held by an in-flight write this yields until one of
    /// them resolves. Returns `None` once the cap has been filled.
    fn admit(&self) -> Option<usize> {
        loop {
            let claimed = self
                .reserved
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |reserved| {
                    (reserved < self.cap).then_some(reserved + 1)
                });
            if claimed.is_ok() {
                return Some(self.names.fetch_add(1, Ordering::AcqRel));
            }
            if self.is_full() {
                return None;
            }
            std::thread::yield_now();
        }
    }

    fn commit(&self) {
        self.committed.fetch_add(1, Ordering::AcqRel);
    }

    fn release(&self) {
        self.reserved.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Runs a parameter sweep against a [`MatrixStore`].
pub struct SweepDriver<'a, S: MatrixStore> {
    config: &'a SweepConfig,
    store: &'a S,
    progress: Option<ProgressBar>,
}

impl<'a, S: MatrixStore> SweepDriver<'a, S> {
    pub fn new(config: &'a SweepConfig, store: &'a S) -> Self {
        Self {
            config,
            store,
            progress: None,
        }
    }

    /// Advance `progress` by one for every generated artifact.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sequential sweep in enumeration order.
    pub fn run(&self) -> Result<SweepReport, SweepError> {
        self.config.validate()?;
        let mut combinations = self.config.ranges.combinations()?;
        let cap = self.config.max_artifacts;
        let report = SweepReport::new(combinations.len(), cap);

        info!(
            "Sweeping {} combinations, generating at most {cap}",
            report.total_combinations
        );
        if cap == 0 {
            return Ok(self.finish(SweepReport {
                cap_reached: true,
                ..report
            }));
        }

        let outcome = combinations.try_fold(report, |mut report, (position, params)| {
            report.enumerated += 1;
            match screen(&params) {
                Screening::Accept => {
                    match self.generate(report.generated, position, &params) {
                        Ok(record) => report.record_artifact(record),
                        Err(failure) => report.failures.push(failure),
                    }
                    if report.generated >= cap {
                        report.cap_reached = true;
                        return ControlFlow::Break(report);
                    }
                }
                Screening::RejectWindow(window) => {
                    log_window_rejection(position, &window);
                    report.rejected_window += 1;
                }
                Screening::RejectInvalid(e) => {
                    debug!("Skipping combination {position}: {e}");
                    report.rejected_invalid += 1;
                }
            }
            ControlFlow::Continue(report)
        });

        let report = match outcome {
            ControlFlow::Break(report) | ControlFlow::Continue(report) => report,
        };
        Ok(self.finish(report))
    }

    /// Parallel sweep on a dedicated pool of `jobs` workers (all cores when
    /// `None`).
    ///
    /// A storage failure does not count toward the cap; the sweep keeps going
    /// until `max_artifacts` writes succeed or the combinations run out. The
    /// failed artifact number is not reused, so failures leave gaps in the
    /// file names. Records in the report are sorted by artifact number.
    pub fn run_parallel(&self, jobs: Option<usize>) -> Result<SweepReport, SweepError> {
        self.config.validate()?;
        let total = self.config.ranges.combination_count()?;
        let cap = self.config.max_artifacts;
        let workers = jobs.unwrap_or_else(num_cpus::get).max(1);

        info!("Sweeping {total} combinations on {workers} workers, generating at most {cap}");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;
        let gate = CapGate::new(cap);
        let shared = Mutex::new(SweepReport::new(total, cap));
        let lock = || shared.lock().unwrap_or_else(PoisonError::into_inner);

        pool.install(|| {
            (0..total).into_par_iter().try_for_each(|position| {
                if gate.is_full() {
                    return None;
                }
                let params = self.config.ranges.combination(position);
                match screen(&params) {
                    Screening::Accept => {
                        let index = gate.admit()?;
                        let result = self.generate(index, position, &params);
                        match &result {
                            Ok(_) => gate.commit(),
                            Err(_) => gate.release(),
                        }
                        let mut report = lock();
                        report.enumerated += 1;
                        match result {
                            Ok(record) => report.record_artifact(record),
                            Err(failure) => report.failures.push(failure),
                        }
                    }
                    Screening::RejectWindow(window) => {
                        log_window_rejection(position, &window);
                        let mut report = lock();
                        report.enumerated += 1;
                        report.rejected_window += 1;
                    }
                    Screening::RejectInvalid(e) => {
                        debug!("Skipping combination {position}: {e}");
                        let mut report = lock();
                        report.enumerated += 1;
                        report.rejected_invalid += 1;
                    }
                }
                Some(())
            })
        });

        let mut report = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
        report.cap_reached = gate.is_full();
        report.artifacts.sort_by_key(|record| record.index);
        report.failures.sort_by_key(|failure| failure.position);
        Ok(self.finish(report))
    }

    /// Synthesize and persist one accepted combination as artifact `index`.
    fn generate(
        &self,
        index: usize,
        position: usize,
        params: &SynthesisParameters,
    ) -> Result<ArtifactRecord, FailedArtifact> {
        let path = self.config.artifact_path(index);
        let failed = |error: String| {
            warn!("Failed to generate {}: {error}", path.display());
            FailedArtifact {
                position,
                path: path.clone(),
                error,
            }
        };

        let gather = synthesize_gather(params).map_err(|e| failed(e.to_string()))?;
        self.store
            .store(&gather.data, &path)
            .map_err(|e| failed(e.to_string()))?;

        debug!(
            "Wrote {} ({} live traces)",
            path.display(),
            gather.summary.live_traces()
        );
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }

        Ok(ArtifactRecord {
            index,
            position,
            path: path.clone(),
            parameters: params.clone(),
            live_traces: gather.summary.live_traces(),
        })
    }

    fn finish(&self, report: SweepReport) -> SweepReport {
        if let Some(progress) = &self.progress {
            progress.finish();
        }
        info!(
            "Sweep finished: {} generated, {} failed, {} rejected by window, {} invalid, {} of {} combinations visited",
            report.generated,
            report.failures.len(),
            report.rejected_window,
            report.rejected_invalid,
            report.enumerated,
            report.total_combinations
        );
        report
    }
}

fn log_window_rejection(position: usize, window: &EdgeWindow) {
    debug!(
        "Skipping combination {position} due to invalid n_edge: {} >= {}",
        window.n_edge(),
        window.len() as f64 / 2.0
    );
}
