//! Recording session: the lifecycle controller and sampling state machine.
//!
//! # Lifecycle per run
//! 1. `start` / `start_endless`: clear the series, attach observers,
//!    enter `Collecting`.
//! 2. Each host notification appends one translation sample; the
//!    notification after the target count is reached finalizes.
//! 3. Finalization: detach observers, summarize, write the report,
//!    invoke the result sink, return to `Idle`.
//! 4. `stop` / `stop_endless` force finalization regardless of count.
//!
//! All state is owned by the session for exactly one run at a time, so a
//! prior run can never leak subscriptions into the next one. Everything
//! is single-threaded: the host event loop calls in, each call runs to
//! completion.

use crate::error::ProbeError;
use crate::host::{world_translation, TransformHost};
use crate::observers::ObserverRegistry;
use crate::series::SampleSeries;
use crate::summary::{summarize, PositionMedians};
use crate::types::{NodeId, ENDLESS_SAMPLE_CAP};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Immutable configuration of one sampling run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Number of samples to collect before finalizing.
    pub target_samples: usize,
    /// Report destination; overwritten unconditionally.
    pub output_path: PathBuf,
    /// Register at every ancestor in the parent chain instead of only at
    /// the leaf. Off by default: hosts that propagate child notifications
    /// would otherwise deliver duplicates per change.
    pub observe_ancestors: bool,
}

impl RunConfig {
    /// A bounded run collecting exactly `target_samples` samples.
    pub fn bounded(target_samples: usize, output_path: impl Into<PathBuf>) -> Self {
        Self {
            target_samples,
            output_path: output_path.into(),
            observe_ancestors: false,
        }
    }

    /// An endless run: collects until stopped, capped at
    /// [`ENDLESS_SAMPLE_CAP`] as a memory-safety ceiling.
    pub fn endless(output_path: impl Into<PathBuf>) -> Self {
        Self::bounded(ENDLESS_SAMPLE_CAP, output_path)
    }
}

/// Callback receiving the computed medians once finalization completes.
/// This is the only channel by which results reach the caller.
pub type ResultSink = Box<dyn FnMut(&PositionMedians)>;

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Externally visible session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Collecting,
}

/// Outcome of one notification delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notified {
    /// No run active; the notification was dropped.
    Ignored,
    /// One sample appended; carries the new sample count.
    Sampled(usize),
    /// Target reached: the run finalized and the report was written.
    Finalized,
}

/// One sampling run's worth of state, plus the entry points the host GUI
/// actions map onto.
pub struct RecordingSession {
    state: SessionState,
    node: NodeId,
    config: RunConfig,
    series: SampleSeries,
    observers: ObserverRegistry,
    sink: Option<ResultSink>,
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            node: NodeId::default(),
            config: RunConfig::bounded(0, PathBuf::new()),
            series: SampleSeries::new(),
            observers: ObserverRegistry::new(),
            sink: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_collecting(&self) -> bool {
        self.state == SessionState::Collecting
    }

    /// Samples collected in the current (or most recent) run.
    pub fn sample_count(&self) -> usize {
        self.series.len()
    }

    /// Begin a bounded run on `node`.
    ///
    /// Fails fast with [`ProbeError::RunAlreadyActive`] when a run is
    /// collecting, leaving that run untouched.
    pub fn start<H: TransformHost>(
        &mut self,
        host: &mut H,
        node: NodeId,
        config: RunConfig,
        sink: ResultSink,
    ) -> Result<(), ProbeError> {
        if self.state == SessionState::Collecting {
            return Err(ProbeError::RunAlreadyActive);
        }
        tracing::debug!(node = %node, target_samples = config.target_samples, "sampling run started");
        self.series.clear();
        self.node = node;
        self.sink = Some(sink);
        if let Err(err) = self.observers.attach(host, node, config.observe_ancestors) {
            // a partial chain walk must not leave registrations behind
            let _ = self.observers.detach(host);
            return Err(err);
        }
        self.config = config;
        self.state = SessionState::Collecting;
        Ok(())
    }

    /// Begin an endless run: like [`start`](Self::start) with the hard
    /// sample cap as target.
    pub fn start_endless<H: TransformHost>(
        &mut self,
        host: &mut H,
        node: NodeId,
        output_path: impl Into<PathBuf>,
        sink: ResultSink,
    ) -> Result<(), ProbeError> {
        self.start(host, node, RunConfig::endless(output_path), sink)
    }

    /// Host notification: the observed transform (or an observed
    /// ancestor) changed.
    ///
    /// Safe to deliver after detachment: with no run active the
    /// notification is ignored rather than reentering finalized state.
    pub fn on_transform_modified<H: TransformHost>(
        &mut self,
        host: &mut H,
    ) -> Result<Notified, ProbeError> {
        if self.state != SessionState::Collecting {
            return Ok(Notified::Ignored);
        }
        if self.series.len() == self.config.target_samples {
            tracing::debug!(samples = self.series.len(), "target reached, finalizing");
            self.finalize(host)?;
            return Ok(Notified::Finalized);
        }
        let matrix = host.world_matrix(self.node)?;
        self.series.push(world_translation(&matrix));
        Ok(Notified::Sampled(self.series.len()))
    }

    /// Stop a bounded run.
    ///
    /// No-op when no run is active. Otherwise detaches and, if any
    /// samples were collected, finalizes over the partial series; with
    /// zero samples it only releases the subscriptions.
    pub fn stop<H: TransformHost>(&mut self, host: &mut H) -> Result<(), ProbeError> {
        if self.state != SessionState::Collecting {
            return Ok(());
        }
        self.detach_and_idle(host)?;
        if !self.series.is_empty() {
            self.summarize_and_emit()?;
        }
        Ok(())
    }

    /// Stop an endless run.
    ///
    /// No-op when no run is active. Unlike [`stop`](Self::stop) this
    /// always invokes the summarizer, so zero collected samples surface
    /// [`ProbeError::EmptySeries`] (and no report is written).
    pub fn stop_endless<H: TransformHost>(&mut self, host: &mut H) -> Result<(), ProbeError> {
        if self.state != SessionState::Collecting {
            return Ok(());
        }
        self.detach_and_idle(host)?;
        self.summarize_and_emit()
    }

    /// Natural end of a run: detach, then summarize/write/notify.
    fn finalize<H: TransformHost>(&mut self, host: &mut H) -> Result<(), ProbeError> {
        self.detach_and_idle(host)?;
        self.summarize_and_emit()
    }

    /// Release subscriptions and leave `Collecting`. Runs before any
    /// fallible summarization step.
    fn detach_and_idle<H: TransformHost>(&mut self, host: &mut H) -> Result<(), ProbeError> {
        self.state = SessionState::Idle;
        self.observers.detach(host)
    }

    /// Summarize the series, persist the report, then fire the sink.
    /// The sink only ever observes results that reached disk.
    fn summarize_and_emit(&mut self) -> Result<(), ProbeError> {
        let medians = summarize(&self.series)?;
        crate::report::write_report(&self.config.output_path, &medians, &self.series)?;
        tracing::debug!(
            samples = self.series.len(),
            path = %self.config.output_path.display(),
            "report written"
        );
        if let Some(sink) = self.sink.as_mut() {
            sink(&medians);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
