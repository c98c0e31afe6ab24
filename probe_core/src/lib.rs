//! `probe_core` — Event-driven position sampling for tracked transforms.
//!
//! # Module layout
//! - [`types`]     — Fundamental types (handles, aliases, events)
//! - [`error`]     — Typed run/report errors
//! - [`host`]      — Scene-graph capability trait, translation extraction
//! - [`observers`] — Subscription registry over the parent-transform chain
//! - [`series`]    — Per-axis sample accumulation
//! - [`summary`]   — Per-axis median computation
//! - [`report`]    — CSV report writer
//! - [`session`]   — Lifecycle controller / sampling state machine

pub mod error;
pub mod host;
pub mod observers;
pub mod report;
pub mod series;
pub mod session;
pub mod summary;
pub mod types;

pub use error::ProbeError;
pub use host::{world_translation, TransformHost};
pub use session::{Notified, RecordingSession, ResultSink, RunConfig, SessionState};
pub use summary::PositionMedians;
pub use types::{NodeId, ObserverToken, Position, TransformEvent, WorldMatrix, ENDLESS_SAMPLE_CAP};
