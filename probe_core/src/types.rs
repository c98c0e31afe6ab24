//! Fundamental types used across the entire workspace.

use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Scalar types: f64 throughout, matching the precision of the host matrices.
// ---------------------------------------------------------------------------

/// Resolved 4x4 homogeneous world transform of a node.
pub type WorldMatrix = Matrix4<f64>;

/// A 3D position sample (millimeters).
pub type Position = Vector3<f64>;

/// Hard ceiling on the number of samples collected in endless mode.
/// Endless collection is bounded-but-large so memory growth stays capped.
pub const ENDLESS_SAMPLE_CAP: usize = 200_000;

// ---------------------------------------------------------------------------
// Identifier types — newtype wrappers so handles are never confused
// ---------------------------------------------------------------------------

/// Opaque handle to a transform node in the host scene graph.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

/// Opaque subscription handle returned by the host on subscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObserverToken(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Host notification kinds a sampling run can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformEvent {
    /// The node's transform (or one of its ancestors) changed.
    TransformModified,
}
