//! Host abstraction: the scene-graph surface a sampling run talks to.
//!
//! The real host owns the transform nodes and the event dispatch; this
//! trait reduces it to the four capabilities a run needs. Event delivery
//! is inverted: the host (or the simulator standing in for it) calls
//! [`crate::session::RecordingSession::on_transform_modified`] once per
//! observed change, synchronously, on its own event loop thread.

use crate::error::ProbeError;
use crate::types::{NodeId, ObserverToken, Position, TransformEvent, WorldMatrix};

/// Capability surface of the host scene graph.
pub trait TransformHost {
    /// Resolved world-space matrix of `node` at query time.
    fn world_matrix(&self, node: NodeId) -> Result<WorldMatrix, ProbeError>;

    /// Parent transform link of `node`; `None` terminates the chain.
    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, ProbeError>;

    /// Register interest in `event` on `node`. The returned token is the
    /// only way to release the registration.
    fn subscribe(&mut self, node: NodeId, event: TransformEvent)
        -> Result<ObserverToken, ProbeError>;

    /// Release a registration previously produced by [`subscribe`](Self::subscribe).
    fn unsubscribe(&mut self, node: NodeId, token: ObserverToken) -> Result<(), ProbeError>;
}

/// Translation components of a world matrix: row-major elements
/// (0,3), (1,3), (2,3).
pub fn world_translation(matrix: &WorldMatrix) -> Position {
    Position::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_reads_last_column() {
        let mut m = WorldMatrix::identity();
        m[(0, 3)] = 1.5;
        m[(1, 3)] = -2.0;
        m[(2, 3)] = 30.0;
        let t = world_translation(&m);
        assert_eq!((t.x, t.y, t.z), (1.5, -2.0, 30.0));
    }
}
