//! In-memory transform scene graph: the simulator's stand-in for the host.
//!
//! Nodes form parent chains; each node carries a local transform and the
//! world matrix is composed root-down at query time. Subscription
//! bookkeeping mimics the host's observer tags: subscribe hands out a
//! token, unsubscribe releases it, destroyed nodes answer every access
//! with an invalid-reference error.

use probe_core::error::ProbeError;
use probe_core::host::TransformHost;
use probe_core::types::{NodeId, ObserverToken, Position, TransformEvent, WorldMatrix};

struct SimNode {
    local: WorldMatrix,
    parent: Option<NodeId>,
    alive: bool,
    observers: Vec<(ObserverToken, TransformEvent)>,
}

/// A small scene graph implementing [`TransformHost`].
#[derive(Default)]
pub struct SimScene {
    nodes: Vec<SimNode>,
    next_token: u64,
}

impl SimScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with an identity local transform under `parent`.
    pub fn add_node(&mut self, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(SimNode {
            local: WorldMatrix::identity(),
            parent,
            alive: true,
            observers: Vec::new(),
        });
        id
    }

    /// Set the translation part of a node's local transform.
    pub fn set_local_translation(&mut self, node: NodeId, t: Position) {
        if let Ok(n) = self.node_mut(node) {
            n.local[(0, 3)] = t.x;
            n.local[(1, 3)] = t.y;
            n.local[(2, 3)] = t.z;
        }
    }

    /// Mark a node destroyed; all later access yields `InvalidReference`.
    pub fn destroy_node(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.get_mut(node.0 as usize) {
            n.alive = false;
            n.observers.clear();
        }
    }

    /// Active observer registrations on one node.
    pub fn observer_count(&self, node: NodeId) -> usize {
        self.nodes
            .get(node.0 as usize)
            .map_or(0, |n| n.observers.len())
    }

    fn node(&self, id: NodeId) -> Result<&SimNode, ProbeError> {
        self.nodes
            .get(id.0 as usize)
            .filter(|n| n.alive)
            .ok_or(ProbeError::InvalidReference(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SimNode, ProbeError> {
        self.nodes
            .get_mut(id.0 as usize)
            .filter(|n| n.alive)
            .ok_or(ProbeError::InvalidReference(id))
    }
}

impl TransformHost for SimScene {
    fn world_matrix(&self, node: NodeId) -> Result<WorldMatrix, ProbeError> {
        // Collect the chain leaf -> root, then compose root-down.
        let mut chain = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let n = self.node(id)?;
            chain.push(id);
            current = n.parent;
        }
        let mut world = WorldMatrix::identity();
        for id in chain.iter().rev() {
            world *= self.node(*id)?.local;
        }
        Ok(world)
    }

    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, ProbeError> {
        Ok(self.node(node)?.parent)
    }

    fn subscribe(
        &mut self,
        node: NodeId,
        event: TransformEvent,
    ) -> Result<ObserverToken, ProbeError> {
        let token = ObserverToken(self.next_token);
        self.next_token += 1;
        self.node_mut(node)?.observers.push((token, event));
        Ok(token)
    }

    fn unsubscribe(&mut self, node: NodeId, token: ObserverToken) -> Result<(), ProbeError> {
        let n = self.node_mut(node)?;
        n.observers.retain(|&(t, _)| t != token);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use probe_core::host::world_translation;

    #[test]
    fn world_matrix_composes_parent_chain() {
        let mut scene = SimScene::new();
        let root = scene.add_node(None);
        let mid = scene.add_node(Some(root));
        let leaf = scene.add_node(Some(mid));

        scene.set_local_translation(root, Position::new(10.0, 0.0, 0.0));
        scene.set_local_translation(mid, Position::new(0.0, 5.0, 0.0));
        scene.set_local_translation(leaf, Position::new(0.0, 0.0, 2.5));

        let t = world_translation(&scene.world_matrix(leaf).unwrap());
        assert_abs_diff_eq!(t.x, 10.0);
        assert_abs_diff_eq!(t.y, 5.0);
        assert_abs_diff_eq!(t.z, 2.5);
    }

    #[test]
    fn destroyed_node_answers_invalid_reference() {
        let mut scene = SimScene::new();
        let node = scene.add_node(None);
        scene.destroy_node(node);
        assert!(matches!(
            scene.world_matrix(node),
            Err(ProbeError::InvalidReference(_))
        ));
        assert!(matches!(
            scene.parent(node),
            Err(ProbeError::InvalidReference(_))
        ));
    }

    #[test]
    fn subscribe_unsubscribe_bookkeeping() {
        let mut scene = SimScene::new();
        let node = scene.add_node(None);
        let a = scene
            .subscribe(node, TransformEvent::TransformModified)
            .unwrap();
        let b = scene
            .subscribe(node, TransformEvent::TransformModified)
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(scene.observer_count(node), 2);
        scene.unsubscribe(node, a).unwrap();
        assert_eq!(scene.observer_count(node), 1);
    }
}
