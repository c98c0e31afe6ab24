//! Observer registry: subscription bookkeeping for one sampling run.
//!
//! # Registration policy
//! - Default: register the transform-modified handler at the leaf node of
//!   interest only. Hosts deliver one notification per observed change.
//! - Opt-in (`observe_ancestors`): walk the parent chain and register at
//!   every ancestor, for hosts that do not propagate child notifications.
//!   The registry then holds one registration per chain level.

use crate::error::ProbeError;
use crate::host::TransformHost;
use crate::types::{NodeId, ObserverToken, TransformEvent};

/// One (node, token) pair produced by a subscribe call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObserverRegistration {
    pub node: NodeId,
    pub token: ObserverToken,
}

/// Records every active registration of the current run and releases them
/// all on detach.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    registrations: Vec<ObserverRegistration>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active registrations.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Subscribe the transform-modified event starting at `leaf`.
    ///
    /// With `observe_ancestors` the walk continues through the parent
    /// chain until the first node without a parent. Returns the number of
    /// registrations now held.
    pub fn attach<H: TransformHost>(
        &mut self,
        host: &mut H,
        leaf: NodeId,
        observe_ancestors: bool,
    ) -> Result<usize, ProbeError> {
        let mut node = Some(leaf);
        while let Some(n) = node {
            let token = host.subscribe(n, TransformEvent::TransformModified)?;
            tracing::debug!(node = %n, "observer attached");
            self.registrations.push(ObserverRegistration { node: n, token });
            if !observe_ancestors {
                break;
            }
            node = host.parent(n)?;
        }
        Ok(self.registrations.len())
    }

    /// Release every recorded registration and clear the record.
    ///
    /// Best-effort: a node that died mid-run does not leave later
    /// registrations attached; the first failure is reported after the
    /// sweep. Calling detach again is a no-op.
    pub fn detach<H: TransformHost>(&mut self, host: &mut H) -> Result<(), ProbeError> {
        if self.registrations.is_empty() {
            return Ok(());
        }
        tracing::debug!(count = self.registrations.len(), "detaching observers");
        let mut first_err = None;
        for reg in self.registrations.drain(..) {
            if let Err(err) = host.unsubscribe(reg.node, reg.token) {
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
