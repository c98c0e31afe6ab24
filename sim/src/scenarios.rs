//! Scenario definitions.
//!
//! Each scenario is a named tool/jitter configuration plus a parent-chain
//! depth (reference frame → tracker → tool). Deterministic given a seed.

use crate::jitter::JitterParams;
use serde::{Deserialize, Serialize};

/// Which pre-defined scenario to load.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenarioKind {
    /// Rigidly mounted tool, small jitter, no drift
    StaticTool,
    /// Mounted tool with slow thermal drift
    DriftingTool,
    /// Handheld tool: large jitter, occasional dropped frames
    Handheld,
}

/// A fully configured simulation scenario.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub params: JitterParams,
    /// Ancestors above the tool node (reference chain length)
    pub chain_depth: usize,
}

impl Scenario {
    /// Build the named scenario.
    pub fn build(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::StaticTool => Self {
                name: "static_tool".into(),
                params: JitterParams {
                    noise_std: 0.2,
                    ..Default::default()
                },
                chain_depth: 2,
            },
            ScenarioKind::DriftingTool => Self {
                name: "drifting_tool".into(),
                params: JitterParams {
                    noise_std: 0.2,
                    drift_per_tick: [0.001, 0.0005, 0.0],
                    ..Default::default()
                },
                chain_depth: 2,
            },
            ScenarioKind::Handheld => Self {
                name: "handheld".into(),
                params: JitterParams {
                    noise_std: 1.5,
                    drop_probability: 0.05,
                    ..Default::default()
                },
                chain_depth: 3,
            },
        }
    }
}
