//! `sim` — Simulated tracking host: transform scene, pose jitter, driver.

pub mod driver;
pub mod jitter;
pub mod scenarios;
pub mod scene;

pub use driver::SessionDriver;
pub use jitter::{JitterParams, PoseJitter};
pub use scenarios::{Scenario, ScenarioKind};
pub use scene::SimScene;
