//! Session driver: the simulated host event loop.
//!
//! Builds the scene chain for a scenario, owns the jitter source, and
//! delivers exactly one transform-modified notification per pose update —
//! the single-notification-per-change contract the sampling handler is
//! written against.

use crate::jitter::PoseJitter;
use crate::scenarios::Scenario;
use crate::scene::SimScene;
use probe_core::error::ProbeError;
use probe_core::session::{Notified, RecordingSession};
use probe_core::types::{NodeId, Position};

/// Scene + jitter glue for one scenario.
pub struct SessionDriver {
    scene: SimScene,
    tool: NodeId,
    jitter: PoseJitter,
}

impl SessionDriver {
    /// Build the reference chain and tool node for `scenario`.
    pub fn from_scenario(scenario: &Scenario, seed: u64) -> Self {
        let mut scene = SimScene::new();
        let mut parent = None;
        for _ in 0..scenario.chain_depth {
            parent = Some(scene.add_node(parent));
        }
        let tool = scene.add_node(parent);
        Self {
            scene,
            tool,
            jitter: PoseJitter::new(scenario.params.clone(), seed),
        }
    }

    /// The tracked tool node (transform of interest).
    pub fn tool(&self) -> NodeId {
        self.tool
    }

    pub fn scene(&self) -> &SimScene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SimScene {
        &mut self.scene
    }

    /// Advance one frame: move the tool and notify the session, or
    /// deliver nothing on a dropped frame.
    pub fn tick(&mut self, session: &mut RecordingSession) -> Result<Notified, ProbeError> {
        match self.jitter.next_pose() {
            Some(pose) => {
                self.set_tool_pose(pose);
                session.on_transform_modified(&mut self.scene)
            }
            None => Ok(Notified::Ignored),
        }
    }

    fn set_tool_pose(&mut self, pose: Position) {
        self.scene.set_local_translation(self.tool, pose);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::ScenarioKind;
    use probe_core::session::RunConfig;
    use probe_core::summary::PositionMedians;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn run_to_completion(
        driver: &mut SessionDriver,
        session: &mut RecordingSession,
    ) -> Result<(), ProbeError> {
        while session.is_collecting() {
            driver.tick(session)?;
        }
        Ok(())
    }

    #[test]
    fn bounded_run_recovers_true_position() {
        let scenario = Scenario::build(ScenarioKind::StaticTool);
        let truth = scenario.params.true_position;
        let noise = scenario.params.noise_std;
        let mut driver = SessionDriver::from_scenario(&scenario, 42);
        let mut session = RecordingSession::new();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("static_run.csv");
        let seen: Rc<RefCell<Option<PositionMedians>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&seen);

        let tool = driver.tool();
        session
            .start(
                driver.scene_mut(),
                tool,
                RunConfig::bounded(101, &path),
                Box::new(move |m| *inner.borrow_mut() = Some(*m)),
            )
            .unwrap();
        run_to_completion(&mut driver, &mut session).unwrap();

        let medians = seen.borrow().expect("sink must have fired");
        assert!((medians.x - truth[0]).abs() <= noise);
        assert!((medians.y - truth[1]).abs() <= noise);
        assert!((medians.z - truth[2]).abs() <= noise);

        let text = std::fs::read_to_string(&path).unwrap();
        let rows = text
            .lines()
            .skip_while(|l| *l != "Point Index, X Pos, Y Pos, Z Pos")
            .skip(1)
            .count();
        assert_eq!(rows, 101);
    }

    #[test]
    fn dropped_frames_deliver_no_notification() {
        let mut scenario = Scenario::build(ScenarioKind::Handheld);
        scenario.params.drop_probability = 0.5;
        let mut driver = SessionDriver::from_scenario(&scenario, 9);
        let mut session = RecordingSession::new();

        let dir = tempfile::tempdir().unwrap();
        let tool = driver.tool();
        session
            .start(
                driver.scene_mut(),
                tool,
                RunConfig::bounded(50, dir.path().join("drop.csv")),
                Box::new(|_| {}),
            )
            .unwrap();

        let mut delivered = 0usize;
        let mut dropped = 0usize;
        while session.is_collecting() {
            match driver.tick(&mut session).unwrap() {
                Notified::Ignored => dropped += 1,
                _ => delivered += 1,
            }
        }
        assert!(dropped > 0, "handheld scenario should drop frames");
        assert_eq!(delivered, 51, "50 samples plus the finalizing event");
    }

    #[test]
    fn endless_run_stops_on_demand() {
        let scenario = Scenario::build(ScenarioKind::DriftingTool);
        let mut driver = SessionDriver::from_scenario(&scenario, 5);
        let mut session = RecordingSession::new();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endless.csv");
        let tool = driver.tool();
        session
            .start_endless(driver.scene_mut(), tool, &path, Box::new(|_| {}))
            .unwrap();

        for _ in 0..40 {
            driver.tick(&mut session).unwrap();
        }
        session.stop_endless(driver.scene_mut()).unwrap();

        assert_eq!(session.sample_count(), 40);
        assert!(path.exists());
    }
}
