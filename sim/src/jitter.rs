//! Pose jitter generator: stands in for a real tracking device.
//!
//! Produces noisy translations around a true pose with:
//! - Uniform per-axis position noise
//! - Optional per-tick drift (slow sensor walk)
//! - Frame-drop probability (missed updates)

use probe_core::types::Position;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Physical configuration of the simulated tracked tool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JitterParams {
    /// True tool position (x, y, z) in tracker coordinates (mm)
    pub true_position: [f64; 3],
    /// Position noise half-width per axis (mm)
    pub noise_std: f64,
    /// Per-tick drift added to the true position (mm/tick)
    pub drift_per_tick: [f64; 3],
    /// Probability that a tick produces no update (dropped frame)
    pub drop_probability: f64,
}

impl Default for JitterParams {
    fn default() -> Self {
        Self {
            true_position: [100.0, -40.0, 1200.0], // typical optical-tracker workspace
            noise_std: 0.2,                        // 0.2 mm jitter
            drift_per_tick: [0.0, 0.0, 0.0],
            drop_probability: 0.0,
        }
    }
}

/// Deterministic (per seed) stream of noisy tool poses.
pub struct PoseJitter {
    pub params: JitterParams,
    rng: ChaCha8Rng,
    tick: u64,
}

impl PoseJitter {
    pub fn new(params: JitterParams, seed: u64) -> Self {
        Self {
            params,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
        }
    }

    /// Ticks produced so far (including dropped frames).
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The next noisy translation, or `None` for a dropped frame.
    pub fn next_pose(&mut self) -> Option<Position> {
        let tick = self.tick;
        self.tick += 1;

        if self.params.drop_probability > 0.0
            && self.rng.gen::<f64>() < self.params.drop_probability
        {
            return None;
        }

        let std = self.params.noise_std;
        let mut pose = [0.0f64; 3];
        for axis in 0..3 {
            let noise = self.rng.gen::<f64>() * std * 2.0 - std;
            pose[axis] = self.params.true_position[axis]
                + self.params.drift_per_tick[axis] * tick as f64
                + noise;
        }
        Some(Position::new(pose[0], pose[1], pose[2]))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_per_seed() {
        let params = JitterParams::default();
        let mut a = PoseJitter::new(params.clone(), 42);
        let mut b = PoseJitter::new(params, 42);
        for _ in 0..20 {
            assert_eq!(a.next_pose(), b.next_pose());
        }
    }

    #[test]
    fn noise_stays_within_half_width() {
        let params = JitterParams {
            noise_std: 0.5,
            ..Default::default()
        };
        let truth = params.true_position;
        let mut jitter = PoseJitter::new(params, 7);
        for _ in 0..200 {
            let p = jitter.next_pose().unwrap();
            assert!((p.x - truth[0]).abs() <= 0.5);
            assert!((p.y - truth[1]).abs() <= 0.5);
            assert!((p.z - truth[2]).abs() <= 0.5);
        }
    }

    #[test]
    fn zero_drop_probability_never_drops() {
        let mut jitter = PoseJitter::new(JitterParams::default(), 3);
        assert!((0..100).all(|_| jitter.next_pose().is_some()));
    }

    #[test]
    fn drift_accumulates_per_tick() {
        let params = JitterParams {
            true_position: [0.0, 0.0, 0.0],
            noise_std: 0.0,
            drift_per_tick: [1.0, 0.0, 0.0],
            drop_probability: 0.0,
        };
        let mut jitter = PoseJitter::new(params, 0);
        assert_eq!(jitter.next_pose().unwrap().x, 0.0);
        assert_eq!(jitter.next_pose().unwrap().x, 1.0);
        assert_eq!(jitter.next_pose().unwrap().x, 2.0);
    }
}
