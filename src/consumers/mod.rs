//! Built-in consumers for the two event kinds.
//!
//! Plain-arithmetic stand-ins for the engine-side collaborators: a
//! yaw/pitch camera rig and a projectile shooter. Both only track the
//! state the bridge is responsible for; rendering and physics live
//! elsewhere.

use tracing::{debug, info};

use crate::dispatch::{ShotConsumer, VectorConsumer};

/// Pitch is clamped to this range in degrees, matching typical
/// first-person camera limits.
const PITCH_LIMIT_DEG: f32 = 80.0;

/// Yaw/pitch camera driven by relative look-deltas.
///
/// Each vector rotates yaw by `vx * sensitivity` and accumulates pitch
/// by `vy * sensitivity`; pitch clamps at ±80°, yaw wraps into
/// `[0, 360)`.
#[derive(Debug, Clone)]
pub struct CameraRig {
    sensitivity: f32,
    yaw_deg: f32,
    pitch_deg: f32,
}

impl CameraRig {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            yaw_deg: 0.0,
            pitch_deg: 0.0,
        }
    }

    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }

    pub fn pitch_deg(&self) -> f32 {
        self.pitch_deg
    }
}

impl VectorConsumer for CameraRig {
    fn apply_vector(&mut self, vx: f32, vy: f32) {
        self.yaw_deg = (self.yaw_deg + vx * self.sensitivity).rem_euclid(360.0);
        self.pitch_deg =
            (self.pitch_deg + vy * self.sensitivity).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
        debug!(
            "camera now at yaw {:.2}°, pitch {:.2}°",
            self.yaw_deg, self.pitch_deg
        );
    }
}

/// Shooter that converts normalized shot strength into an impulse.
///
/// Strength outside `[0, 1]` is clamped here, per the consumer
/// contract. Tracks the impulse of the most recent shot and a running
/// count; projectile spawning is the host application's job.
#[derive(Debug, Clone)]
pub struct Shooter {
    max_force: f32,
    shots_fired: u32,
    last_impulse: Option<f32>,
}

impl Shooter {
    pub fn new(max_force: f32) -> Self {
        Self {
            max_force,
            shots_fired: 0,
            last_impulse: None,
        }
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub fn last_impulse(&self) -> Option<f32> {
        self.last_impulse
    }
}

impl ShotConsumer for Shooter {
    fn shoot(&mut self, strength: f32) {
        let strength = strength.clamp(0.0, 1.0);
        let impulse = strength * self.max_force;

        self.shots_fired += 1;
        self.last_impulse = Some(impulse);
        info!(
            "shot #{} fired with strength {:.2}, impulse {:.2}",
            self.shots_fired, strength, impulse
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_accumulates_yaw_and_pitch() {
        let mut rig = CameraRig::new(100.0);
        rig.apply_vector(0.1, 0.2);

        assert!((rig.yaw_deg() - 10.0).abs() < 1e-4);
        assert!((rig.pitch_deg() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn camera_pitch_clamps_at_limits() {
        let mut rig = CameraRig::new(200.0);
        for _ in 0..10 {
            rig.apply_vector(0.0, 1.0);
        }
        assert_eq!(rig.pitch_deg(), PITCH_LIMIT_DEG);

        for _ in 0..20 {
            rig.apply_vector(0.0, -1.0);
        }
        assert_eq!(rig.pitch_deg(), -PITCH_LIMIT_DEG);
    }

    #[test]
    fn camera_yaw_wraps_around() {
        let mut rig = CameraRig::new(200.0);
        rig.apply_vector(1.0, 0.0);
        rig.apply_vector(1.0, 0.0);

        assert!((rig.yaw_deg() - 40.0).abs() < 1e-3);

        let mut rig = CameraRig::new(200.0);
        rig.apply_vector(-0.5, 0.0);
        assert!((rig.yaw_deg() - 260.0).abs() < 1e-3);
    }

    #[test]
    fn shooter_clamps_strength() {
        let mut shooter = Shooter::new(20.0);

        shooter.shoot(1.5);
        assert_eq!(shooter.last_impulse(), Some(20.0));

        shooter.shoot(-0.5);
        assert_eq!(shooter.last_impulse(), Some(0.0));

        shooter.shoot(0.75);
        assert_eq!(shooter.last_impulse(), Some(15.0));
        assert_eq!(shooter.shots_fired(), 3);
    }
}
