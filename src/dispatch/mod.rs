//! Per-tick dispatch from the latest-value store to the consumers.

use std::sync::Arc;

use tracing::debug;

use crate::bridge::LatestStore;

/// Consumer of look-delta events, e.g. a camera rig.
pub trait VectorConsumer: Send {
    fn apply_vector(&mut self, vx: f32, vy: f32);
}

/// Consumer of fire commands.
///
/// Clamping `strength` to `[0, 1]` is the consumer's contract, not the
/// dispatcher's.
pub trait ShotConsumer: Send {
    fn shoot(&mut self, strength: f32);
}

/// Drains the latest-value store once per frame tick.
///
/// Runs on the application's single logical thread. Each `tick` calls
/// each consumer at most once, with the most recent unconsumed event
/// of its kind; both lookups are non-blocking.
pub struct FrameDispatcher {
    store: Arc<LatestStore>,
    camera: Box<dyn VectorConsumer>,
    shooter: Box<dyn ShotConsumer>,
}

impl FrameDispatcher {
    pub fn new(
        store: Arc<LatestStore>,
        camera: Box<dyn VectorConsumer>,
        shooter: Box<dyn ShotConsumer>,
    ) -> Self {
        Self {
            store,
            camera,
            shooter,
        }
    }

    /// Delivers pending events to the consumers. Never blocks.
    pub fn tick(&mut self) {
        if let Some((vx, vy)) = self.store.take_vector() {
            debug!("dispatching vector ({}, {})", vx, vy);
            self.camera.apply_vector(vx, vy);
        }

        if let Some(strength) = self.store.take_shot() {
            debug!("dispatching shot with strength {}", strength);
            self.shooter.shoot(strength);
        }
    }
}
