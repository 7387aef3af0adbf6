//! Latest-wins hand-off between the stream readers and the frame loop.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::protocol::ControlEvent;

/// Thread-safe holder of the most recent event per event kind.
///
/// `publish` overwrites the slot for the event's kind; `take_*`
/// atomically takes and clears it. Values are never queued: a slow
/// consumer loses superseded values, it never accumulates them. At any
/// instant there is at most one unread value per kind, and each
/// published value is delivered at most once.
///
/// The vector and shot slots are locked independently and never block
/// each other.
///
/// # Examples
///
/// ```rust
/// use handbridge::bridge::LatestStore;
/// use handbridge::protocol::ControlEvent;
///
/// let store = LatestStore::default();
/// store.publish(ControlEvent::Vector { vx: 1.0, vy: 1.0 });
/// store.publish(ControlEvent::Vector { vx: 2.0, vy: 2.0 });
///
/// assert_eq!(store.take_vector(), Some((2.0, 2.0)));
/// assert_eq!(store.take_vector(), None);
/// ```
#[derive(Debug, Default)]
pub struct LatestStore {
    vector: Mutex<Option<(f32, f32)>>,
    shot: Mutex<Option<f32>>,
}

impl LatestStore {
    /// Publishes an event, replacing any unread value of the same kind.
    ///
    /// Called from the stdout reader task, concurrently with `take_*`
    /// calls from the frame loop.
    pub fn publish(&self, event: ControlEvent) {
        debug!("publishing {:?} event", event.kind());
        match event {
            ControlEvent::Vector { vx, vy } => {
                *lock_slot(&self.vector) = Some((vx, vy));
            }
            ControlEvent::Shot { strength } => {
                *lock_slot(&self.shot) = Some(strength);
            }
        }
    }

    /// Takes the unread look-delta, if any, clearing the slot.
    pub fn take_vector(&self) -> Option<(f32, f32)> {
        lock_slot(&self.vector).take()
    }

    /// Takes the unread shot strength, if any, clearing the slot.
    pub fn take_shot(&self) -> Option<f32> {
        lock_slot(&self.shot).take()
    }
}

// A poisoned slot still holds a valid last-written value; a reader
// panic must not take the frame loop down with it.
fn lock_slot<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
