//! End-to-end: a real child process feeding the full pipeline.
//!
//! Uses `sh` as a stand-in tracker so the test exercises process
//! spawning, pipe draining, parsing, the latest-value store, and the
//! frame dispatcher together.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::{sleep, timeout};

use handbridge::bridge::{LatestStore, ProducerStatus, SupervisorHandle};
use handbridge::config::BridgeConfig;
use handbridge::dispatch::{FrameDispatcher, ShotConsumer, VectorConsumer};

#[derive(Clone, Default)]
struct Recording {
    vectors: Arc<Mutex<Vec<(f32, f32)>>>,
    shots: Arc<Mutex<Vec<f32>>>,
}

struct CameraProbe(Recording);
struct ShooterProbe(Recording);

impl VectorConsumer for CameraProbe {
    fn apply_vector(&mut self, vx: f32, vy: f32) {
        self.0.vectors.lock().expect("lock").push((vx, vy));
    }
}

impl ShotConsumer for ShooterProbe {
    fn shoot(&mut self, strength: f32) {
        self.0.shots.lock().expect("lock").push(strength);
    }
}

fn shell_config(script: &str) -> BridgeConfig {
    BridgeConfig {
        executable: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        working_dir: None,
        tick_interval_ms: 16,
    }
}

#[tokio::test]
async fn tracker_output_drives_both_consumers_exactly_once() {
    let recording = Recording::default();
    let store = Arc::new(LatestStore::default());
    let mut dispatcher = FrameDispatcher::new(
        store.clone(),
        Box::new(CameraProbe(recording.clone())),
        Box::new(ShooterProbe(recording.clone())),
    );

    let mut supervisor = SupervisorHandle::new(
        shell_config("printf '0.1 -0.2\\nSHOT 0.75\\nnot a line\\n'"),
        store,
    );
    let mut status = supervisor.status();
    supervisor.start().expect("start tracker");

    // Wait for the tracker to finish emitting.
    timeout(Duration::from_secs(5), async {
        while *status.borrow() != ProducerStatus::Disconnected {
            status.changed().await.expect("status channel");
        }
    })
    .await
    .expect("tracker never exited");

    // The pipe may drain slightly after the exit notification; tick
    // until both consumers have been fed.
    timeout(Duration::from_secs(5), async {
        loop {
            dispatcher.tick();
            let vectors = recording.vectors.lock().expect("lock").len();
            let shots = recording.shots.lock().expect("lock").len();
            if vectors > 0 && shots > 0 {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("consumers were never fed");

    // Further ticks deliver nothing new; the garbage line fed nobody.
    dispatcher.tick();
    dispatcher.tick();

    let vectors = recording.vectors.lock().expect("lock").clone();
    let shots = recording.shots.lock().expect("lock").clone();
    assert_eq!(vectors.len(), 1, "camera consumer called exactly once");
    assert_eq!(shots.len(), 1, "shoot consumer called exactly once");

    let (vx, vy) = vectors[0];
    assert!((vx - 0.1).abs() < 1e-6);
    assert!((vy + 0.2).abs() < 1e-6);
    assert!((shots[0] - 0.75).abs() < 1e-6);

    supervisor.stop();
}

#[tokio::test]
async fn stderr_noise_never_reaches_the_store() {
    let store = Arc::new(LatestStore::default());
    let mut supervisor = SupervisorHandle::new(
        shell_config("printf 'SHOT 0.5\\n' 1>&2"),
        store.clone(),
    );
    let mut status = supervisor.status();
    supervisor.start().expect("start tracker");

    timeout(Duration::from_secs(5), async {
        while *status.borrow() != ProducerStatus::Disconnected {
            status.changed().await.expect("status channel");
        }
    })
    .await
    .expect("tracker never exited");

    // Give the stderr reader time to drain before checking.
    sleep(Duration::from_millis(100)).await;
    assert_eq!(store.take_shot(), None, "stderr must never be parsed");
    assert_eq!(store.take_vector(), None);

    supervisor.stop();
}

#[tokio::test]
async fn a_slow_tracker_only_ever_delivers_its_latest_vector() {
    let recording = Recording::default();
    let store = Arc::new(LatestStore::default());
    let mut dispatcher = FrameDispatcher::new(
        store.clone(),
        Box::new(CameraProbe(recording.clone())),
        Box::new(ShooterProbe(recording.clone())),
    );

    // Burst of vectors, no tick in between: only the last survives.
    let mut supervisor = SupervisorHandle::new(
        shell_config("printf '1.0 1.0\\n2.0 2.0\\n3.0 3.0\\n'"),
        store,
    );
    let mut status = supervisor.status();
    supervisor.start().expect("start tracker");

    timeout(Duration::from_secs(5), async {
        while *status.borrow() != ProducerStatus::Disconnected {
            status.changed().await.expect("status channel");
        }
    })
    .await
    .expect("tracker never exited");

    // Let the pipe drain fully before the first tick so the burst is
    // collapsed by the store, not split across ticks.
    sleep(Duration::from_millis(200)).await;
    dispatcher.tick();

    let vectors = recording.vectors.lock().expect("lock").clone();
    assert_eq!(vectors, vec![(3.0, 3.0)]);

    supervisor.stop();
}
