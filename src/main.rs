use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use handbridge::bridge::{LatestStore, ProducerStatus, SupervisorHandle};
use handbridge::config::BridgeConfig;
use handbridge::consumers::{CameraRig, Shooter};
use handbridge::dispatch::FrameDispatcher;

const CONFIG_PATH: &str = "handbridge.toml";
const CAMERA_SENSITIVITY: f32 = 200.0;
const SHOOTER_MAX_FORCE: f32 = 20.0;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = BridgeConfig::load_or_default(Path::new(CONFIG_PATH));
    info!("starting hand-tracking bridge: {:?}", config);

    let store = Arc::new(LatestStore::default());
    let mut supervisor = SupervisorHandle::new(config.clone(), store.clone());
    let mut status = supervisor.status();

    // A missing tracker is surfaced but not fatal; the loop runs
    // without control input.
    if let Err(e) = supervisor.start() {
        error!("failed to start hand tracker: {}", e);
    }

    let mut dispatcher = FrameDispatcher::new(
        store,
        Box::new(CameraRig::new(CAMERA_SENSITIVITY)),
        Box::new(Shooter::new(SHOOTER_MAX_FORCE)),
    );

    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                dispatcher.tick();
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                if *status.borrow() == ProducerStatus::Disconnected {
                    warn!("hand tracker exited, control input has stopped");
                }
            }
            _ = &mut ctrl_c => {
                info!("shutting down");
                break;
            }
        }
    }

    supervisor.stop();
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
