pub mod connection;

use crate::config::ViewerConfig;
use bevy::prelude::*;
use connection::{LinkStatus, run_link};
use shared::{LatestSlot, Snapshot};
use std::sync::Arc;
use std::thread;

/// Latest decoded snapshot, written by the link thread and drained once per frame.
#[derive(Resource, Clone, Default)]
pub struct SnapshotBuffer(pub Arc<LatestSlot<Snapshot>>);

/// Read-only view of the link thread's state for the frame loop.
#[derive(Resource, Clone, Default)]
pub struct LinkMonitor(pub Arc<LinkStatus>);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<SnapshotBuffer>();
    app.init_resource::<LinkMonitor>();
    app.add_systems(Startup, spawn_link);
}

fn spawn_link(config: Res<ViewerConfig>, buffer: Res<SnapshotBuffer>, monitor: Res<LinkMonitor>) {
    info!(
        "Streaming snapshots from {} (retry every {:?})",
        config.endpoint, config.reconnect_delay
    );
    let config = config.clone();
    let buffer = Arc::clone(&buffer.0);
    let status = Arc::clone(&monitor.0);

    // Detached: the thread lives until the process exits.
    let spawned = thread::Builder::new()
        .name("snapshot-link".into())
        .spawn(move || run_link(&config, &buffer, &status));

    if let Err(err) = spawned {
        error!("Failed to start the snapshot link thread: {err}");
    }
}
