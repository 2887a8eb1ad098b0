//! Debug/performance tooling for native dev builds.
//!
//! Compiled only behind `dev_native` (see `main.rs`).

use crate::{AppliedSnapshot, server::SnapshotBuffer};
use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use bevy::time::common_conditions::on_timer;
use iyes_perf_ui::prelude::*;
use std::time::Duration;

const THROUGHPUT_LOG_PERIOD: Duration = Duration::from_secs(5);

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(
        Update,
        log_throughput.run_if(on_timer(THROUGHPUT_LOG_PERIOD)),
    );
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

/// How many received snapshots were superseded before a frame could draw them.
fn log_throughput(buffer: Res<SnapshotBuffer>, applied: Res<AppliedSnapshot>) {
    debug!(
        "Snapshots: {} received, {} drawn, {} overwritten unread",
        buffer.0.published(),
        applied.consumed,
        buffer.0.overwritten(),
    );
}
