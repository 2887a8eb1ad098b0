use crate::{ViewerSet, server::SnapshotBuffer};
use bevy::prelude::*;
use shared::Snapshot;

/// The snapshot the scene currently reflects.
///
/// Only mutated when a new snapshot is drained, so `resource_changed::<AppliedSnapshot>` marks
/// frames that have fresh data. Frames with an empty buffer leave it (and the scene) untouched.
#[derive(Resource, Debug, Default)]
pub struct AppliedSnapshot {
    pub snapshot: Option<Snapshot>,
    /// Snapshots drained over the session.
    pub consumed: u64,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<AppliedSnapshot>();
    app.add_systems(Update, drain_snapshot.in_set(ViewerSet::Drain));
}

/// Take at most one snapshot from the buffer.
pub(crate) fn drain_snapshot(buffer: Res<SnapshotBuffer>, mut applied: ResMut<AppliedSnapshot>) {
    let Some(snapshot) = buffer.0.take() else {
        return;
    };
    applied.snapshot = Some(snapshot);
    applied.consumed += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::decode_snapshot;

    fn snapshot(x: f32) -> Snapshot {
        decode_snapshot(&format!(
            r#"{{"body": {{"position": [{x}, 0, 0], "quaternion": [1, 0, 0, 0]}}, "rotors": []}}"#
        ))
        .unwrap()
    }

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<SnapshotBuffer>();
        app.init_resource::<AppliedSnapshot>();
        app.add_systems(Update, drain_snapshot);
        app
    }

    #[test]
    fn drains_only_the_latest_snapshot() {
        let mut app = app();
        let buffer = app.world().resource::<SnapshotBuffer>().clone();
        buffer.0.publish(snapshot(1.0));
        buffer.0.publish(snapshot(2.0));

        app.update();

        let applied = app.world().resource::<AppliedSnapshot>();
        assert_eq!(applied.consumed, 1);
        assert_eq!(applied.snapshot.as_ref().unwrap().body.position[0], 2.0);
        assert!(!buffer.0.has_pending());
    }

    #[test]
    fn empty_buffer_keeps_previous_snapshot() {
        let mut app = app();
        let buffer = app.world().resource::<SnapshotBuffer>().clone();
        buffer.0.publish(snapshot(1.0));
        app.update();
        app.update();
        app.update();

        let applied = app.world().resource::<AppliedSnapshot>();
        assert_eq!(applied.consumed, 1);
        assert_eq!(applied.snapshot.as_ref().unwrap().body.position[0], 1.0);
    }
}
