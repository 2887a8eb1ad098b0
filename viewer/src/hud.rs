use crate::{
    AppliedSnapshot, RotorPool, ViewerConfig,
    server::{LinkMonitor, SnapshotBuffer},
};
use bevy::prelude::*;
use shared::LinkState;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_status);
    app.add_systems(Update, refresh_status);
}

const CONNECTED_COLOR: Color = Color::srgb(0.8, 0.85, 0.9);
const OFFLINE_COLOR: Color = Color::srgb(1.0, 0.65, 0.3);

/// Connection and stream readout in the bottom-left corner.
#[derive(Component, Debug)]
struct StatusText;

fn spawn_status(mut commands: Commands) {
    commands.spawn((
        Name::new("Status"),
        StatusText,
        Text::default(),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(OFFLINE_COLOR),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            bottom: Val::Px(10.0),
            ..default()
        },
    ));
}

struct StatusLine<'a> {
    endpoint: &'a str,
    state: LinkState,
    sessions: u64,
    time: Option<f64>,
    rotors: usize,
    consumed: u64,
    published: u64,
    rejected: u64,
}

impl StatusLine<'_> {
    fn render(&self) -> String {
        let time = self
            .time
            .map_or_else(|| "-".to_string(), |t| format!("{t:.3} s"));
        format!(
            "{} ({}, {} sessions)\nt = {time}   rotors: {}\nframes: {} drawn / {} received / {} rejected",
            self.endpoint,
            self.state.label(),
            self.sessions,
            self.rotors,
            self.consumed,
            self.published,
            self.rejected,
        )
    }
}

fn refresh_status(
    config: Res<ViewerConfig>,
    monitor: Res<LinkMonitor>,
    buffer: Res<SnapshotBuffer>,
    applied: Res<AppliedSnapshot>,
    pool: Res<RotorPool>,
    status: Single<(&mut Text, &mut TextColor), With<StatusText>>,
) {
    let (mut text, mut color) = status.into_inner();
    let state = monitor.0.state();
    let line = StatusLine {
        endpoint: &config.endpoint,
        state,
        sessions: monitor.0.sessions(),
        time: applied.snapshot.as_ref().and_then(|snapshot| snapshot.time),
        rotors: pool.len(),
        consumed: applied.consumed,
        published: buffer.0.published(),
        rejected: monitor.0.rejected(),
    }
    .render();

    if text.0 != line {
        text.0 = line;
    }
    let tint = if state.is_connected() {
        CONNECTED_COLOR
    } else {
        OFFLINE_COLOR
    };
    color.set_if_neq(TextColor(tint));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_before_any_snapshot() {
        let line = StatusLine {
            endpoint: "ws://localhost:8765",
            state: LinkState::Reconnecting,
            sessions: 0,
            time: None,
            rotors: 0,
            consumed: 0,
            published: 0,
            rejected: 0,
        };
        assert_eq!(
            line.render(),
            "ws://localhost:8765 (reconnecting, 0 sessions)\nt = -   rotors: 0\nframes: 0 drawn / 0 received / 0 rejected"
        );
    }

    #[test]
    fn status_while_streaming() {
        let line = StatusLine {
            endpoint: "ws://sim:9000",
            state: LinkState::Connected,
            sessions: 2,
            time: Some(1.25),
            rotors: 4,
            consumed: 90,
            published: 120,
            rejected: 2,
        };
        let rendered = line.render();
        assert!(rendered.starts_with("ws://sim:9000 (connected, 2 sessions)"));
        assert!(rendered.contains("t = 1.250 s   rotors: 4"));
        assert!(rendered.ends_with("90 drawn / 120 received / 2 rejected"));
    }
}
