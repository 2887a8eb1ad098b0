use crate::{ViewerSet, rotor::BodyFrame};
use bevy::{
    core_pipeline::tonemapping::Tonemapping,
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};
use std::f32::consts::FRAC_PI_2;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
    app.add_systems(
        Update,
        (orbit_camera, follow_body)
            .chain()
            .after(ViewerSet::Sync)
            .before(ViewerSet::Labels),
    );
}

const ORBIT_SENSITIVITY: f32 = 0.01;
const ZOOM_SENSITIVITY: f32 = 0.4;
const MIN_PITCH: f32 = -FRAC_PI_2 + 0.05;
const MAX_PITCH: f32 = FRAC_PI_2 - 0.05;
const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 100.0;
const CAMERA_DECAY_RATE: f32 = 12.0;

/// Camera spherical coordinates around a focus point. The world is Z-up.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    radius: f32,
    yaw: f32,
    pitch: f32,
}

impl OrbitCamera {
    fn new(focus: Vec3, translation: Vec3) -> Self {
        let offset = translation - focus;
        let radius = offset.length().max(MIN_RADIUS);
        Self {
            focus,
            radius,
            yaw: offset.y.atan2(offset.x),
            pitch: (offset.z / radius).clamp(-1.0, 1.0).asin(),
        }
    }

    fn offset(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.radius * Vec3::new(cos_pitch * cos_yaw, cos_pitch * sin_yaw, sin_pitch)
    }

    fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
    }

    fn zoom(&mut self, scroll: f32) {
        self.radius = (self.radius - scroll * ZOOM_SENSITIVITY).clamp(MIN_RADIUS, MAX_RADIUS);
    }
}

fn add_camera(mut commands: Commands) {
    let translation = Vec3::new(3.0, -3.0, 2.5);
    commands.spawn((
        Name::new("Viewer Camera"),
        Camera3d::default(),
        Tonemapping::AcesFitted,
        Transform::from_translation(translation).looking_at(Vec3::ZERO, Vec3::Z),
        OrbitCamera::new(Vec3::ZERO, translation),
    ));
}

/// Right-drag orbits, the wheel zooms.
fn orbit_camera(
    mut motion_events: MessageReader<MouseMotion>,
    mut scroll_events: MessageReader<MouseWheel>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let rotation: Vec2 = motion_events.read().map(|ev| ev.delta).sum();
    let scroll: f32 = scroll_events.read().map(|ev| ev.y).sum();
    let dragging = mouse_buttons.pressed(MouseButton::Right);

    for mut orbit in &mut cameras {
        if dragging && rotation != Vec2::ZERO {
            orbit.rotate(rotation);
        }
        if scroll.abs() > f32::EPSILON {
            orbit.zoom(scroll);
        }
    }
}

/// Keep the focus on the vehicle body and place the camera on its orbit.
fn follow_body(
    mut cameras: Query<(&mut Transform, &mut OrbitCamera), Without<BodyFrame>>,
    body: Query<&Transform, With<BodyFrame>>,
    time: Res<Time>,
) {
    let Ok((mut transform, mut orbit)) = cameras.single_mut() else {
        return;
    };
    if let Ok(body) = body.single() {
        orbit
            .focus
            .smooth_nudge(&body.translation, CAMERA_DECAY_RATE, time.delta_secs());
    }

    transform.translation = orbit.focus + orbit.offset();
    transform.look_at(orbit.focus, Vec3::Z);
}
