mod sync;

pub use sync::sync_scene;

use crate::{AppliedSnapshot, ViewerSet};
use bevy::{platform::collections::HashMap, prelude::*};
use shared::RotorId;
use std::f32::consts::FRAC_PI_2;

/// Unit arrow proportions. Arrows are scaled along +Z to their displayed length.
const ARROW_SHAFT_LENGTH: f32 = 0.8;
const ARROW_SHAFT_RADIUS: f32 = 0.012;
const ARROW_HEAD_LENGTH: f32 = 0.2;
const ARROW_HEAD_RADIUS: f32 = 0.035;

const BODY_AXES_LENGTH: f32 = 0.5;
const ROTOR_AXES_LENGTH: f32 = 0.2;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<RotorPool>();
    app.add_systems(Startup, (setup_visuals, spawn_scene_roots).chain());
    app.add_systems(
        Update,
        sync_scene
            .in_set(ViewerSet::Sync)
            .run_if(resource_changed::<AppliedSnapshot>),
    );
    app.add_systems(PostUpdate, draw_frame_axes);
}

/// Vehicle body frame. Exactly one exists.
#[derive(Component, Debug)]
pub struct BodyFrame;

/// Root of one rotor's render entities.
#[derive(Component, Debug)]
pub struct RotorFrame(pub RotorId);

/// Draw a local XYZ triad at this entity's frame.
#[derive(Component, Debug)]
pub struct FrameAxes(pub f32);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKind {
    MotorThrust,
    BodyThrust,
    Torque,
    NetThrust,
    NetTorque,
}

impl ArrowKind {
    pub const ALL: [ArrowKind; 5] = [
        ArrowKind::MotorThrust,
        ArrowKind::BodyThrust,
        ArrowKind::Torque,
        ArrowKind::NetThrust,
        ArrowKind::NetTorque,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn color(self) -> Color {
        match self {
            ArrowKind::MotorThrust => Color::srgb(0.95, 0.2, 0.2),
            ArrowKind::BodyThrust => Color::srgb(1.0, 0.6, 0.1),
            ArrowKind::Torque => Color::srgb(0.25, 0.45, 1.0),
            ArrowKind::NetThrust => Color::srgb(0.9, 0.2, 0.9),
            ArrowKind::NetTorque => Color::srgb(0.2, 0.9, 0.9),
        }
    }
}

/// Text annotation owned by a rotor. Lives in the UI tree, not under the rotor frame.
#[derive(Component, Debug)]
pub struct RotorLabel(pub RotorId);

/// Entities making up one rotor. Created on first sight of an id and kept for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorObject {
    pub frame: Entity,
    pub motor_thrust: Entity,
    pub body_thrust: Entity,
    pub torque: Entity,
    pub label: Entity,
}

/// Every rotor ever observed, by id. Entries are never removed.
#[derive(Resource, Debug, Default)]
pub struct RotorPool(pub HashMap<RotorId, RotorObject>);

impl RotorPool {
    pub fn get(&self, id: RotorId) -> Option<&RotorObject> {
        self.0.get(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Aggregate arrows anchored at the body origin.
#[derive(Resource, Debug, Clone, Copy)]
pub struct NetArrowEntities {
    pub thrust: Entity,
    pub torque: Entity,
}

/// Shared mesh and material handles for everything spawned per rotor.
#[derive(Resource, Debug, Clone, Default)]
pub struct RotorVisuals {
    pub body_mesh: Handle<Mesh>,
    pub body_material: Handle<StandardMaterial>,
    pub rotor_mesh: Handle<Mesh>,
    pub rotor_material: Handle<StandardMaterial>,
    pub arrow_shaft: Handle<Mesh>,
    pub arrow_head: Handle<Mesh>,
    pub arrow_materials: [Handle<StandardMaterial>; 5],
}

impl RotorVisuals {
    fn arrow_material(&self, kind: ArrowKind) -> Handle<StandardMaterial> {
        self.arrow_materials[kind.index()].clone()
    }
}

fn setup_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let arrow_materials = ArrowKind::ALL.map(|kind| {
        materials.add(StandardMaterial {
            base_color: kind.color(),
            unlit: true,
            ..default()
        })
    });

    commands.insert_resource(RotorVisuals {
        body_mesh: meshes.add(Cuboid::new(0.5, 0.5, 0.12)),
        body_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.55, 0.58, 0.62),
            perceptual_roughness: 0.8,
            ..default()
        }),
        rotor_mesh: meshes.add(Cylinder::new(0.12, 0.015)),
        rotor_material: materials.add(StandardMaterial {
            base_color: Color::srgba(0.85, 0.85, 0.9, 0.6),
            alpha_mode: AlphaMode::Blend,
            ..default()
        }),
        arrow_shaft: meshes.add(Cylinder::new(ARROW_SHAFT_RADIUS, ARROW_SHAFT_LENGTH)),
        arrow_head: meshes.add(Cone {
            radius: ARROW_HEAD_RADIUS,
            height: ARROW_HEAD_LENGTH,
        }),
        arrow_materials,
    });
}

/// Spawn the body frame and the two net arrows.
pub(crate) fn spawn_scene_roots(mut commands: Commands, visuals: Res<RotorVisuals>) {
    let body = commands
        .spawn((
            Name::new("Body"),
            BodyFrame,
            FrameAxes(BODY_AXES_LENGTH),
            Transform::default(),
            Visibility::Inherited,
        ))
        .id();
    commands.spawn((
        Name::new("BodyMesh"),
        Mesh3d(visuals.body_mesh.clone()),
        MeshMaterial3d(visuals.body_material.clone()),
        Transform::default(),
        ChildOf(body),
    ));

    let thrust = spawn_arrow(&mut commands, &visuals, ArrowKind::NetThrust, None);
    let torque = spawn_arrow(&mut commands, &visuals, ArrowKind::NetTorque, None);
    commands.insert_resource(NetArrowEntities { thrust, torque });
}

/// Spawn a hidden unit arrow pointing along local +Z.
fn spawn_arrow(
    commands: &mut Commands,
    visuals: &RotorVisuals,
    kind: ArrowKind,
    parent: Option<Entity>,
) -> Entity {
    let material = visuals.arrow_material(kind);
    let mut arrow = commands.spawn((
        Name::new(format!("{kind:?}Arrow")),
        kind,
        Transform::default(),
        Visibility::Hidden,
    ));
    if let Some(parent) = parent {
        arrow.insert(ChildOf(parent));
    }
    let arrow = arrow.id();

    // Bevy's cylinder and cone are Y-aligned and centered; tip the +Y axis onto +Z.
    let to_z = Quat::from_rotation_x(FRAC_PI_2);
    commands.spawn((
        Mesh3d(visuals.arrow_shaft.clone()),
        MeshMaterial3d(material.clone()),
        Transform::from_xyz(0.0, 0.0, ARROW_SHAFT_LENGTH * 0.5).with_rotation(to_z),
        ChildOf(arrow),
    ));
    commands.spawn((
        Mesh3d(visuals.arrow_head.clone()),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, 0.0, ARROW_SHAFT_LENGTH + ARROW_HEAD_LENGTH * 0.5)
            .with_rotation(to_z),
        ChildOf(arrow),
    ));
    arrow
}

/// Spawn every entity owned by a newly observed rotor.
pub(crate) fn spawn_rotor_object(
    commands: &mut Commands,
    visuals: &RotorVisuals,
    id: RotorId,
    transform: Transform,
) -> RotorObject {
    let frame = commands
        .spawn((
            Name::new(format!("Rotor {id}")),
            RotorFrame(id),
            FrameAxes(ROTOR_AXES_LENGTH),
            transform,
            Visibility::Inherited,
        ))
        .id();
    commands.spawn((
        Mesh3d(visuals.rotor_mesh.clone()),
        MeshMaterial3d(visuals.rotor_material.clone()),
        // Disc in the rotor's XY plane.
        Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        ChildOf(frame),
    ));

    let motor_thrust = spawn_arrow(commands, visuals, ArrowKind::MotorThrust, Some(frame));
    let body_thrust = spawn_arrow(commands, visuals, ArrowKind::BodyThrust, Some(frame));
    let torque = spawn_arrow(commands, visuals, ArrowKind::Torque, Some(frame));

    let label = commands
        .spawn((
            Name::new(format!("Rotor {id} label")),
            RotorLabel(id),
            Text::new(format!("R{id}")),
            TextFont {
                font_size: 13.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
        ))
        .id();

    RotorObject {
        frame,
        motor_thrust,
        body_thrust,
        torque,
        label,
    }
}

fn draw_frame_axes(mut gizmos: Gizmos, frames: Query<(&GlobalTransform, &FrameAxes)>) {
    for (transform, axes) in &frames {
        gizmos.axes(*transform, axes.0);
    }
}
