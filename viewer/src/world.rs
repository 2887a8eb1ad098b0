use bevy::prelude::*;

const GRID_CELLS: u32 = 20;
const GRID_SPACING: f32 = 0.5;
const WORLD_AXES_LENGTH: f32 = 1.0;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(Color::srgb(0.07, 0.08, 0.1)));
    app.add_systems(Startup, setup);
    app.add_systems(Update, draw_helpers);
}

fn setup(mut commands: Commands) {
    debug!("World setup");

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: light_consts::lux::OVERCAST_DAY,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(4.0, -3.0, 8.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));
    commands.spawn((
        Name::new("Fill"),
        PointLight {
            intensity: 400_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-4.0, 4.0, 6.0),
    ));
}

/// Ground grid on the XY plane plus the world triad at the origin.
fn draw_helpers(mut gizmos: Gizmos) {
    gizmos.grid(
        Isometry3d::IDENTITY,
        UVec2::splat(GRID_CELLS),
        Vec2::splat(GRID_SPACING),
        Color::srgba(0.5, 0.5, 0.55, 0.35),
    );
    gizmos.axes(Transform::IDENTITY, WORLD_AXES_LENGTH);
}
