use crate::{
    AppliedSnapshot, ViewerSet,
    controls::OverlayDisplay,
    rotor::{RotorFrame, RotorLabel, RotorPool},
};
use bevy::prelude::*;
use nalgebra::Vector2;
use shared::{RotorReadout, ndc_depth_visible, ndc_to_pixels};

/// Pixel offset so the text sits beside the rotor rather than on top of it.
const LABEL_OFFSET: Vec2 = Vec2::new(8.0, -8.0);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            refresh_label_text
                .run_if(resource_changed::<AppliedSnapshot>.or(resource_changed::<OverlayDisplay>)),
            project_labels,
        )
            .chain()
            .in_set(ViewerSet::Labels),
    );
}

/// Rewrite readouts for the rotors in the current snapshot.
fn refresh_label_text(
    applied: Res<AppliedSnapshot>,
    display: Res<OverlayDisplay>,
    pool: Res<RotorPool>,
    mut texts: Query<&mut Text, With<RotorLabel>>,
) {
    if !display.0.labels() {
        return;
    }
    let Some(snapshot) = applied.snapshot.as_ref() else {
        return;
    };

    for rotor in &snapshot.rotors {
        let Some(object) = pool.get(rotor.id) else {
            continue;
        };
        if let Ok(mut text) = texts.get_mut(object.label) {
            text.0 = RotorReadout::from_rotor(rotor).text();
        }
    }
}

/// Pixel position (from the viewport's top-left) of `point`, or `None` if it does not project
/// inside the clip volume.
///
/// Takes the camera's local `Transform` rather than its `GlobalTransform`: the camera has no
/// parent, and the global one is only propagated after `Update`.
fn project_to_viewport(
    clip_from_view: Mat4,
    camera: &Transform,
    point: Vec3,
    viewport: Vec2,
) -> Option<Vec2> {
    let world_from_view =
        Mat4::from_scale_rotation_translation(camera.scale, camera.rotation, camera.translation);
    let ndc = (clip_from_view * world_from_view.inverse()).project_point3(point);
    if !ndc.is_finite() || !ndc_depth_visible(ndc.z) {
        return None;
    }
    let pixels = ndc_to_pixels(Vector2::new(ndc.x, ndc.y), Vector2::new(viewport.x, viewport.y));
    Some(Vec2::new(pixels.x, pixels.y))
}

/// Move every label over its rotor's on-screen position, or hide them all.
fn project_labels(
    display: Res<OverlayDisplay>,
    pool: Res<RotorPool>,
    camera: Query<(&Camera, &Transform), With<Camera3d>>,
    frames: Query<&Transform, (With<RotorFrame>, Without<Camera3d>)>,
    mut labels: Query<(&mut Node, &mut Visibility), With<RotorLabel>>,
) {
    if !display.0.labels() {
        for (_, mut visibility) in &mut labels {
            visibility.set_if_neq(Visibility::Hidden);
        }
        return;
    }

    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Some(viewport) = camera.logical_viewport_size() else {
        return;
    };
    let clip_from_view = camera.clip_from_view();

    for object in pool.0.values() {
        let Ok((mut node, mut visibility)) = labels.get_mut(object.label) else {
            continue;
        };
        let pixels = frames.get(object.frame).ok().and_then(|frame| {
            project_to_viewport(clip_from_view, camera_transform, frame.translation, viewport)
        });

        let Some(pixels) = pixels else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };

        node.left = Val::Px(pixels.x + LABEL_OFFSET.x);
        node.top = Val::Px(pixels.y + LABEL_OFFSET.y);
        visibility.set_if_neq(Visibility::Inherited);
    }
}
