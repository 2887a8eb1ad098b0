use super::{BodyFrame, RotorFrame, RotorPool, RotorVisuals, spawn_rotor_object};
use crate::{
    AppliedSnapshot,
    convert::{body_transform, rotor_transform},
};
use bevy::prelude::*;

/// Apply the current snapshot's poses to the body and to every rotor it lists.
///
/// New ids get their entities spawned and registered in the pool before use. Ids missing
/// from the snapshot are left alone and keep their last pose. Poses are applied as-is.
pub fn sync_scene(
    mut commands: Commands,
    applied: Res<AppliedSnapshot>,
    visuals: Res<RotorVisuals>,
    mut pool: ResMut<RotorPool>,
    mut body_q: Query<&mut Transform, (With<BodyFrame>, Without<RotorFrame>)>,
    mut frame_q: Query<&mut Transform, (With<RotorFrame>, Without<BodyFrame>)>,
) {
    let Some(snapshot) = applied.snapshot.as_ref() else {
        return;
    };

    if let Ok(mut body) = body_q.single_mut() {
        *body = body_transform(&snapshot.body);
    }

    for rotor in &snapshot.rotors {
        let transform = rotor_transform(rotor);

        let Some(object) = pool.get(rotor.id).copied() else {
            info!("New rotor {} observed", rotor.id);
            let object = spawn_rotor_object(&mut commands, &visuals, rotor.id, transform);
            pool.0.insert(rotor.id, object);
            continue;
        };

        match frame_q.get_mut(object.frame) {
            Ok(mut frame) => *frame = transform,
            // Spawned earlier in this same pass (repeated id); commands haven't applied yet.
            Err(_) => {
                commands.entity(object.frame).insert(transform);
            }
        }
    }
}
