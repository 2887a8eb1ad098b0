use crate::{
    AppliedSnapshot, ViewerSet,
    controls::OverlayDisplay,
    convert::vec3,
    rotor::{ArrowKind, NetArrowEntities, RotorPool},
};
use bevy::{platform::collections::HashMap, prelude::*};
use shared::{ArrowGeometry, RotorId, RotorState, net_arrows, rotor_arrows};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (update_rotor_arrows, update_net_arrows)
            .in_set(ViewerSet::Overlay)
            .run_if(resource_changed::<AppliedSnapshot>.or(resource_changed::<OverlayDisplay>)),
    );
}

type ArrowQuery<'w, 's> =
    Query<'w, 's, (&'static mut Transform, &'static mut Visibility), With<ArrowKind>>;

/// Point an arrow entity along `geometry`, or hide it.
///
/// Zero-length arrows are hidden outright rather than scaled to a degenerate transform.
fn apply_arrow(transform: &mut Transform, visibility: &mut Visibility, geometry: Option<ArrowGeometry>) {
    match geometry.filter(ArrowGeometry::is_visible) {
        Some(arrow) => {
            transform.rotation = Quat::from_rotation_arc(Vec3::Z, vec3(&arrow.direction));
            transform.scale = Vec3::new(1.0, 1.0, arrow.length);
            *visibility = Visibility::Inherited;
        }
        None => *visibility = Visibility::Hidden,
    }
}

fn set_arrow(arrows: &mut ArrowQuery, entity: Entity, geometry: Option<ArrowGeometry>) {
    if let Ok((mut transform, mut visibility)) = arrows.get_mut(entity) {
        apply_arrow(&mut transform, &mut visibility, geometry);
    }
}

/// Size (or hide) each rotor's three arrows. Groups switched off are hidden without computing.
///
/// Rotors missing from the latest snapshot keep their last reported vectors, so a display
/// toggle still reaches their arrows.
fn update_rotor_arrows(
    applied: Res<AppliedSnapshot>,
    display: Res<OverlayDisplay>,
    pool: Res<RotorPool>,
    mut last_seen: Local<HashMap<RotorId, RotorState>>,
    mut arrows: ArrowQuery,
) {
    let Some(snapshot) = applied.snapshot.as_ref() else {
        return;
    };
    for rotor in &snapshot.rotors {
        last_seen.insert(rotor.id, rotor.clone());
    }
    let body_orientation = snapshot.body.orientation();

    for (id, object) in &pool.0 {
        let Some(rotor) = last_seen.get(id) else {
            continue;
        };
        let geometry = rotor_arrows(rotor, &body_orientation, &display.0);
        set_arrow(&mut arrows, object.motor_thrust, geometry.motor_thrust);
        set_arrow(&mut arrows, object.body_thrust, geometry.body_thrust);
        set_arrow(&mut arrows, object.torque, geometry.torque);
    }
}

/// Net thrust / torque at the body origin, along the true summed direction.
fn update_net_arrows(
    applied: Res<AppliedSnapshot>,
    display: Res<OverlayDisplay>,
    net: Option<Res<NetArrowEntities>>,
    mut arrows: ArrowQuery,
) {
    let (Some(snapshot), Some(net)) = (applied.snapshot.as_ref(), net) else {
        return;
    };
    let geometry = net_arrows(&snapshot.rotors, &display.0);
    let origin = vec3(&snapshot.body.position());

    for (entity, arrow) in [(net.thrust, geometry.thrust), (net.torque, geometry.torque)] {
        if let Ok((mut transform, mut visibility)) = arrows.get_mut(entity) {
            transform.translation = origin;
            apply_arrow(&mut transform, &mut visibility, arrow);
        }
    }

    trace!(
        "Net arrows at {origin}: thrust {:?}, torque {:?}",
        geometry.thrust.map(|a| a.length),
        geometry.torque.map(|a| a.length),
    );
}
