//! nalgebra / wire types -> Bevy math types.
//!
//! Wire quaternions are scalar-first `[w, x, y, z]`; Bevy's `Quat` is scalar-last. All
//! orientation data from a snapshot goes through [`quat`] so the reordering lives in one place.

use bevy::prelude::*;
use nalgebra as na;
use shared::{BodyState, RotorState, quat_to_xyzw};

pub fn vec3(v: &na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn quat(q: &na::UnitQuaternion<f32>) -> Quat {
    Quat::from_array(quat_to_xyzw(q))
}

pub fn body_transform(body: &BodyState) -> Transform {
    Transform {
        translation: vec3(&body.position()),
        rotation: quat(&body.orientation()),
        scale: Vec3::ONE,
    }
}

pub fn rotor_transform(rotor: &RotorState) -> Transform {
    Transform {
        translation: vec3(&rotor.position()),
        rotation: quat(&rotor.orientation()),
        scale: Vec3::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_1_SQRT_2;

    fn body(quaternion: [f32; 4]) -> BodyState {
        BodyState {
            position: [1.0, -2.0, 3.5],
            quaternion,
        }
    }

    #[test]
    fn wire_quaternion_lands_in_bevy_order() {
        // 90 degrees about +Z, scalar first on the wire.
        let transform = body_transform(&body([FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2]));

        let expected = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        assert!(transform.rotation.abs_diff_eq(expected, 1e-6));
        assert!((transform.rotation * Vec3::X).abs_diff_eq(Vec3::Y, 1e-6));
        assert_eq!(transform.translation, Vec3::new(1.0, -2.0, 3.5));
    }

    #[test]
    fn pitch_about_x_is_not_confused_with_w() {
        // 180 degrees about +X: w = 0, x = 1.
        let transform = body_transform(&body([0.0, 1.0, 0.0, 0.0]));
        assert!((transform.rotation * Vec3::Z).abs_diff_eq(-Vec3::Z, 1e-6));
        assert!((transform.rotation * Vec3::X).abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn unnormalized_and_degenerate_quaternions_stay_finite() {
        let scaled = body_transform(&body([0.0, 0.0, 0.0, 3.0]));
        assert!(scaled.rotation.is_normalized());

        let zero = body_transform(&body([0.0; 4]));
        assert_eq!(zero.rotation, Quat::IDENTITY);
    }
}
