//! Arrow geometry for thrust and torque overlays.
//!
//! # Length
//! `m = |v|`. Below [`VECTOR_EPS`] the arrow collapses to zero length. Otherwise
//! `ARROW_BASE_LENGTH + min(m * ARROW_LENGTH_PER_UNIT, ARROW_SCALED_MAX)`, so large magnitudes
//! saturate instead of dominating the view.
//!
//! # Direction
//! Per-rotor arrows always point along the local +Z axis of the rotor frame, whatever the real
//! direction of the vector. Only the length carries information. Net arrows point along the
//! normalized sum, or +Z when the sum is (numerically) zero.
//!
//! NOTE: the per-rotor policy hides any off-axis component of a rotor's thrust or torque, while
//! net arrows show the true direction. Probably unintended upstream; left unchanged for now.

use crate::{
    constants::{ARROW_BASE_LENGTH, ARROW_LENGTH_PER_UNIT, ARROW_SCALED_MAX, VECTOR_EPS},
    display::DisplayState,
    snapshot::RotorState,
};
use nalgebra::{UnitQuaternion, Vector3};

/// Displayed arrow length for a vector of the given norm.
pub fn arrow_length(magnitude: f32) -> f32 {
    if magnitude.is_nan() || magnitude < VECTOR_EPS {
        return 0.0;
    }
    ARROW_BASE_LENGTH + (magnitude * ARROW_LENGTH_PER_UNIT).min(ARROW_SCALED_MAX)
}

/// Direction (in the arrow's parent frame) and length of one overlay arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    pub direction: Vector3<f32>,
    pub length: f32,
}

impl ArrowGeometry {
    /// Per-rotor arrow: along the parent frame's +Z, scaled by the vector's norm.
    pub fn along_local_z(vector: &Vector3<f32>) -> Self {
        Self {
            direction: Vector3::z(),
            length: arrow_length(vector.norm()),
        }
    }

    /// Net arrow: along the vector itself, +Z when it has no usable direction.
    pub fn along_vector(vector: &Vector3<f32>) -> Self {
        let magnitude = vector.norm();
        let direction = if magnitude.is_finite() && magnitude >= VECTOR_EPS {
            vector / magnitude
        } else {
            Vector3::z()
        };
        Self {
            direction,
            length: arrow_length(magnitude),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.length > 0.0
    }
}

/// Rotor thrust expressed with the body's current orientation.
///
/// `thrust_body` is rotated into world coordinates; without it `thrust_world` is used as-is.
pub fn body_frame_thrust(rotor: &RotorState, body_orientation: &UnitQuaternion<f32>) -> Vector3<f32> {
    match rotor.thrust_body() {
        Some(thrust_body) => body_orientation * thrust_body,
        None => rotor.thrust_world(),
    }
}

/// Component-wise sum of every rotor's `thrust_world`.
pub fn net_thrust(rotors: &[RotorState]) -> Vector3<f32> {
    rotors
        .iter()
        .fold(Vector3::zeros(), |acc, rotor| acc + rotor.thrust_world())
}

/// Component-wise sum of `torque_world`; rotors without it contribute zero.
pub fn net_torque(rotors: &[RotorState]) -> Vector3<f32> {
    rotors
        .iter()
        .filter_map(RotorState::torque_world)
        .fold(Vector3::zeros(), |acc, torque| acc + torque)
}

/// Per-frame aggregates. Always rebuilt from the full rotor list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetVectors {
    pub thrust: Vector3<f32>,
    pub torque: Vector3<f32>,
}

impl NetVectors {
    pub fn from_rotors(rotors: &[RotorState]) -> Self {
        Self {
            thrust: net_thrust(rotors),
            torque: net_torque(rotors),
        }
    }
}

/// The arrows one rotor shows this frame. `None` means hidden.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotorArrows {
    pub motor_thrust: Option<ArrowGeometry>,
    pub body_thrust: Option<ArrowGeometry>,
    pub torque: Option<ArrowGeometry>,
}

/// Arrows for one rotor under the given display state.
///
/// Disabled groups are not computed at all.
pub fn rotor_arrows(
    rotor: &RotorState,
    body_orientation: &UnitQuaternion<f32>,
    display: &DisplayState,
) -> RotorArrows {
    let motor_thrust = display
        .thrust_motor()
        .then(|| ArrowGeometry::along_local_z(&rotor.thrust_world()));

    let body_thrust = display
        .thrust_body()
        .then(|| ArrowGeometry::along_local_z(&body_frame_thrust(rotor, body_orientation)));

    let torque = if display.torque() {
        rotor
            .torque_world()
            .map(|torque| ArrowGeometry::along_local_z(&torque))
    } else {
        None
    };

    RotorArrows {
        motor_thrust,
        body_thrust,
        torque,
    }
}

/// Aggregate arrows, both anchored at the body origin. `None` means hidden.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetArrows {
    pub thrust: Option<ArrowGeometry>,
    pub torque: Option<ArrowGeometry>,
}

/// Net arrows under the given display state. Nothing is summed while both are switched off.
pub fn net_arrows(rotors: &[RotorState], display: &DisplayState) -> NetArrows {
    if !display.net_thrust() && !display.net_torque() {
        return NetArrows::default();
    }
    let net = NetVectors::from_rotors(rotors);
    NetArrows {
        thrust: display
            .net_thrust()
            .then(|| ArrowGeometry::along_vector(&net.thrust)),
        torque: display
            .net_torque()
            .then(|| ArrowGeometry::along_vector(&net.torque)),
    }
}
