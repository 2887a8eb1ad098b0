//! Wire schema for simulator snapshots.
//!
//! One JSON document per WebSocket frame:
//!
//! ```text
//! { "t": 0.125,
//!   "body":   { "position": [x, y, z], "quaternion": [w, x, y, z] },
//!   "rotors": [ { "id": 0,
//!                 "position_world": [x, y, z], "quaternion_world": [w, x, y, z],
//!                 "thrust_world": [x, y, z],
//!                 "thrust_body": [x, y, z], "torque_world": [x, y, z], "torque_body": [x, y, z] } ] }
//! ```
//!
//! Decoding is structural only: required fields must be present with the right shape, optional
//! fields become `None`, unknown fields are ignored. Nothing checks quaternion norms or id
//! uniqueness; consumers go through [`unit_quat_from_wire`] which never yields NaN.

use crate::constants::VECTOR_EPS;
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::Deserialize;
use thiserror::Error;

/// Rotor identifier as sent by the simulator.
pub type RotorId = u32;

/// `[x, y, z]` as sent on the wire.
pub type WireVec3 = [f32; 3];

/// `[w, x, y, z]` as sent on the wire (scalar first).
pub type WireQuat = [f32; 4];

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed snapshot frame: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snapshot {
    /// Simulation time in seconds, when the publisher includes it.
    #[serde(default, rename = "t")]
    pub time: Option<f64>,
    pub body: BodyState,
    pub rotors: Vec<RotorState>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyState {
    pub position: WireVec3,
    pub quaternion: WireQuat,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RotorState {
    pub id: RotorId,
    pub position_world: WireVec3,
    pub quaternion_world: WireQuat,
    pub thrust_world: WireVec3,
    #[serde(default)]
    pub thrust_body: Option<WireVec3>,
    #[serde(default)]
    pub torque_world: Option<WireVec3>,
    /// Carried for completeness; nothing draws it.
    #[serde(default)]
    pub torque_body: Option<WireVec3>,
}

impl BodyState {
    pub fn position(&self) -> Vector3<f32> {
        Vector3::from(self.position)
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        unit_quat_from_wire(self.quaternion)
    }
}

impl RotorState {
    pub fn position(&self) -> Vector3<f32> {
        Vector3::from(self.position_world)
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        unit_quat_from_wire(self.quaternion_world)
    }

    pub fn thrust_world(&self) -> Vector3<f32> {
        Vector3::from(self.thrust_world)
    }

    pub fn thrust_body(&self) -> Option<Vector3<f32>> {
        self.thrust_body.map(Vector3::from)
    }

    pub fn torque_world(&self) -> Option<Vector3<f32>> {
        self.torque_world.map(Vector3::from)
    }
}

/// Decode one text frame.
pub fn decode_snapshot(text: &str) -> Result<Snapshot, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode one binary frame holding UTF-8 JSON.
pub fn decode_snapshot_bytes(bytes: &[u8]) -> Result<Snapshot, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Build a unit quaternion from the scalar-first wire layout.
///
/// Non-normalized input is normalized. Zero-length or non-finite input maps to identity.
pub fn unit_quat_from_wire(q: WireQuat) -> UnitQuaternion<f32> {
    let [w, x, y, z] = q;
    let raw = Quaternion::new(w, x, y, z);
    let norm = raw.norm();
    if norm.is_finite() && norm > VECTOR_EPS {
        UnitQuaternion::from_quaternion(raw)
    } else {
        UnitQuaternion::identity()
    }
}

/// Scalar-last layout `[x, y, z, w]` used by render-engine rotation types.
pub fn quat_to_xyzw(q: &UnitQuaternion<f32>) -> [f32; 4] {
    [q.i, q.j, q.k, q.w]
}
