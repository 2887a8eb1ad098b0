//! Rotor annotation text and screen placement math.

use crate::{
    constants::LABEL_DECIMALS,
    snapshot::{RotorId, RotorState},
};
use nalgebra::Vector2;

/// What one rotor label reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotorReadout {
    pub id: RotorId,
    pub thrust: f32,
    pub torque: f32,
}

impl RotorReadout {
    /// World-frame magnitudes; a rotor without torque reads zero.
    pub fn from_rotor(rotor: &RotorState) -> Self {
        Self {
            id: rotor.id,
            thrust: rotor.thrust_world().norm(),
            torque: rotor.torque_world().map_or(0.0, |torque| torque.norm()),
        }
    }

    pub fn text(&self) -> String {
        format!(
            "R{} T:{:.*} Q:{:.*}",
            self.id, LABEL_DECIMALS, self.thrust, LABEL_DECIMALS, self.torque
        )
    }
}

/// Whether an NDC depth lies inside the clip volume (in front of the camera).
pub fn ndc_depth_visible(depth: f32) -> bool {
    (0.0..=1.0).contains(&depth)
}

/// Map normalized device coordinates to pixels from the viewport's top-left corner.
///
/// NDC `x` grows right and `y` grows up, both in `[-1, 1]`; pixel `y` grows down.
pub fn ndc_to_pixels(ndc: Vector2<f32>, viewport: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(
        (ndc.x * 0.5 + 0.5) * viewport.x,
        (-ndc.y * 0.5 + 0.5) * viewport.y,
    )
}
