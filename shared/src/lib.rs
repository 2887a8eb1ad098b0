pub mod constants;
pub mod display;
pub mod label;
pub mod link;
pub mod overlay;
pub mod slot;
pub mod snapshot;

pub use constants::{
    ARROW_BASE_LENGTH, ARROW_LENGTH_PER_UNIT, ARROW_SCALED_MAX, DEFAULT_ENDPOINT, IDLE_TIMEOUT,
    RECONNECT_DELAY, VECTOR_EPS,
};
pub use display::{DisplayControl, DisplayState, ThrustMode, TorqueMode};
pub use label::{RotorReadout, ndc_depth_visible, ndc_to_pixels};
pub use link::{LinkEvent, LinkState};
pub use overlay::{
    ArrowGeometry, NetArrows, NetVectors, RotorArrows, arrow_length, body_frame_thrust,
    net_arrows, net_thrust, net_torque, rotor_arrows,
};
pub use slot::LatestSlot;
pub use snapshot::{
    BodyState, DecodeError, RotorId, RotorState, Snapshot, decode_snapshot,
    decode_snapshot_bytes, quat_to_xyzw, unit_quat_from_wire,
};
