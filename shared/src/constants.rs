use std::time::Duration;

/// Endpoint the simulator publishes snapshots on.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8765";

/// Fixed delay between a lost (or refused) connection and the next attempt.
///
/// There is no backoff and no attempt cap: the link retries at this cadence forever.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(1000);

/// How long an open connection may go without any frame before it is treated as dead.
///
/// Covers peers that vanish without closing the TCP stream.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Vectors with a norm below this are treated as zero.
///
/// Applies to arrow lengths (collapse to 0) and to net-arrow directions (fall back to +Z).
pub const VECTOR_EPS: f32 = 1.0e-6;

/// Visual floor added to every non-zero arrow, in meters.
pub const ARROW_BASE_LENGTH: f32 = 0.05;

/// Meters of arrow per unit of magnitude (N or N·m) before saturation.
pub const ARROW_LENGTH_PER_UNIT: f32 = 0.2;

/// Upper bound of the scaled part of an arrow.
///
/// Convention:
/// - total length = `ARROW_BASE_LENGTH + min(m * ARROW_LENGTH_PER_UNIT, ARROW_SCALED_MAX)`
/// - the scaled part saturates at `m = ARROW_SCALED_MAX / ARROW_LENGTH_PER_UNIT` (5.0), length `1.05`
pub const ARROW_SCALED_MAX: f32 = 1.0;

/// Decimal places shown for magnitudes in rotor labels.
pub const LABEL_DECIMALS: usize = 2;
