//! Fixed simulation constants.
//!
//! Everything a designer may want to tweak lives in [`crate::tuning::Tuning`];
//! the values here define the frame of reference the tunables are expressed in.

/// Reference refresh rate (Hz). Frame-counted tunables are 60 Hz-equivalent frames.
pub const REFERENCE_HZ: f64 = 60.0;

/// Seconds per reference frame.
pub const REFERENCE_FRAME_SECS: f64 = 1.0 / REFERENCE_HZ;

/// Largest host delta accepted in one tick (seconds). Longer stalls are clamped
/// so a hitch never teleports units through the arena wall.
pub const MAX_DELTA_SECS: f64 = 0.1;

/// Height of the ground plane. Units at or below it are grounded.
pub const GROUND_Y: f64 = 0.0;

/// Below this length a vector is treated as zero when normalizing.
pub const DIRECTION_EPSILON: f64 = 1e-6;

/// Below this length a steering input is treated as released.
pub const MOVE_INPUT_DEADZONE: f64 = 0.1;
