//! Camera-related constants.

/// World point the camera is centered on at startup and after a reset
pub const CAMERA_INITIAL_X: f32 = 0.0;
pub const CAMERA_INITIAL_Y: f32 = 0.0;
/// Scale at startup and after a reset (screen pixels per world unit)
pub const CAMERA_INITIAL_SCALE: f32 = 1.0;
/// Minimum scale
pub const CAMERA_MIN_SCALE: f32 = 0.1;
/// Maximum scale
pub const CAMERA_MAX_SCALE: f32 = 10.0;
/// Zoom multiplier per wheel line
pub const CAMERA_WHEEL_STEP: f32 = 1.1;
/// Pixel scroll deltas are converted to lines with this divisor
pub const CAMERA_WHEEL_PIXELS_PER_LINE: f32 = 50.0;
/// Velocity multiplier per reference frame while decelerating
pub const CAMERA_DECELERATE_FRICTION: f32 = 0.95;
/// Reference frame length for friction (ms)
pub const CAMERA_DECELERATE_FRAME_MS: f32 = 1000.0 / 60.0;
/// Speed below which deceleration stops (screen px per ms)
pub const CAMERA_DECELERATE_MIN_SPEED: f32 = 0.01;
/// Only drag samples this recent contribute to release velocity (ms)
pub const CAMERA_VELOCITY_WINDOW_MS: f64 = 100.0;
