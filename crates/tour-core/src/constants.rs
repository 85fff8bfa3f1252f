// Shared navigation tuning constants used by both web and native frontends.

// Deferred marker replacement
pub const DEFAULT_MARKER_SWAP_DELAY_MS: u64 = 1000; // matches the viewer's panorama transition

// Spherical limits (radians)
pub const FULL_TURN: f32 = std::f32::consts::TAU;
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2; // straight up
pub const MIN_PITCH: f32 = -std::f32::consts::FRAC_PI_2; // straight down (floor logos)

// Field of view used when listing markers "in sight"
pub const DEFAULT_FOV_RADIANS: f32 = 65.0 * std::f32::consts::PI / 180.0;
