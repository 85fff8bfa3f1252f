//! Spherical marker positions.
//!
//! Angles follow the conventions of the panorama viewer: yaw grows to the
//! right around the vertical axis, pitch grows upwards. Text forms such as
//! `"31deg"` are accepted so tour files can be written by hand.

use crate::constants::{FULL_TURN, MAX_PITCH, MIN_PITCH};
use crate::error::TourError;
use glam::Vec3;
use std::f32::consts::PI;

/// Parse an angle in radians from `"<n>deg"`, `"<n>rad"`, `"<n>turn"` or a bare number.
pub fn parse_angle(text: &str) -> Result<f32, TourError> {
    let lower = text.trim().to_ascii_lowercase();
    let (number, factor) = if let Some(v) = lower.strip_suffix("deg") {
        (v, PI / 180.0)
    } else if let Some(v) = lower.strip_suffix("rad") {
        (v, 1.0)
    } else if let Some(v) = lower.strip_suffix("turn") {
        (v, FULL_TURN)
    } else {
        (lower.as_str(), 1.0)
    };
    number
        .trim()
        .parse::<f32>()
        .ok()
        .map(|v| v * factor)
        .filter(|v| v.is_finite())
        .ok_or_else(|| TourError::InvalidAngle(text.to_string()))
}

#[inline]
fn normalize_yaw(yaw: f32) -> f32 {
    let y = yaw.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly one full turn for tiny negative inputs
    if y >= FULL_TURN {
        0.0
    } else {
        y
    }
}

/// Marker position on the panorama sphere, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SphericalPosition {
    yaw: f32,
    pitch: f32,
}

impl SphericalPosition {
    /// Yaw is wrapped into `[0, 2π)`, pitch clamped into `[-π/2, π/2]`.
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw: normalize_yaw(yaw),
            pitch: pitch.clamp(MIN_PITCH, MAX_PITCH),
        }
    }

    pub fn from_degrees(yaw: f32, pitch: f32) -> Self {
        Self::new(yaw.to_radians(), pitch.to_radians())
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit vector looking at this position. Yaw 0 / pitch 0 is `+Z`, yaw π/2 is `+X`.
    pub fn direction(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * sy, sp, cp * cy)
    }

    /// Great-circle distance to `other`, in radians.
    pub fn angular_distance(&self, other: &SphericalPosition) -> f32 {
        self.direction()
            .dot(other.direction())
            .clamp(-1.0, 1.0)
            .acos()
    }
}
