#![forbid(unsafe_code)]

//! Magnetic pointer attraction.
//!
//! [`MagneticField`] is a pure geometry function: given a pointer position
//! and a target's bounding region it computes a bounded displacement that
//! pulls the target toward the pointer inside an influence radius. Falloff
//! is linear in distance, so strength is 1 at the center and 0 at the
//! radius.
//!
//! The field holds no subscriptions and no mutable state. Gliding the
//! visual offset back to zero when the pointer leaves is the caller's
//! interpolation concern (see [`crate::smoothing`]); the field only
//! reports the raw offset for each sample.

use crate::error::MotionError;
use crate::geometry::{Region, Vec2};

/// Displacement produced by one magnetic field sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MagneticOffset {
    /// Horizontal displacement in px.
    pub dx: f64,
    /// Vertical displacement in px.
    pub dy: f64,
    /// Normalized proximity: 1 at the region center, 0 at or beyond the
    /// influence radius.
    pub strength: f64,
}

impl MagneticOffset {
    /// The zero offset.
    pub const ZERO: Self = Self {
        dx: 0.0,
        dy: 0.0,
        strength: 0.0,
    };

    /// The offset as a displacement vector.
    #[inline]
    pub fn displacement(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }
}

/// Bounded pointer attraction with linear falloff.
#[derive(Debug, Clone, Copy)]
pub struct MagneticField {
    radius: f64,
    max_pull: f64,
}

impl MagneticField {
    /// Create a field. `radius` must be positive and finite; `max_pull`
    /// non-negative and finite. Rejected values are never clamped.
    pub fn new(radius: f64, max_pull: f64) -> Result<Self, MotionError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MotionError::InvalidConfig {
                what: "magnetic radius must be positive and finite",
            });
        }
        if !max_pull.is_finite() || max_pull < 0.0 {
            return Err(MotionError::InvalidConfig {
                what: "magnetic max pull must be non-negative and finite",
            });
        }
        Ok(Self { radius, max_pull })
    }

    /// The influence radius in px.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The maximum displacement magnitude in px.
    #[inline]
    pub fn max_pull(&self) -> f64 {
        self.max_pull
    }

    /// Compute the displacement for one pointer sample.
    ///
    /// Pure: identical inputs always produce an identical output.
    pub fn compute_offset(&self, pointer: Vec2, region: Region) -> MagneticOffset {
        let d = pointer - region.center();
        let distance = d.length();
        if distance >= self.radius {
            return MagneticOffset::ZERO;
        }
        let strength = 1.0 - distance / self.radius;
        if distance == 0.0 {
            // Direction is undefined at the exact center.
            return MagneticOffset {
                dx: 0.0,
                dy: 0.0,
                strength: 1.0,
            };
        }
        let magnitude = (strength * self.max_pull).min(self.max_pull);
        let offset = d.normalized() * magnitude;
        MagneticOffset {
            dx: offset.x,
            dy: offset.y,
            strength,
        }
    }

    /// The outer box outside which hosts can skip sampling entirely.
    pub fn influence_bounds(&self, region: Region) -> Region {
        region.expand(self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Region {
        // Center at (100, 100).
        Region::new(50.0, 75.0, 100.0, 50.0)
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        assert!(MagneticField::new(0.0, 10.0).is_err());
        assert!(MagneticField::new(-5.0, 10.0).is_err());
        assert!(MagneticField::new(f64::NAN, 10.0).is_err());
        assert!(MagneticField::new(100.0, -1.0).is_err());
        assert!(MagneticField::new(100.0, f64::INFINITY).is_err());
        assert!(MagneticField::new(100.0, 0.0).is_ok());
    }

    #[test]
    fn outside_radius_is_zero() {
        let field = MagneticField::new(50.0, 20.0).unwrap();
        let offset = field.compute_offset(Vec2::new(200.0, 100.0), region());
        assert_eq!(offset, MagneticOffset::ZERO);

        // Exactly at the radius counts as outside.
        let offset = field.compute_offset(Vec2::new(150.0, 100.0), region());
        assert_eq!(offset, MagneticOffset::ZERO);
    }

    #[test]
    fn center_has_full_strength_and_no_direction() {
        let field = MagneticField::new(50.0, 20.0).unwrap();
        let offset = field.compute_offset(Vec2::new(100.0, 100.0), region());
        assert_eq!(offset.displacement(), Vec2::ZERO);
        assert_eq!(offset.strength, 1.0);
    }

    #[test]
    fn strength_decreases_linearly_with_distance() {
        let field = MagneticField::new(100.0, 30.0).unwrap();
        let near = field.compute_offset(Vec2::new(110.0, 100.0), region());
        let mid = field.compute_offset(Vec2::new(150.0, 100.0), region());
        let far = field.compute_offset(Vec2::new(190.0, 100.0), region());
        assert!((near.strength - 0.9).abs() < 1e-12);
        assert!((mid.strength - 0.5).abs() < 1e-12);
        assert!((far.strength - 0.1).abs() < 1e-12);
        assert!(near.strength > mid.strength && mid.strength > far.strength);
    }

    #[test]
    fn offset_magnitude_never_exceeds_max_pull() {
        let field = MagneticField::new(80.0, 24.0).unwrap();
        for i in 0..200 {
            let pointer = Vec2::new(100.0 + i as f64, 100.0 - i as f64 * 0.5);
            let offset = field.compute_offset(pointer, region());
            assert!(offset.displacement().length() <= 24.0 + 1e-9);
        }
    }

    #[test]
    fn offset_points_from_center_toward_pointer() {
        let field = MagneticField::new(100.0, 30.0).unwrap();
        let offset = field.compute_offset(Vec2::new(150.0, 100.0), region());
        assert!(offset.dx > 0.0);
        assert_eq!(offset.dy, 0.0);
    }

    #[test]
    fn compute_offset_is_deterministic() {
        let field = MagneticField::new(120.0, 24.0).unwrap();
        let pointer = Vec2::new(137.5, 88.25);
        assert_eq!(
            field.compute_offset(pointer, region()),
            field.compute_offset(pointer, region())
        );
    }

    #[test]
    fn influence_bounds_expand_by_radius() {
        let field = MagneticField::new(40.0, 10.0).unwrap();
        let bounds = field.influence_bounds(region());
        assert_eq!(bounds, Region::new(10.0, 35.0, 180.0, 130.0));
    }
}
