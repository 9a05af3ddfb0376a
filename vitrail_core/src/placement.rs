// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchical placement: position plus non-uniform scale.
//!
//! Nothing in this scene rotates through the hierarchy (the glass shape's
//! fixed orientation is carried on its render pass), so placement composition
//! is translate-and-scale only. World placement of a node is
//! `parent_world * local`.

use core::ops::Mul;

use crate::geometry::Vec3;

/// A position and non-uniform scale, composing hierarchically.
///
/// Composition follows the usual parent-to-child convention: the child's
/// position is interpreted in the parent's scaled space, so
/// `world.position = parent.position + parent.scale ⊙ local.position` and
/// `world.scale = parent.scale ⊙ local.scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Position in the parent's coordinate space.
    pub position: Vec3,
    /// Per-axis scale factors.
    pub scale: Vec3,
}

impl Placement {
    /// The identity placement (origin, unit scale).
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Creates a placement from a position and scale.
    #[inline]
    #[must_use]
    pub const fn new(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }

    /// Creates a pure translation.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            scale: Vec3::ONE,
        }
    }

    /// Creates a uniform scale about the origin.
    #[inline]
    #[must_use]
    pub const fn from_scale(s: f64) -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::splat(s),
        }
    }

    /// Creates a non-uniform scale about the origin.
    #[inline]
    #[must_use]
    pub const fn from_scale_xyz(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::new(sx, sy, sz),
        }
    }

    /// Is this placement [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.position.is_finite() && self.scale.is_finite()
    }
}

impl Default for Placement {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Placement {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            position: self.position + self.scale.mul_component(rhs.position),
            scale: self.scale.mul_component(rhs.scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert_eq!(Placement::default(), Placement::IDENTITY);
    }

    #[test]
    fn identity_compose() {
        let p = Placement::from_translation(1.0, 2.0, 3.0);
        assert_eq!(Placement::IDENTITY * p, p);
        assert_eq!(p * Placement::IDENTITY, p);
    }

    #[test]
    fn translation_composition() {
        let a = Placement::from_translation(1.0, 0.0, 0.0);
        let b = Placement::from_translation(0.0, 2.0, 0.0);
        let c = a * b;
        assert_eq!(c.position, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(c.scale, Vec3::ONE);
    }

    #[test]
    fn parent_scale_applies_to_child_position() {
        let parent = Placement::new(Vec3::new(10.0, 0.0, 0.0), Vec3::splat(2.0));
        let child = Placement::from_translation(3.0, 4.0, 0.0);
        let world = parent * child;
        // Child position is measured in the parent's scaled space.
        assert_eq!(world.position, Vec3::new(16.0, 8.0, 0.0));
        assert_eq!(world.scale, Vec3::splat(2.0));
    }

    #[test]
    fn scales_multiply() {
        let a = Placement::from_scale(2.0);
        let b = Placement::from_scale_xyz(3.0, 1.0, 0.5);
        assert_eq!((a * b).scale, Vec3::new(6.0, 2.0, 1.0));
    }

    #[test]
    fn non_finite_detected() {
        let mut p = Placement::IDENTITY;
        assert!(p.is_finite());
        p.position.z = f64::INFINITY;
        assert!(!p.is_finite());
    }
}
