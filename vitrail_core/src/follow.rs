// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damped pointer-follow positioning and fit-to-viewport scaling.
//!
//! Motion here is a critically-damped single-pole filter, not a spring:
//! each frame the tracked value closes a fraction `1 − exp(−dt/τ)` of the
//! remaining gap to its target. Because the fraction is computed from the
//! elapsed wall-clock time, convergence is frame-rate independent and the
//! value approaches its target asymptotically without overshoot.

use kurbo::{Point, Size};

use crate::geometry::Vec3;

/// Exponentially damps `current` toward `target` over elapsed time `dt`
/// with time constant `tau` (seconds).
///
/// A non-positive `tau` or an enormous `dt` both degenerate to snapping to
/// the target.
#[must_use]
pub fn damp(current: f64, target: f64, tau: f64, dt: f64) -> f64 {
    if tau <= 0.0 {
        return target;
    }
    let factor = 1.0 - libm::exp(-dt / tau);
    current + (target - current) * factor
}

/// Component-wise [`damp`] for vectors.
#[must_use]
pub fn damp3(current: Vec3, target: Vec3, tau: f64, dt: f64) -> Vec3 {
    Vec3::new(
        damp(current.x, target.x, tau, dt),
        damp(current.y, target.y, tau, dt),
        damp(current.z, target.z, tau, dt),
    )
}

/// Damping time constant for the glass shape, seconds.
pub const FOLLOW_TAU: f64 = 0.15;

/// Largest scale the fit clamp will ever produce.
pub const MAX_SHAPE_SCALE: f64 = 0.15;

/// Fraction of the viewport width the shape may fill.
pub const VIEWPORT_FILL_LIMIT: f64 = 0.9;

/// Pins the tracked object to a horizontal viewport edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeLock {
    /// Pin to the top edge, `margin` world units inward.
    Top {
        /// Inward offset from the edge, world units.
        margin: f64,
    },
    /// Pin to the bottom edge, `margin` world units inward.
    Bottom {
        /// Inward offset from the edge, world units.
        margin: f64,
    },
}

/// How a [`FollowRig`] chooses its per-frame target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowConfig {
    /// Follow the pointer on the x axis; otherwise anchor at x = 0.
    pub follow_x: bool,
    /// Follow the pointer on the y axis; otherwise anchor at y = 0.
    pub follow_y: bool,
    /// Overrides the y target with an edge pin when set.
    pub lock: Option<EdgeLock>,
    /// Depth plane (world z) the object rides on.
    pub depth: f64,
    /// Damping time constant, seconds.
    pub tau: f64,
}

impl FollowConfig {
    /// Follows the pointer on both axes (lens and cube shapes).
    #[must_use]
    pub const fn pointer(depth: f64) -> Self {
        Self {
            follow_x: true,
            follow_y: true,
            lock: None,
            depth,
            tau: FOLLOW_TAU,
        }
    }

    /// Ignores the pointer and pins to the top edge (the bar shape).
    #[must_use]
    pub const fn top_bar(depth: f64, margin: f64) -> Self {
        Self {
            follow_x: false,
            follow_y: false,
            lock: Some(EdgeLock::Top { margin }),
            depth,
            tau: FOLLOW_TAU,
        }
    }
}

/// Owned, per-frame-mutated transform state for one tracked object.
///
/// Exactly one rig exists per tracked object and only
/// [`update`](Self::update) mutates it; input handlers merely feed fresh
/// targets through its arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowRig {
    position: Vec3,
    scale: f64,
}

impl Default for FollowRig {
    fn default() -> Self {
        Self::new()
    }
}

impl FollowRig {
    /// Creates a rig at the origin with unit scale.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Current smoothed position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Current scale.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Overrides the scale (used when a mode supplies a fixed scale).
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Advances the rig by one frame.
    ///
    /// `pointer_world` is the pointer mapped onto the rig's depth plane, or
    /// `None` while the pointer is away (treated as the anchor). `extent` is
    /// the viewport's world extent on that plane.
    pub fn update(
        &mut self,
        config: &FollowConfig,
        pointer_world: Option<Point>,
        extent: Size,
        dt: f64,
    ) {
        let pointer = pointer_world.unwrap_or(Point::ORIGIN);
        let target_x = if config.follow_x { pointer.x } else { 0.0 };
        let target_y = match config.lock {
            Some(EdgeLock::Top { margin }) => extent.height / 2.0 - margin,
            Some(EdgeLock::Bottom { margin }) => -extent.height / 2.0 + margin,
            None if config.follow_y => pointer.y,
            None => 0.0,
        };
        let target = Vec3::new(target_x, target_y, config.depth);
        self.position = damp3(self.position, target, config.tau, dt);
    }
}

/// Scale that fits a shape of `intrinsic_width` within
/// [`VIEWPORT_FILL_LIMIT`] of the viewport's world width, clamped to
/// [`MAX_SHAPE_SCALE`].
///
/// Before the geometry asset has reported bounds, callers pass an intrinsic
/// width of 1.0; the resulting few frames of nominal sizing are an accepted
/// startup transient.
#[must_use]
pub fn fit_scale(viewport_world_width: f64, intrinsic_width: f64) -> f64 {
    let width = if intrinsic_width > 0.0 {
        intrinsic_width
    } else {
        1.0
    };
    let desired = viewport_world_width * VIEWPORT_FILL_LIMIT / width;
    desired.min(MAX_SHAPE_SCALE)
}
