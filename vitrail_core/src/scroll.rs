// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll timeline with damped progress and sub-band mapping.
//!
//! The host scroll surface owns the raw scroll position; each frame the
//! backend reports it as a normalized fraction and the timeline's damped
//! offset chases it. Consumers read [`progress`](ScrollTimeline::progress)
//! every frame and never cache it.
//!
//! Navigation produces [`ScrollCommand`]s; the backend applies them to the
//! host scroll surface. "Smooth" behavior is the timeline's own damping, not
//! a second easing curve.

use crate::follow::damp;

/// Number of virtual pages the portfolio scene scrolls through.
pub const SCENE_PAGES: f64 = 5.0;

/// Damping time constant for scroll offset, seconds.
pub const SCROLL_TAU: f64 = 0.2;

/// Multiplier on the per-page scroll distance of the host surface.
pub const SCROLL_DISTANCE: f64 = 0.4;

/// A request to move the host scroll surface to a progress fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollCommand {
    /// Target progress in `[0, 1]`.
    pub fraction: f64,
}

/// Scroll progress over a fixed number of virtual pages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTimeline {
    pages: f64,
    tau: f64,
    distance: f64,
    offset: f64,
    target: f64,
}

impl Default for ScrollTimeline {
    fn default() -> Self {
        Self::new(SCENE_PAGES, SCROLL_TAU, SCROLL_DISTANCE)
    }
}

impl ScrollTimeline {
    /// Creates a timeline over `pages` virtual pages with the given damping
    /// time constant and per-page distance factor.
    #[must_use]
    pub const fn new(pages: f64, tau: f64, distance: f64) -> Self {
        Self {
            pages,
            tau,
            distance,
            offset: 0.0,
            target: 0.0,
        }
    }

    /// Number of virtual pages.
    #[inline]
    #[must_use]
    pub const fn pages(&self) -> f64 {
        self.pages
    }

    /// Pixel extent the host scroll surface should span for a viewport of
    /// `client_height` pixels.
    #[must_use]
    pub fn scroll_extent(&self, client_height: f64) -> f64 {
        self.pages * client_height * self.distance
    }

    /// Sets the target fraction from the host's reported scroll position.
    pub fn set_target(&mut self, fraction: f64) {
        self.target = fraction.clamp(0.0, 1.0);
    }

    /// Advances the damped offset toward the target.
    pub fn update(&mut self, dt: f64) {
        self.offset = damp(self.offset, self.target, self.tau, dt);
    }

    /// Current damped progress in `[0, 1]`. Zero until the host surface has
    /// reported scrolling.
    #[inline]
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.offset
    }

    /// Maps the sub-band `[start, start + length]` of progress back onto
    /// `[0, 1]`, saturating at the band edges.
    #[must_use]
    pub fn range(&self, start: f64, length: f64) -> f64 {
        if length <= 0.0 {
            return if self.offset >= start { 1.0 } else { 0.0 };
        }
        ((self.offset - start) / length).clamp(0.0, 1.0)
    }

    /// Retargets the timeline at `fraction` and returns the command the
    /// backend forwards to the host scroll surface.
    pub fn scroll_to(&mut self, fraction: f64) -> ScrollCommand {
        self.set_target(fraction);
        ScrollCommand {
            fraction: self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled(target: f64) -> ScrollTimeline {
        let mut t = ScrollTimeline::default();
        t.set_target(target);
        for _ in 0..2000 {
            t.update(1.0 / 60.0);
        }
        t
    }

    #[test]
    fn progress_starts_at_zero() {
        let t = ScrollTimeline::default();
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn range_clamps_at_band_edges() {
        // range(0, 1/3) at progress 0.0 / 0.166 / 0.333 / 0.5.
        let third = 1.0 / 3.0;
        assert_eq!(settled(0.0).range(0.0, third), 0.0);
        assert!((settled(0.166).range(0.0, third) - 0.498).abs() < 0.01);
        assert!((settled(0.333).range(0.0, third) - 0.999).abs() < 0.01);
        assert_eq!(settled(0.5).range(0.0, third), 1.0);
    }

    #[test]
    fn range_of_later_band() {
        let t = settled(0.2);
        assert_eq!(t.range(0.5, 0.25), 0.0);
        let t = settled(0.625);
        assert!((t.range(0.5, 0.25) - 0.5).abs() < 0.01);
    }

    #[test]
    fn degenerate_band_is_a_step() {
        assert_eq!(settled(0.2).range(0.5, 0.0), 0.0);
        assert_eq!(settled(0.7).range(0.5, 0.0), 1.0);
    }

    #[test]
    fn target_is_clamped() {
        let mut t = ScrollTimeline::default();
        t.set_target(3.0);
        for _ in 0..2000 {
            t.update(1.0 / 60.0);
        }
        assert!(t.progress() <= 1.0);
        assert!((t.progress() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn offset_chases_target_smoothly() {
        let mut t = ScrollTimeline::default();
        t.set_target(1.0);
        t.update(1.0 / 60.0);
        let first = t.progress();
        assert!(first > 0.0 && first < 0.2, "one frame closes a fraction");
        t.update(1.0 / 60.0);
        assert!(t.progress() > first, "offset keeps approaching");
    }

    #[test]
    fn scroll_to_returns_clamped_command() {
        let mut t = ScrollTimeline::default();
        let cmd = t.scroll_to(0.214);
        assert_eq!(cmd, ScrollCommand { fraction: 0.214 });
        let cmd = t.scroll_to(-1.0);
        assert_eq!(cmd.fraction, 0.0);
    }

    #[test]
    fn scroll_extent_scales_with_pages() {
        let t = ScrollTimeline::default();
        // 5 pages × 800 px × 0.4 distance.
        assert!((t.scroll_extent(800.0) - 1600.0).abs() < 1e-9);
    }
}
