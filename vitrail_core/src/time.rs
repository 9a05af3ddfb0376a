// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time and per-frame delta derivation.
//!
//! [`HostTime`] is a point in time in microsecond ticks, as produced by the
//! host backend (on the web, `performance.now()` milliseconds converted to
//! microseconds). All damping in this crate is driven by wall-clock frame
//! deltas, so [`DeltaClock`] converts consecutive tick times into clamped
//! seconds: a long gap between frames (a backgrounded tab, a debugger pause)
//! is capped so smoothed values never teleport to their targets.

use core::fmt;
use core::ops::{Add, Sub};

/// A point in time expressed as microsecond ticks of the host's monotonic
/// clock.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw microsecond tick value.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Creates a host time from whole milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1_000)
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for HostTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({}us)", self.0)
    }
}

/// A duration in microsecond ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Returns the raw microsecond tick value.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Creates a duration from whole milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1_000)
    }

    /// This duration in seconds.
    #[inline]
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

impl Add for Duration {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({}us)", self.0)
    }
}

/// Derives clamped per-frame deltas (in seconds) from consecutive tick times.
///
/// The first observed tick yields a delta of zero. Subsequent deltas are
/// capped at `max_delta` so that animation state advances by at most one
/// bounded step regardless of how long the host paused the loop.
#[derive(Clone, Copy, Debug)]
pub struct DeltaClock {
    last: Option<HostTime>,
    max_delta: Duration,
}

/// Cap applied to frame deltas, matching the longest step the damping model
/// tolerates without visible popping.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

impl Default for DeltaClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA)
    }
}

impl DeltaClock {
    /// Creates a clock with the given delta cap.
    #[must_use]
    pub const fn new(max_delta: Duration) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Feeds the next tick time and returns the clamped delta in seconds.
    pub fn tick(&mut self, now: HostTime) -> f64 {
        let delta = match self.last {
            Some(last) => {
                let raw = now.saturating_duration_since(last);
                if raw > self.max_delta { self.max_delta } else { raw }
            }
            None => Duration::ZERO,
        };
        self.last = Some(now);
        delta.as_secs_f64()
    }

    /// Forgets the previous tick, so the next delta is zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micros_round_trip() {
        let t = HostTime::from_millis(16);
        assert_eq!(t.micros(), 16_000);
        assert_eq!(
            t.saturating_duration_since(HostTime(6_000)),
            Duration(10_000)
        );
        assert_eq!(
            HostTime(5_000).saturating_duration_since(t),
            Duration::ZERO
        );
    }

    #[test]
    fn duration_seconds() {
        assert!((Duration::from_millis(16).as_secs_f64() - 0.016).abs() < 1e-12);
    }

    #[test]
    fn first_tick_is_zero_delta() {
        let mut clock = DeltaClock::default();
        assert_eq!(clock.tick(HostTime(1_000_000)), 0.0);
    }

    #[test]
    fn steady_ticks_yield_frame_delta() {
        let mut clock = DeltaClock::default();
        let _ = clock.tick(HostTime(0));
        let dt = clock.tick(HostTime(16_667));
        assert!((dt - 0.016_667).abs() < 1e-9);
    }

    #[test]
    fn long_gap_is_clamped() {
        let mut clock = DeltaClock::default();
        let _ = clock.tick(HostTime(0));
        // A five-second stall (e.g. a backgrounded tab) clamps to the cap.
        let dt = clock.tick(HostTime(5_000_000));
        assert!((dt - 0.1).abs() < 1e-12);
    }

    #[test]
    fn reset_restarts_delta_tracking() {
        let mut clock = DeltaClock::default();
        let _ = clock.tick(HostTime(0));
        clock.reset();
        assert_eq!(clock.tick(HostTime(1_000_000)), 0.0);
    }
}
