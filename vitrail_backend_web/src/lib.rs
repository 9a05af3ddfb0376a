// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for vitrail.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`InputCollector`]: pointer / resize / scroll sources for
//!   [`FrameInputs`](vitrail_core::timing::FrameInputs)
//! - [`CursorApplier`]: the cursor-style side effect
//! - [`now`]: host time from `performance.now()`
//!
//! A real deployment pairs these with a `PassExecutor` built on the page's
//! rendering stack; see `vitrail_render::PassExecutor` for the frame-loop
//! wiring.

#![no_std]

extern crate alloc;

mod cursor;
mod input;
mod raf;

pub use cursor::CursorApplier;
pub use input::{InputCollector, pointer_ndc, scroll_fraction};
pub use raf::RafLoop;

use vitrail_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks, matching the ticks
/// delivered by [`RafLoop`].
#[must_use]
pub fn now() -> HostTime {
    let ms = raf::performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}
