// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks and per-frame host input snapshots.
//!
//! Each animation frame, the backend delivers a [`FrameTick`] (when) and a
//! [`FrameInputs`] snapshot (what the host environment currently looks like).
//! Consumers re-read inputs every frame and never hold them across frames.
//!
//! The scene's only outward-facing side effects travel the other way:
//! a [`CursorStyle`] the backend applies to the document, and scroll
//! commands (see [`scroll`](crate::scroll)).

use kurbo::{Point, Size};

use crate::time::HostTime;

/// A frame opportunity delivered by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time when the tick was generated.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

/// Snapshot of host input state for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInputs {
    /// Pointer position in normalized device coordinates, `[-1, 1]` on each
    /// axis with +y up, or `None` while the pointer is outside the canvas.
    pub pointer_ndc: Option<Point>,
    /// Whether the primary button was clicked since the previous snapshot.
    pub clicked: bool,
    /// Current canvas size in CSS pixels.
    pub viewport_px: Size,
    /// Normalized scroll position of the host scroll surface in `[0, 1]`;
    /// zero before the surface has reported anything.
    pub scroll_fraction: f64,
}

impl Default for FrameInputs {
    fn default() -> Self {
        Self {
            pointer_ndc: None,
            clicked: false,
            viewport_px: Size::ZERO,
            scroll_fraction: 0.0,
        }
    }
}

/// Pointer cursor requested by the scene for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorStyle {
    /// The host's default cursor.
    #[default]
    Default,
    /// The "pointer" (hand) cursor, shown over interactive labels.
    Pointer,
}

impl CursorStyle {
    /// The CSS cursor keyword for this style.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Default => "auto",
            Self::Pointer => "pointer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inputs_are_inert() {
        let inputs = FrameInputs::default();
        assert!(inputs.pointer_ndc.is_none());
        assert!(!inputs.clicked);
        assert_eq!(inputs.scroll_fraction, 0.0);
    }

    #[test]
    fn cursor_css_keywords() {
        assert_eq!(CursorStyle::Default.as_css(), "auto");
        assert_eq!(CursorStyle::Pointer.as_css(), "pointer");
    }
}
