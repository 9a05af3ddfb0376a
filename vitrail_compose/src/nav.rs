// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bar mode's navigation row.
//!
//! A row of clickable labels pinned to the top edge of the viewport, spaced
//! by the device profile. Each label maps to a scroll-progress fraction from
//! the manifest table. Interaction state per label is two independent flags:
//! *hovered* (slightly enlarged font, pointer cursor) and *recently clicked*
//! (a colored outline for 300 ms, restarted by a rapid re-click). There is
//! no shared state machine between labels.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use vitrail_core::node::{NodeContent, NodeId, NodeStore, TextId};
use vitrail_core::placement::Placement;
use vitrail_core::scroll::{ScrollCommand, ScrollTimeline};
use vitrail_core::timing::{CursorStyle, FrameInputs};
use vitrail_core::viewport::{Camera, LayoutProfile, Viewport};

use crate::text::{ACCENT, TextOutline, TextRun, TextTable};

/// Depth the navigation row renders at, just in front of the glass plane.
pub const NAV_DEPTH: f64 = 15.1;

/// Depth plane used for pinning math and pointer hit-testing.
pub const NAV_PLANE: f64 = 15.0;

/// Inward offset of the row from the top viewport edge, world units.
pub const NAV_TOP_MARGIN: f64 = 0.112;

/// How long a clicked label keeps its outline, seconds.
pub const OUTLINE_SECONDS: f64 = 0.3;

/// Font enlargement applied to a hovered label.
const HOVER_SCALE: f64 = 1.01;

/// Approximate glyph advance as a fraction of the font size, used for label
/// hit boxes.
const GLYPH_WIDTH_FACTOR: f64 = 0.6;

/// Vertical hit-box half-extent as a fraction of the font size.
const HIT_HEIGHT_FACTOR: f64 = 0.7;

struct LabelState {
    node: NodeId,
    text: TextId,
    glyph_count: usize,
    target_fraction: f64,
    hovered: bool,
    outline_until: Option<f64>,
}

/// The navigation row: owns its label nodes and interaction flags.
pub struct NavBar {
    group: NodeId,
    labels: Vec<LabelState>,
}

impl core::fmt::Debug for NavBar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavBar")
            .field("labels", &self.labels.len())
            .finish()
    }
}

impl NavBar {
    /// Builds label nodes under `parent` from `(label, target_fraction)`
    /// entries.
    pub fn build(
        store: &mut NodeStore,
        texts: &mut TextTable,
        parent: NodeId,
        entries: &[(String, f64)],
        profile: &LayoutProfile,
    ) -> Self {
        let group = store.create_node();
        store.add_child(parent, group);

        let mut labels = Vec::with_capacity(entries.len());
        for (label, target_fraction) in entries {
            let text = texts.insert(TextRun::plain(label.clone(), profile.nav_font_size));
            let node = store.create_node();
            store.set_content(node, NodeContent::Text(text));
            store.add_child(group, node);
            labels.push(LabelState {
                node,
                text,
                glyph_count: label.chars().count(),
                target_fraction: *target_fraction,
                hovered: false,
                outline_until: None,
            });
        }

        Self { group, labels }
    }

    /// Advances the row by one frame: pins the group to the top edge, spaces
    /// the labels, hit-tests the pointer, and maintains the hover/outline
    /// flags.
    ///
    /// Returns the cursor the host should show and, on a click over a label,
    /// the scroll command for the host surface.
    pub fn update(
        &mut self,
        store: &mut NodeStore,
        texts: &mut TextTable,
        viewport: &Viewport,
        camera: &Camera,
        profile: &LayoutProfile,
        inputs: &FrameInputs,
        timeline: &mut ScrollTimeline,
        elapsed: f64,
    ) -> (CursorStyle, Option<ScrollCommand>) {
        let extent = viewport.world_extent(camera, NAV_PLANE);
        let row_y = extent.height / 2.0 - NAV_TOP_MARGIN;
        store.set_placement(
            self.group,
            Placement::from_translation(0.0, row_y, NAV_DEPTH),
        );

        let pointer = inputs
            .pointer_ndc
            .map(|ndc| viewport.ndc_to_world(camera, NAV_PLANE, ndc));

        let count = self.labels.len();
        let mut cursor = CursorStyle::Default;
        let mut command = None;

        for (i, label) in self.labels.iter_mut().enumerate() {
            let x = (i as f64 - (count as f64 - 1.0) / 2.0) * profile.nav_spacing;
            store.set_placement(label.node, Placement::from_translation(x, 0.0, 0.0));

            label.hovered = pointer.is_some_and(|p| {
                hit_test(p, Point::new(x, row_y), profile.nav_font_size, label.glyph_count)
            });
            if label.hovered {
                cursor = CursorStyle::Pointer;
            }

            // A click restarts the label's outline window; rapid re-clicks
            // restart rather than stack.
            if inputs.clicked && label.hovered {
                label.outline_until = Some(elapsed + OUTLINE_SECONDS);
                if command.is_none() {
                    command = Some(timeline.scroll_to(label.target_fraction));
                }
            }

            // Expire the window.
            if label.outline_until.is_some_and(|until| elapsed >= until) {
                label.outline_until = None;
            }

            let run = texts.get_mut(label.text);
            run.font_size =
                profile.nav_font_size * if label.hovered { HOVER_SCALE } else { 1.0 };
            run.outline = label.outline_until.map(|_| TextOutline {
                width: 0.015,
                color: ACCENT,
                opacity: 0.8,
                blur: 0.3,
            });
        }

        (cursor, command)
    }

    /// Whether the label at `index` currently shows its clicked outline.
    #[must_use]
    pub fn outline_visible(&self, index: usize) -> bool {
        self.labels[index].outline_until.is_some()
    }

    /// Whether the label at `index` is hovered.
    #[must_use]
    pub fn hovered(&self, index: usize) -> bool {
        self.labels[index].hovered
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the row has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// World-space center of the label at `index` for the current frame
    /// (after [`update`](Self::update) has placed the row).
    #[must_use]
    pub fn label_center(&self, store: &NodeStore, index: usize) -> Point {
        let world = store.world_placement(self.labels[index].node);
        Point::new(world.position.x, world.position.y)
    }
}

/// Approximate hit test of a world-space pointer against a label's text box.
fn hit_test(pointer: Point, center: Point, font_size: f64, glyph_count: usize) -> bool {
    let half_w = font_size * GLYPH_WIDTH_FACTOR * glyph_count as f64 / 2.0;
    let half_h = font_size * HIT_HEIGHT_FACTOR;
    (pointer.x - center.x).abs() <= half_w && (pointer.y - center.y).abs() <= half_h
}
