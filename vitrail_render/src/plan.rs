// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pass plan: the ordered sequence of render passes for one frame.

use alloc::vec::Vec;

use vitrail_core::material::TransmissionMaterial;
use vitrail_core::node::{GeometryId, NodeContent, TargetId};
use vitrail_core::placement::Placement;

/// A single draw command in the pass plan.
///
/// Items are produced in back-to-front order, matching the scene tree's
/// traversal order. Each item is self-contained: executors do not need to
/// consult the store.
#[derive(Clone, Copy, Debug)]
pub struct RenderItem {
    /// Raw slot index of the originating node (diagnostics only).
    pub node: u32,
    /// What to draw.
    pub content: NodeContent,
    /// World placement.
    pub placement: Placement,
    /// Effective opacity (0.0–1.0, accumulated from ancestors).
    pub opacity: f32,
}

/// One render pass within a frame.
///
/// Passes appear in execution order. Within a frame, a pass that samples an
/// offscreen target always comes after the pass that wrote it (see
/// [`FramePasses::write_precedes_reads`]).
#[derive(Clone, Debug)]
pub enum RenderPass {
    /// Renders the nested sub-scene into an offscreen color target.
    Offscreen {
        /// The target being written.
        target: TargetId,
        /// Sub-scene draws, back-to-front.
        items: Vec<RenderItem>,
    },
    /// Renders a full-viewport quad textured with an offscreen target, so the
    /// sub-scene appears directly behind the glass shape.
    Backdrop {
        /// The target being sampled.
        target: TargetId,
        /// The quad draw; its placement scale spans the viewport.
        item: RenderItem,
    },
    /// Renders the glass shape with a transmission material sampling the same
    /// offscreen target as its transmitted background.
    Shape {
        /// The target being sampled.
        target: TargetId,
        /// The shape's geometry asset.
        geometry: GeometryId,
        /// Transmission shader parameters.
        material: TransmissionMaterial,
        /// Fixed rotation of the geometry about the x axis, radians.
        rotation_x: f64,
        /// The shape draw.
        item: RenderItem,
    },
    /// Renders screen-space overlay content (the navigation row) above
    /// everything else.
    Overlay {
        /// Overlay draws, back-to-front.
        items: Vec<RenderItem>,
    },
}

impl RenderPass {
    /// The target this pass writes, if any.
    #[must_use]
    pub fn writes(&self) -> Option<TargetId> {
        match self {
            Self::Offscreen { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The target this pass samples, if any.
    #[must_use]
    pub fn reads(&self) -> Option<TargetId> {
        match self {
            Self::Backdrop { target, .. } | Self::Shape { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Number of draw items in this pass.
    #[must_use]
    pub fn item_count(&self) -> usize {
        match self {
            Self::Offscreen { items, .. } | Self::Overlay { items } => items.len(),
            Self::Backdrop { .. } | Self::Shape { .. } => 1,
        }
    }
}

/// The ordered pass list for a single frame.
///
/// Executors run the passes front to back; the plan is rebuilt (or reused
/// via [`clear`](Self::clear)) every frame.
#[derive(Clone, Debug, Default)]
pub struct FramePasses {
    /// Frame counter, carried from the originating tick.
    pub frame_index: u64,
    /// Passes in execution order.
    pub passes: Vec<RenderPass>,
}

impl FramePasses {
    /// Creates an empty pass list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the list for reuse by the next frame.
    pub fn clear(&mut self, frame_index: u64) {
        self.frame_index = frame_index;
        self.passes.clear();
    }

    /// Total number of draw items across all passes.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.passes.iter().map(RenderPass::item_count).sum()
    }

    /// Whether every pass sampling `target` comes after a pass writing it.
    ///
    /// Returns `false` if `target` is sampled before (or without) a write in
    /// this frame — the stale-read case the effect accepts only across
    /// frames, never within one.
    #[must_use]
    pub fn write_precedes_reads(&self, target: TargetId) -> bool {
        let mut written = false;
        for pass in &self.passes {
            if pass.reads() == Some(target) && !written {
                return false;
            }
            if pass.writes() == Some(target) {
                written = true;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use vitrail_core::node::ImageId;

    use super::*;

    fn item() -> RenderItem {
        RenderItem {
            node: 0,
            content: NodeContent::Image {
                id: ImageId(0),
                zoom: 1.0,
            },
            placement: Placement::IDENTITY,
            opacity: 1.0,
        }
    }

    #[test]
    fn write_then_read_is_ordered() {
        let mut passes = FramePasses::new();
        let target = TargetId(0);
        passes.passes.push(RenderPass::Offscreen {
            target,
            items: vec![item()],
        });
        passes.passes.push(RenderPass::Backdrop {
            target,
            item: item(),
        });
        assert!(passes.write_precedes_reads(target));
    }

    #[test]
    fn read_before_write_is_rejected() {
        let mut passes = FramePasses::new();
        let target = TargetId(0);
        passes.passes.push(RenderPass::Backdrop {
            target,
            item: item(),
        });
        passes.passes.push(RenderPass::Offscreen {
            target,
            items: vec![],
        });
        assert!(!passes.write_precedes_reads(target));
    }

    #[test]
    fn read_without_write_is_rejected() {
        let mut passes = FramePasses::new();
        let target = TargetId(7);
        passes.passes.push(RenderPass::Backdrop {
            target,
            item: item(),
        });
        assert!(!passes.write_precedes_reads(target));
    }

    #[test]
    fn unrelated_target_is_unconstrained() {
        let passes = FramePasses::new();
        assert!(passes.write_precedes_reads(TargetId(9)));
    }

    #[test]
    fn item_count_sums_passes() {
        let mut passes = FramePasses::new();
        passes.passes.push(RenderPass::Offscreen {
            target: TargetId(0),
            items: vec![item(), item()],
        });
        passes.passes.push(RenderPass::Backdrop {
            target: TargetId(0),
            item: item(),
        });
        assert_eq!(passes.item_count(), 3);
    }

    #[test]
    fn clear_resets_for_reuse() {
        let mut passes = FramePasses::new();
        passes.passes.push(RenderPass::Overlay { items: vec![] });
        passes.clear(42);
        assert_eq!(passes.frame_index, 42);
        assert!(passes.passes.is_empty());
    }
}
