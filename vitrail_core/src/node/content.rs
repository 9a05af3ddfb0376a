// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed node content.

use super::id::{GeometryId, ImageId, TargetId, TextId};

/// Kind of light carried by a [`NodeContent::Light`] node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightKind {
    /// Non-directional fill light.
    Ambient,
    /// Point light at the node's world position.
    Point,
}

/// What a node contributes to the frame.
///
/// `Group` nodes only provide placement and opacity inheritance; every other
/// variant is a leaf the render plan turns into a draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeContent {
    /// A grouping node with no visual contribution of its own.
    Group,
    /// A text run; styling lives in the composition layer's text table.
    Text(TextId),
    /// An image plane with a material zoom factor driven by scroll.
    Image {
        /// The image asset.
        id: ImageId,
        /// Texture zoom factor; 1.0 shows the full image.
        zoom: f32,
    },
    /// The full-viewport quad that replays an offscreen target behind the
    /// glass shape.
    Backdrop(TargetId),
    /// The refractive glass shape itself.
    Glass(GeometryId),
    /// A light source.
    Light {
        /// Light kind.
        kind: LightKind,
        /// Light intensity.
        intensity: f32,
    },
}

impl NodeContent {
    /// Whether this content produces a draw (anything but a pure group).
    #[must_use]
    pub const fn is_drawable(&self) -> bool {
        !matches!(self, Self::Group)
    }
}
