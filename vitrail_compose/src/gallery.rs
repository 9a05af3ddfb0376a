// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scrolling image gallery.
//!
//! Images are placed from the desktop-calibrated manifest, then adjusted by
//! the device layout profile: positions shrink toward the center and scales
//! reduce on narrower viewports. Each frame the scroll timeline drives a
//! per-image texture zoom, saturating at the edges of its scroll band.

use alloc::string::String;
use alloc::vec::Vec;

use vitrail_core::geometry::Vec3;
use vitrail_core::node::{ImageId, NodeContent, NodeId, NodeStore};
use vitrail_core::placement::Placement;
use vitrail_core::scroll::ScrollTimeline;
use vitrail_core::viewport::LayoutProfile;

use crate::manifest::{GalleryImage, ImageScale};

/// Scroll band driving the first two images' zoom.
const EARLY_BAND: (f64, f64, f64) = (0.0, 1.0 / 3.0, 3.0);

/// Scroll band driving the remaining images' zoom.
const LATE_BAND: (f64, f64, f64) = (1.15 / 3.0, 1.0 / 3.0, 2.0);

/// How many images use the early zoom band.
const EARLY_COUNT: usize = 2;

/// Table of image sources, indexed by [`ImageId`].
#[derive(Clone, Debug, Default)]
pub struct ImageTable {
    sources: Vec<String>,
}

impl ImageTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source URL and returns its id.
    pub fn insert(&mut self, url: String) -> ImageId {
        let id = ImageId(u32::try_from(self.sources.len()).expect("image count fits in u32"));
        self.sources.push(url);
        id
    }

    /// Returns the URL for an id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this table.
    #[must_use]
    pub fn url(&self, id: ImageId) -> &str {
        self.sources.get(id.0 as usize).expect("unknown ImageId")
    }
}

struct GalleryItem {
    node: NodeId,
    image: ImageId,
    spec: GalleryImage,
}

/// The image gallery: owns its nodes and drives their placement and zoom.
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl core::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gallery")
            .field("items", &self.items.len())
            .finish()
    }
}

/// Zoom factor for the image at `index` given the current scroll progress.
#[must_use]
pub fn zoom_for(index: usize, timeline: &ScrollTimeline) -> f32 {
    let (start, length, divisor) = if index < EARLY_COUNT {
        EARLY_BAND
    } else {
        LATE_BAND
    };
    #[expect(
        clippy::cast_possible_truncation,
        reason = "zoom is a small positive factor; f32 content field"
    )]
    let zoom = (1.0 + timeline.range(start, length) / divisor) as f32;
    zoom
}

impl Gallery {
    /// Builds gallery nodes under `parent` and applies the initial profile.
    pub fn build(
        store: &mut NodeStore,
        images: &mut ImageTable,
        parent: NodeId,
        specs: &[GalleryImage],
        profile: &LayoutProfile,
    ) -> Self {
        let mut items = Vec::with_capacity(specs.len());
        for spec in specs {
            let node = store.create_node();
            let image = images.insert(spec.url.clone());
            store.set_content(node, NodeContent::Image { id: image, zoom: 1.0 });
            store.add_child(parent, node);
            items.push(GalleryItem {
                node,
                image,
                spec: spec.clone(),
            });
        }
        let gallery = Self { items };
        gallery.apply_profile(store, profile);
        gallery
    }

    /// Re-derives every item's placement for a device profile.
    ///
    /// Placements are re-derived from the immutable manifest, never
    /// incrementally adjusted, so repeated reclassification cannot drift.
    pub fn apply_profile(&self, store: &mut NodeStore, profile: &LayoutProfile) {
        for item in &self.items {
            let [fx, fy] = profile.gallery_position_factor;
            let base = item.spec.position;
            let position = Vec3::new(
                base.x * profile.anchor_x_factor * fx,
                base.y * fy,
                base.z,
            );
            let scale = match item.spec.scale {
                ImageScale::Uniform(s) => {
                    let s = s * profile.gallery_scale_factor;
                    Vec3::new(s, s, 1.0)
                }
                ImageScale::Plane(w, h) => Vec3::new(
                    w * profile.gallery_scale_factor,
                    h * profile.gallery_scale_factor,
                    1.0,
                ),
            };
            store.set_placement(item.node, Placement::new(position, scale));
        }
    }

    /// Updates each image's texture zoom from the scroll timeline.
    pub fn update_zoom(&self, store: &mut NodeStore, timeline: &ScrollTimeline) {
        for (index, item) in self.items.iter().enumerate() {
            store.set_content(
                item.node,
                NodeContent::Image {
                    id: item.image,
                    zoom: zoom_for(index, timeline),
                },
            );
        }
    }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the gallery is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Node handle of the image at `index` (for tests and diagnostics).
    #[must_use]
    pub fn node(&self, index: usize) -> NodeId {
        self.items[index].node
    }
}
