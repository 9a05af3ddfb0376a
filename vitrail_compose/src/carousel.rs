// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rotating skill-tile ring.
//!
//! Tiles are evenly spaced around a circle in the x/z plane; the ring angle
//! advances linearly with wall-clock time, so rotation speed is independent
//! of frame rate.

use alloc::vec::Vec;

use vitrail_core::geometry::Vec3;
use vitrail_core::node::{NodeContent, NodeId, NodeStore};
use vitrail_core::placement::Placement;

use crate::manifest::CarouselSpec;
use crate::text::{TextRun, TextTable};

/// Font size of a carousel tile, world units.
const TILE_FONT_SIZE: f64 = 0.18;

/// The carousel: owns its tile nodes and ring angle.
pub struct Carousel {
    tiles: Vec<NodeId>,
    radius: f64,
    speed: f64,
    angle: f64,
}

impl core::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Carousel")
            .field("tiles", &self.tiles.len())
            .field("angle", &self.angle)
            .finish()
    }
}

impl Carousel {
    /// Builds the ring under `parent` at the manifest position.
    pub fn build(
        store: &mut NodeStore,
        texts: &mut TextTable,
        parent: NodeId,
        spec: &CarouselSpec,
    ) -> Self {
        let group = store.create_node();
        store.set_placement(
            group,
            Placement::from_translation(spec.position.x, spec.position.y, spec.position.z),
        );
        store.add_child(parent, group);

        let mut tiles = Vec::with_capacity(spec.tiles.len());
        for label in &spec.tiles {
            let text = texts.insert(TextRun::plain(label.clone(), TILE_FONT_SIZE));
            let node = store.create_node();
            store.set_content(node, NodeContent::Text(text));
            store.add_child(group, node);
            tiles.push(node);
        }

        let carousel = Self {
            tiles,
            radius: spec.radius,
            speed: spec.speed,
            angle: 0.0,
        };
        carousel.place_tiles(store);
        carousel
    }

    /// Advances the ring by one frame.
    pub fn update(&mut self, store: &mut NodeStore, dt: f64) {
        self.angle += self.speed * dt;
        self.place_tiles(store);
    }

    /// Current ring angle, radians.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the ring has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn place_tiles(&self, store: &mut NodeStore) {
        let count = self.tiles.len();
        for (i, &node) in self.tiles.iter().enumerate() {
            let phase = self.angle + i as f64 * core::f64::consts::TAU / count as f64;
            let position = Vec3::new(
                self.radius * libm::cos(phase),
                0.0,
                self.radius * libm::sin(phase),
            );
            store.set_placement(node, Placement::new(position, Vec3::ONE));
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn spec() -> CarouselSpec {
        CarouselSpec {
            position: Vec3::new(0.0, -11.0, 5.0),
            radius: 2.0,
            speed: 1.0,
            tiles: vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()],
        }
    }

    fn build() -> (NodeStore, TextTable, Carousel) {
        let mut store = NodeStore::new();
        let mut texts = TextTable::new();
        let root = store.create_node();
        let carousel = Carousel::build(&mut store, &mut texts, root, &spec());
        (store, texts, carousel)
    }

    #[test]
    fn angle_advances_linearly_with_dt() {
        let (mut store, _, mut carousel) = build();
        assert_eq!(carousel.angle(), 0.0);
        for _ in 0..60 {
            carousel.update(&mut store, 1.0 / 60.0);
        }
        assert!((carousel.angle() - 1.0).abs() < 1e-9, "speed 1 rad/s");
    }

    #[test]
    fn tiles_stay_on_the_ring() {
        let (mut store, _, mut carousel) = build();
        carousel.update(&mut store, 0.25);
        let _ = store.evaluate();

        for root in store.roots() {
            for group in store.children(root) {
                for tile in store.children(group) {
                    let p = store.world_placement(tile).position;
                    // Relative to the group center at (0, -11, 5).
                    let dx = p.x;
                    let dz = p.z - 5.0;
                    let r = libm::sqrt(dx * dx + dz * dz);
                    assert!((r - 2.0).abs() < 1e-9, "tile radius must be constant");
                    assert!((p.y - (-11.0)).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn tiles_are_evenly_phased() {
        let (mut store, _, carousel) = build();
        let _ = store.evaluate();
        assert_eq!(carousel.len(), 4);

        // With four tiles at angle 0: phases 0, 90, 180, 270 degrees.
        let roots = store.roots();
        let group = store.children(roots[0]).next().expect("carousel group");
        let positions: Vec<_> = store
            .children(group)
            .map(|tile| store.world_placement(tile).position)
            .collect();
        assert!((positions[0].x - 2.0).abs() < 1e-9);
        assert!((positions[1].z - (5.0 + 2.0)).abs() < 1e-9);
        assert!((positions[2].x + 2.0).abs() < 1e-9);
        assert!((positions[3].z - (5.0 - 2.0)).abs() < 1e-9);
    }
}
