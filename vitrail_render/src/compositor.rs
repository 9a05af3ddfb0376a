// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render-to-texture glass compositor.
//!
//! Each frame, [`GlassCompositor::build_into`] turns the evaluated scene
//! tree into an ordered pass list:
//!
//! 1. **Offscreen** — the nested sub-scene is rendered into the glass
//!    object's color target using the main camera.
//! 2. **Backdrop** — a full-viewport quad samples the target, so the
//!    sub-scene appears to sit directly behind the glass shape.
//! 3. **Shape** — the glass geometry with its transmission material samples
//!    the same target as its transmitted background. Skipped (without error,
//!    without touching any transform) while the geometry asset is pending;
//!    the host's loading mechanism is the sole source of readiness.
//! 4. **Overlay** — screen-pinned content (the navigation row) on top.
//!
//! The pass order is the write-before-read invariant: the target is written
//! in pass 1 and only sampled in passes 2 and 3 of the same frame.
//!
//! [`NodeStore::evaluate`](vitrail_core::node::NodeStore::evaluate) must run
//! before building, since items copy computed world placements.

use vitrail_core::material::TransmissionMaterial;
use vitrail_core::node::{GeometryId, NodeId, NodeStore, TargetId};
use vitrail_core::trace::{PlanEvent, ShapeSkippedEvent, Tracer};

use alloc::vec::Vec;

use crate::plan::{FramePasses, RenderItem, RenderPass};
use crate::resource::GeometryRegistry;

/// The scene nodes a compositor reads from.
#[derive(Clone, Copy, Debug)]
pub struct CompositorNodes {
    /// Root of the sub-scene rendered into the offscreen target.
    pub offscreen_root: NodeId,
    /// The full-viewport quad node.
    pub backdrop: NodeId,
    /// The glass shape node (its placement is driven by the follow rig).
    pub shape: NodeId,
    /// Root of the screen-pinned overlay, if the mode has one.
    pub overlay_root: Option<NodeId>,
}

/// Builds the ordered pass list for one glass object.
///
/// Owns nothing but ids and parameters; the single offscreen target is
/// written once and read at most twice per frame, with no cross-object
/// sharing.
#[derive(Clone, Debug)]
pub struct GlassCompositor {
    target: TargetId,
    geometry: GeometryId,
    material: TransmissionMaterial,
    rotation_x: f64,
    nodes: CompositorNodes,
}

impl GlassCompositor {
    /// Creates a compositor for one glass object.
    #[must_use]
    pub fn new(
        target: TargetId,
        geometry: GeometryId,
        material: TransmissionMaterial,
        rotation_x: f64,
        nodes: CompositorNodes,
    ) -> Self {
        Self {
            target,
            geometry,
            material,
            rotation_x,
            nodes,
        }
    }

    /// The offscreen target this compositor writes and samples.
    #[must_use]
    pub fn target(&self) -> TargetId {
        self.target
    }

    /// The glass geometry asset.
    #[must_use]
    pub fn geometry(&self) -> GeometryId {
        self.geometry
    }

    /// The transmission material parameters.
    #[must_use]
    pub fn material(&self) -> &TransmissionMaterial {
        &self.material
    }

    /// Builds this frame's passes into a reusable buffer.
    pub fn build_into(
        &self,
        store: &NodeStore,
        geometries: &GeometryRegistry,
        frame_index: u64,
        out: &mut FramePasses,
        tracer: &mut Tracer<'_>,
    ) {
        out.clear(frame_index);

        // 1. Offscreen write pass.
        let mut items = Vec::new();
        collect_items(store, self.nodes.offscreen_root, &mut items);
        out.passes.push(RenderPass::Offscreen {
            target: self.target,
            items,
        });

        // 2. Backdrop read pass.
        if !store.effective_hidden(self.nodes.backdrop) {
            out.passes.push(RenderPass::Backdrop {
                target: self.target,
                item: item_for(store, self.nodes.backdrop),
            });
        }

        // 3. Shape read pass — only once the geometry asset is measured.
        if geometries.is_ready(self.geometry) {
            if !store.effective_hidden(self.nodes.shape) {
                out.passes.push(RenderPass::Shape {
                    target: self.target,
                    geometry: self.geometry,
                    material: self.material,
                    rotation_x: self.rotation_x,
                    item: item_for(store, self.nodes.shape),
                });
            }
        } else {
            tracer.shape_skipped(&ShapeSkippedEvent {
                frame_index,
                geometry: self.geometry,
            });
        }

        // 4. Overlay pass.
        if let Some(root) = self.nodes.overlay_root {
            let mut items = Vec::new();
            collect_items(store, root, &mut items);
            out.passes.push(RenderPass::Overlay { items });
        }

        tracer.plan(&PlanEvent {
            frame_index,
            passes: out.passes.len(),
            items: out.item_count(),
        });
    }
}

/// Collects drawable items from the subtree rooted at `root`, depth-first,
/// pruning effectively hidden nodes.
fn collect_items(store: &NodeStore, root: NodeId, out: &mut Vec<RenderItem>) {
    if store.effective_hidden(root) {
        return;
    }
    let content = store.content(root);
    if content.is_drawable() {
        out.push(RenderItem {
            node: root.index(),
            content,
            placement: store.world_placement(root),
            opacity: store.effective_opacity(root),
        });
    }
    for child in store.children(root) {
        collect_items(store, child, out);
    }
}

/// Builds the item for a single node.
fn item_for(store: &NodeStore, id: NodeId) -> RenderItem {
    RenderItem {
        node: id.index(),
        content: store.content(id),
        placement: store.world_placement(id),
        opacity: store.effective_opacity(id),
    }
}

#[cfg(test)]
mod tests {
    use vitrail_core::geometry::{BoundingBox3, Vec3};
    use vitrail_core::node::{ImageId, NodeContent, NodeFlags, TextId};
    use vitrail_core::placement::Placement;

    use super::*;

    struct Fixture {
        store: NodeStore,
        geometries: GeometryRegistry,
        compositor: GlassCompositor,
        shape: NodeId,
    }

    fn fixture() -> Fixture {
        let mut store = NodeStore::new();
        let mut geometries = GeometryRegistry::new();
        let geometry = geometries.register();

        let offscreen_root = store.create_node();
        let text = store.create_node();
        store.set_content(text, NodeContent::Text(TextId(0)));
        store.set_placement(text, Placement::from_translation(0.0, 0.0, 12.0));
        store.add_child(offscreen_root, text);
        let image = store.create_node();
        store.set_content(
            image,
            NodeContent::Image {
                id: ImageId(0),
                zoom: 1.0,
            },
        );
        store.add_child(offscreen_root, image);

        let backdrop = store.create_node();
        store.set_content(backdrop, NodeContent::Backdrop(TargetId(0)));
        let shape = store.create_node();
        store.set_content(shape, NodeContent::Glass(geometry));
        store.set_placement(shape, Placement::from_translation(0.0, 0.0, 15.0));

        let overlay_root = store.create_node();
        let label = store.create_node();
        store.set_content(label, NodeContent::Text(TextId(1)));
        store.add_child(overlay_root, label);

        let _ = store.evaluate();

        let compositor = GlassCompositor::new(
            TargetId(0),
            geometry,
            TransmissionMaterial::default(),
            core::f64::consts::FRAC_PI_2,
            CompositorNodes {
                offscreen_root,
                backdrop,
                shape,
                overlay_root: Some(overlay_root),
            },
        );

        Fixture {
            store,
            geometries,
            compositor,
            shape,
        }
    }

    fn build(f: &Fixture) -> FramePasses {
        let mut out = FramePasses::new();
        f.compositor.build_into(
            &f.store,
            &f.geometries,
            7,
            &mut out,
            &mut Tracer::none(),
        );
        out
    }

    #[test]
    fn pending_geometry_skips_shape_pass_only() {
        let f = fixture();
        let passes = build(&f);

        assert!(
            !passes
                .passes
                .iter()
                .any(|p| matches!(p, RenderPass::Shape { .. })),
            "shape pass must be skipped while geometry is pending"
        );
        assert!(
            passes
                .passes
                .iter()
                .any(|p| matches!(p, RenderPass::Backdrop { .. })),
            "backdrop still renders from the target"
        );
        assert!(
            passes
                .passes
                .iter()
                .any(|p| matches!(p, RenderPass::Offscreen { .. })),
            "offscreen write still happens"
        );
    }

    #[test]
    fn skip_does_not_mutate_shape_placement() {
        let f = fixture();
        let before = f.store.world_placement(f.shape);
        let _ = build(&f);
        assert_eq!(f.store.world_placement(f.shape), before);
    }

    #[test]
    fn ready_geometry_emits_shape_pass() {
        let mut f = fixture();
        f.geometries.set_ready(
            f.compositor.geometry(),
            BoundingBox3::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.2)),
        );
        let passes = build(&f);
        assert!(
            passes
                .passes
                .iter()
                .any(|p| matches!(p, RenderPass::Shape { .. }))
        );
    }

    #[test]
    fn write_always_precedes_reads() {
        let mut f = fixture();
        let target = f.compositor.target();
        assert!(build(&f).write_precedes_reads(target));

        f.geometries.set_ready(
            f.compositor.geometry(),
            BoundingBox3::new(Vec3::ZERO, Vec3::ONE),
        );
        assert!(build(&f).write_precedes_reads(target));
    }

    #[test]
    fn passes_are_in_compositing_order() {
        let mut f = fixture();
        f.geometries.set_ready(
            f.compositor.geometry(),
            BoundingBox3::new(Vec3::ZERO, Vec3::ONE),
        );
        let passes = build(&f);
        let kinds: Vec<_> = passes
            .passes
            .iter()
            .map(|p| match p {
                RenderPass::Offscreen { .. } => "offscreen",
                RenderPass::Backdrop { .. } => "backdrop",
                RenderPass::Shape { .. } => "shape",
                RenderPass::Overlay { .. } => "overlay",
            })
            .collect();
        assert_eq!(kinds, ["offscreen", "backdrop", "shape", "overlay"]);
    }

    #[test]
    fn offscreen_items_are_the_subscene() {
        let f = fixture();
        let passes = build(&f);
        let RenderPass::Offscreen { items, .. } = &passes.passes[0] else {
            panic!("first pass must be the offscreen write");
        };
        assert_eq!(items.len(), 2, "text and image leaves");
        assert!(
            items
                .iter()
                .any(|i| matches!(i.content, NodeContent::Text(_)))
        );
        assert!(
            items
                .iter()
                .any(|i| matches!(i.content, NodeContent::Image { .. }))
        );
    }

    #[test]
    fn hidden_subscene_nodes_are_pruned() {
        let mut f = fixture();
        // Hide the whole sub-scene.
        let roots = f.store.roots();
        f.store.set_flags(roots[0], NodeFlags { hidden: true });
        let _ = f.store.evaluate();

        let passes = build(&f);
        let RenderPass::Offscreen { items, .. } = &passes.passes[0] else {
            panic!("first pass must be the offscreen write");
        };
        assert!(items.is_empty(), "hidden subtree contributes nothing");
    }

    #[test]
    fn frame_index_is_carried() {
        let f = fixture();
        assert_eq!(build(&f).frame_index, 7);
    }
}
