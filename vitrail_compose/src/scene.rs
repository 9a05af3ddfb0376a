// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene composition root.
//!
//! [`SceneRoot`] assembles a mode-specific glass shape, the hand-placed
//! section text blocks, the image gallery, the skill carousel, lighting, and
//! (bar mode) the navigation row, then advances all per-frame systems on
//! each tick:
//!
//! 1. Reclassify the device from the viewport width; on a class change,
//!    re-derive gallery placements from the profile table.
//! 2. Damp the scroll timeline toward the host's reported fraction and
//!    translate the scrolled content group.
//! 3. Damp the follow rig toward its pointer/anchor/edge target and apply
//!    the fit-to-viewport scale clamp.
//! 4. Update gallery zoom, carousel rotation, and navigation flags.
//! 5. Evaluate the scene tree and rebuild the frame's pass list.
//!
//! The returned [`SceneOutputs`] carry the module's only outward effects:
//! a cursor style and, after a navigation click, a scroll command.

use vitrail_core::follow::{FollowConfig, FollowRig, fit_scale};
use vitrail_core::geometry::{BoundingBox3, Vec3};
use vitrail_core::node::{FrameChanges, NodeContent, NodeId, NodeStore, TargetId};
use vitrail_core::placement::Placement;
use vitrail_core::scroll::{ScrollCommand, ScrollTimeline};
use vitrail_core::timing::{CursorStyle, FrameInputs, FrameTick};
use vitrail_core::trace::{EvaluateEvent, FrameTickEvent, Tracer};
use vitrail_core::viewport::{Camera, LayoutProfile, Viewport, profile_for};
use vitrail_render::{CompositorNodes, FramePasses, GeometryRegistry, GlassCompositor};

use crate::carousel::Carousel;
use crate::gallery::{Gallery, ImageTable};
use crate::manifest::SceneManifest;
use crate::mode::{Mode, ModeOverrides};
use crate::nav::NavBar;
use crate::text::{TextRun, TextTable};

use alloc::string::String;
use alloc::vec::Vec;

/// Depth plane the glass shape rides on.
pub const GLASS_PLANE: f64 = 15.0;

/// Fixed orientation of the glass geometry, radians about the x axis.
pub const SHAPE_ROTATION_X: f64 = core::f64::consts::FRAC_PI_2;

/// Per-frame outputs of [`SceneRoot::advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneOutputs {
    /// Cursor the host should show this frame.
    pub cursor: CursorStyle,
    /// Scroll command for the host surface, when navigation was activated.
    pub scroll: Option<ScrollCommand>,
}

/// The assembled scene and all of its per-frame systems.
pub struct SceneRoot {
    store: NodeStore,
    changes: FrameChanges,
    passes: FramePasses,
    texts: TextTable,
    images: ImageTable,
    geometries: GeometryRegistry,
    compositor: GlassCompositor,
    timeline: ScrollTimeline,
    rig: FollowRig,
    follow: FollowConfig,
    overrides: ModeOverrides,
    camera: Camera,
    gallery: Gallery,
    carousel: Carousel,
    nav: Option<NavBar>,
    scroll_group: NodeId,
    backdrop: NodeId,
    shape: NodeId,
    profile: &'static LayoutProfile,
    elapsed: f64,
}

impl core::fmt::Debug for SceneRoot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SceneRoot")
            .field("profile", &self.profile.class)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

impl SceneRoot {
    /// Composes the scene for a mode from a manifest.
    #[must_use]
    pub fn new(mode: Mode, overrides: ModeOverrides, manifest: &SceneManifest) -> Self {
        let mut store = NodeStore::new();
        let mut texts = TextTable::new();
        let mut images = ImageTable::new();
        let mut geometries = GeometryRegistry::new();

        let geometry = geometries.register();
        let target = TargetId(0);
        let profile = profile_for(f64::MAX);

        // Sub-scene rendered into the offscreen target. The scroll group
        // translates all content vertically as the timeline advances.
        let offscreen_root = store.create_node();
        let scroll_group = store.create_node();
        store.add_child(offscreen_root, scroll_group);

        for light in &manifest.lights {
            let node = store.create_node();
            store.set_content(
                node,
                NodeContent::Light {
                    kind: light.kind,
                    intensity: light.intensity,
                },
            );
            store.set_placement(
                node,
                Placement::from_translation(light.position.x, light.position.y, light.position.z),
            );
            store.add_child(scroll_group, node);
        }

        for section in &manifest.sections {
            let text = texts.insert(TextRun::plain(
                section.lines.join("\n"),
                section.size.font_size(),
            ));
            let node = store.create_node();
            store.set_content(node, NodeContent::Text(text));
            store.set_placement(
                node,
                Placement::from_translation(
                    section.position.x,
                    section.position.y,
                    section.position.z,
                ),
            );
            store.add_child(scroll_group, node);
        }

        let carousel = Carousel::build(&mut store, &mut texts, scroll_group, &manifest.carousel);
        let gallery = Gallery::build(
            &mut store,
            &mut images,
            scroll_group,
            &manifest.images,
            profile,
        );

        // Main-scene nodes: the backdrop quad and the glass shape.
        let backdrop = store.create_node();
        store.set_content(backdrop, NodeContent::Backdrop(target));
        let shape = store.create_node();
        store.set_content(shape, NodeContent::Glass(geometry));
        store.set_placement(shape, Placement::from_translation(0.0, 0.0, GLASS_PLANE));

        // Screen-pinned overlay (bar mode only).
        let nav = if mode.has_nav() {
            let overlay_root = store.create_node();
            let entries: Vec<(String, f64)> = manifest
                .nav
                .iter()
                .map(|entry| (entry.label.clone(), entry.target_fraction))
                .collect();
            Some((
                overlay_root,
                NavBar::build(&mut store, &mut texts, overlay_root, &entries, profile),
            ))
        } else {
            None
        };

        let (overlay_root, nav) = match nav {
            Some((root, bar)) => (Some(root), Some(bar)),
            None => (None, None),
        };

        let material = overrides.material.unwrap_or_else(|| mode.material());
        let compositor = GlassCompositor::new(
            target,
            geometry,
            material,
            SHAPE_ROTATION_X,
            CompositorNodes {
                offscreen_root,
                backdrop,
                shape,
                overlay_root,
            },
        );

        Self {
            store,
            changes: FrameChanges::default(),
            passes: FramePasses::new(),
            texts,
            images,
            geometries,
            compositor,
            timeline: ScrollTimeline::default(),
            rig: FollowRig::new(),
            follow: mode.follow(GLASS_PLANE),
            overrides,
            camera: Camera::default(),
            gallery,
            carousel,
            nav,
            scroll_group,
            backdrop,
            shape,
            profile,
            elapsed: 0.0,
        }
    }

    /// Records that the host finished loading the shape geometry.
    pub fn geometry_ready(&mut self, bounds: BoundingBox3) {
        self.geometries.set_ready(self.compositor.geometry(), bounds);
    }

    /// Advances the scene by one frame without tracing.
    pub fn advance(&mut self, tick: &FrameTick, inputs: &FrameInputs, dt: f64) -> SceneOutputs {
        self.advance_traced(tick, inputs, dt, &mut Tracer::none())
    }

    /// Advances the scene by one frame, emitting trace events.
    pub fn advance_traced(
        &mut self,
        tick: &FrameTick,
        inputs: &FrameInputs,
        dt: f64,
        tracer: &mut Tracer<'_>,
    ) -> SceneOutputs {
        tracer.frame_tick(&FrameTickEvent::from(tick));
        self.elapsed += dt;

        // Reclassify the device; layout constants are re-derived only when
        // the class actually changed.
        let profile = profile_for(inputs.viewport_px.width);
        if profile.class != self.profile.class {
            self.profile = profile;
            self.gallery.apply_profile(&mut self.store, profile);
        }

        let viewport = Viewport::new(inputs.viewport_px);

        // Scroll: chase the host fraction, then translate the content group.
        self.timeline.set_target(inputs.scroll_fraction);
        self.timeline.update(dt);
        let content_extent = viewport.world_extent(&self.camera, 0.0);
        let scroll_y =
            self.timeline.progress() * content_extent.height * (self.timeline.pages() - 1.0);
        self.store.set_placement(
            self.scroll_group,
            Placement::from_translation(0.0, scroll_y, 0.0),
        );

        // Follow: damp the shape toward its target and fit its scale.
        let glass_extent = viewport.world_extent(&self.camera, GLASS_PLANE);
        let pointer_world = inputs
            .pointer_ndc
            .map(|ndc| viewport.ndc_to_world(&self.camera, GLASS_PLANE, ndc));
        self.rig.update(&self.follow, pointer_world, glass_extent, dt);
        let scale = self.overrides.scale.unwrap_or_else(|| {
            let intrinsic = self
                .geometries
                .width(self.compositor.geometry())
                .unwrap_or(1.0);
            fit_scale(glass_extent.width, intrinsic)
        });
        self.rig.set_scale(scale);
        self.store.set_placement(
            self.shape,
            Placement::new(self.rig.position(), Vec3::splat(scale)),
        );

        // Backdrop: span the viewport on the content plane.
        self.store.set_placement(
            self.backdrop,
            Placement::new(
                Vec3::ZERO,
                Vec3::new(content_extent.width, content_extent.height, 1.0),
            ),
        );

        self.gallery.update_zoom(&mut self.store, &self.timeline);
        self.carousel.update(&mut self.store, dt);

        let (cursor, scroll) = match &mut self.nav {
            Some(nav) => nav.update(
                &mut self.store,
                &mut self.texts,
                &viewport,
                &self.camera,
                profile,
                inputs,
                &mut self.timeline,
                self.elapsed,
            ),
            None => (CursorStyle::Default, None),
        };

        self.store.evaluate_into(&mut self.changes);
        tracer.evaluate(&EvaluateEvent {
            frame_index: tick.frame_index,
            placements: self.changes.placements.len(),
            opacities: self.changes.opacities.len(),
        });

        self.compositor.build_into(
            &self.store,
            &self.geometries,
            tick.frame_index,
            &mut self.passes,
            tracer,
        );

        SceneOutputs { cursor, scroll }
    }

    /// The pass list built by the most recent [`advance`](Self::advance).
    #[must_use]
    pub fn passes(&self) -> &FramePasses {
        &self.passes
    }

    /// The change summary from the most recent evaluation.
    #[must_use]
    pub fn changes(&self) -> &FrameChanges {
        &self.changes
    }

    /// The scene tree.
    #[must_use]
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// The text table executors resolve [`TextId`]s against.
    ///
    /// [`TextId`]: vitrail_core::node::TextId
    #[must_use]
    pub fn texts(&self) -> &TextTable {
        &self.texts
    }

    /// The image table executors resolve [`ImageId`]s against.
    ///
    /// [`ImageId`]: vitrail_core::node::ImageId
    #[must_use]
    pub fn images(&self) -> &ImageTable {
        &self.images
    }

    /// Current damped scroll progress.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.timeline.progress()
    }

    /// Current device profile.
    #[must_use]
    pub fn profile(&self) -> &'static LayoutProfile {
        self.profile
    }

    /// The navigation row, in bar mode.
    #[must_use]
    pub fn nav(&self) -> Option<&NavBar> {
        self.nav.as_ref()
    }

    /// The skill carousel.
    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// The glass shape node (its placement reflects the follow rig).
    #[must_use]
    pub fn shape_node(&self) -> NodeId {
        self.shape
    }

    /// The backdrop quad node.
    #[must_use]
    pub fn backdrop_node(&self) -> NodeId {
        self.backdrop
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use vitrail_core::time::HostTime;
    use vitrail_render::RenderPass;

    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn tick(i: u64) -> FrameTick {
        FrameTick {
            now: HostTime(i * 16_667),
            frame_index: i,
        }
    }

    fn inputs(width: f64, height: f64) -> FrameInputs {
        FrameInputs {
            pointer_ndc: None,
            clicked: false,
            viewport_px: Size::new(width, height),
            scroll_fraction: 0.0,
        }
    }

    fn bar_scene() -> SceneRoot {
        SceneRoot::new(
            Mode::Bar,
            ModeOverrides::default(),
            &SceneManifest::default(),
        )
    }

    #[test]
    fn first_frames_omit_shape_pass_until_geometry_ready() {
        let mut scene = bar_scene();
        let _ = scene.advance(&tick(0), &inputs(1920.0, 1080.0), DT);
        assert!(
            !scene
                .passes()
                .passes
                .iter()
                .any(|p| matches!(p, RenderPass::Shape { .. })),
            "no shape pass while geometry is pending"
        );

        scene.geometry_ready(BoundingBox3::new(
            Vec3::new(-1.0, -0.2, -0.05),
            Vec3::new(1.0, 0.2, 0.05),
        ));
        let _ = scene.advance(&tick(1), &inputs(1920.0, 1080.0), DT);
        assert!(
            scene
                .passes()
                .passes
                .iter()
                .any(|p| matches!(p, RenderPass::Shape { .. })),
            "shape pass appears once geometry is measured"
        );
    }

    #[test]
    fn write_precedes_reads_every_frame() {
        let mut scene = bar_scene();
        for i in 0..5 {
            let _ = scene.advance(&tick(i), &inputs(1920.0, 1080.0), DT);
            let target = scene.passes().passes[0]
                .writes()
                .expect("first pass writes the target");
            assert!(scene.passes().write_precedes_reads(target));
        }
    }

    #[test]
    fn bar_scene_has_overlay_and_lens_does_not() {
        let mut bar = bar_scene();
        let _ = bar.advance(&tick(0), &inputs(1920.0, 1080.0), DT);
        assert!(
            bar.passes()
                .passes
                .iter()
                .any(|p| matches!(p, RenderPass::Overlay { .. }))
        );

        let mut lens = SceneRoot::new(
            Mode::Lens,
            ModeOverrides::default(),
            &SceneManifest::default(),
        );
        let _ = lens.advance(&tick(0), &inputs(1920.0, 1080.0), DT);
        assert!(
            !lens
                .passes()
                .passes
                .iter()
                .any(|p| matches!(p, RenderPass::Overlay { .. }))
        );
        assert!(lens.nav().is_none());
    }

    #[test]
    fn scroll_translates_content_group() {
        let mut scene = bar_scene();
        let mut frame_inputs = inputs(1920.0, 1080.0);
        frame_inputs.scroll_fraction = 1.0;
        for i in 0..600 {
            let _ = scene.advance(&tick(i), &frame_inputs, DT);
        }
        assert!((scene.progress() - 1.0).abs() < 1e-3);

        // Fully scrolled: the group has risen by (pages - 1) viewport heights.
        let viewport = Viewport::new(Size::new(1920.0, 1080.0));
        let extent = viewport.world_extent(&Camera::default(), 0.0);
        let group_y = scene.store().world_placement(scene.scroll_group).position.y;
        assert!((group_y - extent.height * 4.0).abs() < 0.05);
    }

    #[test]
    fn fit_scale_is_applied_to_shape_node() {
        let mut scene = bar_scene();
        scene.geometry_ready(BoundingBox3::new(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.1, 0.1),
        ));
        let _ = scene.advance(&tick(0), &inputs(1920.0, 1080.0), DT);

        // Viewport world width at the glass plane is ~2.34 for a 16:9 canvas,
        // so 0.9·width/2 < 0.15 exercises the fit branch.
        let viewport = Viewport::new(Size::new(1920.0, 1080.0));
        let extent = viewport.world_extent(&Camera::default(), GLASS_PLANE);
        let expected = (extent.width * 0.9 / 2.0).min(0.15);
        let scale = scene.store().world_placement(scene.shape_node()).scale;
        assert!((scale.x - expected).abs() < 1e-9);
    }

    #[test]
    fn scale_override_bypasses_fit() {
        let mut scene = SceneRoot::new(
            Mode::Lens,
            ModeOverrides {
                scale: Some(0.25),
                material: None,
            },
            &SceneManifest::default(),
        );
        let _ = scene.advance(&tick(0), &inputs(1920.0, 1080.0), DT);
        let scale = scene.store().world_placement(scene.shape_node()).scale;
        assert_eq!(scale, Vec3::splat(0.25));
    }

    #[test]
    fn backdrop_spans_the_viewport() {
        let mut scene = bar_scene();
        let _ = scene.advance(&tick(0), &inputs(1600.0, 800.0), DT);
        let viewport = Viewport::new(Size::new(1600.0, 800.0));
        let extent = viewport.world_extent(&Camera::default(), 0.0);
        let scale = scene.store().world_placement(scene.backdrop_node()).scale;
        assert!((scale.x - extent.width).abs() < 1e-9);
        assert!((scale.y - extent.height).abs() < 1e-9);
    }

    #[test]
    fn resize_reclassifies_device_and_relayouts_gallery() {
        let mut scene = bar_scene();
        let _ = scene.advance(&tick(0), &inputs(1920.0, 1080.0), DT);
        assert_eq!(
            scene.profile().class,
            vitrail_core::viewport::DeviceClass::Wide
        );

        let _ = scene.advance(&tick(1), &inputs(480.0, 800.0), DT);
        assert_eq!(
            scene.profile().class,
            vitrail_core::viewport::DeviceClass::Narrow
        );

        // Narrow gallery placement: x = -2 × 0.47 × 0.9.
        let offscreen = scene.passes().passes.first().expect("offscreen pass");
        let RenderPass::Offscreen { items, .. } = offscreen else {
            panic!("first pass must be offscreen");
        };
        let has_narrow_image = items.iter().any(|item| {
            matches!(item.content, NodeContent::Image { .. })
                && (item.placement.position.x - (-2.0 * 0.47 * 0.9)).abs() < 1e-9
        });
        assert!(has_narrow_image, "gallery re-derived for the narrow profile");
    }

    #[test]
    fn pointer_follow_moves_lens_toward_pointer() {
        let mut scene = SceneRoot::new(
            Mode::Lens,
            ModeOverrides::default(),
            &SceneManifest::default(),
        );
        let mut frame_inputs = inputs(1920.0, 1080.0);
        frame_inputs.pointer_ndc = Some(kurbo::Point::new(1.0, 0.0));
        for i in 0..600 {
            let _ = scene.advance(&tick(i), &frame_inputs, DT);
        }
        let viewport = Viewport::new(Size::new(1920.0, 1080.0));
        let extent = viewport.world_extent(&Camera::default(), GLASS_PLANE);
        let p = scene.store().world_placement(scene.shape_node()).position;
        assert!((p.x - extent.width / 2.0).abs() < 1e-3);
        assert!((p.z - GLASS_PLANE).abs() < 1e-9);
    }

    #[test]
    fn carousel_rotates_during_advance() {
        let mut scene = bar_scene();
        let before = scene.carousel().angle();
        for i in 0..30 {
            let _ = scene.advance(&tick(i), &inputs(1920.0, 1080.0), DT);
        }
        assert!((scene.carousel().angle() - before - 0.5).abs() < 1e-9);
    }
}
