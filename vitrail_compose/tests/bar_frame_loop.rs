// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end frame loop over the bar scene: synthetic ticks, a mid-run
//! geometry load, a navigation click, and pass-order auditing.

use kurbo::{Point, Size};

use vitrail_compose::{Mode, ModeOverrides, SceneManifest, SceneRoot};
use vitrail_core::geometry::{BoundingBox3, Vec3};
use vitrail_core::timing::{CursorStyle, FrameInputs};
use vitrail_harness::{FrameDriver, PassKind, PlanRecorder};
use vitrail_render::PassExecutor;

fn idle_inputs() -> FrameInputs {
    FrameInputs {
        pointer_ndc: None,
        clicked: false,
        viewport_px: Size::new(1920.0, 1080.0),
        scroll_fraction: 0.0,
    }
}

#[test]
fn geometry_load_mid_run_enables_the_shape_pass() {
    let mut scene = SceneRoot::new(
        Mode::Bar,
        ModeOverrides::default(),
        &SceneManifest::default(),
    );
    let mut driver = FrameDriver::at_60hz();
    let mut recorder = PlanRecorder::new();
    let inputs = idle_inputs();

    for frame in 0..120 {
        if frame == 60 {
            scene.geometry_ready(BoundingBox3::new(
                Vec3::new(-1.0, -0.2, -0.05),
                Vec3::new(1.0, 0.2, 0.05),
            ));
        }
        let tick = driver.next_tick();
        let _ = scene.advance(&tick, &inputs, driver.dt());
        recorder.execute(scene.passes());
    }

    // The shape pass ran only after the asset loaded, and nothing crashed
    // before: every frame still carried the write and backdrop passes.
    assert_eq!(recorder.frames_with(PassKind::Shape), 60);
    assert_eq!(recorder.frames_with(PassKind::Offscreen), 120);
    assert_eq!(recorder.frames_with(PassKind::Backdrop), 120);
    assert_eq!(recorder.frames_with(PassKind::Overlay), 120);

    for frame in recorder.frames() {
        let target = frame.passes[0].writes.expect("first pass writes");
        assert!(
            frame.write_precedes_reads(target),
            "write-before-read must hold in frame {}",
            frame.frame_index
        );
    }
}

#[test]
fn nav_click_scrolls_the_timeline_to_its_target() {
    let mut scene = SceneRoot::new(
        Mode::Bar,
        ModeOverrides::default(),
        &SceneManifest::default(),
    );
    let mut driver = FrameDriver::at_60hz();

    // Settle one frame so the row is placed, then aim at the second label.
    let tick = driver.next_tick();
    let _ = scene.advance(&tick, &idle_inputs(), driver.dt());

    let store = scene.store();
    let nav = scene.nav().expect("bar mode has a nav row");
    let label = nav.label_center(store, 1);
    let viewport = vitrail_core::viewport::Viewport::new(Size::new(1920.0, 1080.0));
    let extent = viewport.world_extent(
        &vitrail_core::viewport::Camera::default(),
        vitrail_compose::NAV_PLANE,
    );
    let pointer = Point::new(
        label.x / (extent.width / 2.0),
        label.y / (extent.height / 2.0),
    );

    let mut click = idle_inputs();
    click.pointer_ndc = Some(pointer);
    click.clicked = true;
    let tick = driver.next_tick();
    let outputs = scene.advance(&tick, &click, driver.dt());

    let command = outputs.scroll.expect("click issues a scroll command");
    assert!((command.fraction - 0.214).abs() < 1e-12);
    assert_eq!(outputs.cursor, CursorStyle::Pointer);
    assert!(scene.nav().expect("nav").outline_visible(1));

    // With the host echoing the commanded fraction, progress converges there.
    let mut follow_up = idle_inputs();
    follow_up.scroll_fraction = command.fraction;
    for _ in 0..600 {
        let tick = driver.next_tick();
        let _ = scene.advance(&tick, &follow_up, driver.dt());
    }
    assert!((scene.progress() - 0.214).abs() < 1e-3);
}

#[test]
fn pointer_leaving_canvas_resets_cursor() {
    let mut scene = SceneRoot::new(
        Mode::Bar,
        ModeOverrides::default(),
        &SceneManifest::default(),
    );
    let mut driver = FrameDriver::at_60hz();
    let tick = driver.next_tick();
    let _ = scene.advance(&tick, &idle_inputs(), driver.dt());

    let store = scene.store();
    let nav = scene.nav().expect("nav");
    let label = nav.label_center(store, 0);
    let viewport = vitrail_core::viewport::Viewport::new(Size::new(1920.0, 1080.0));
    let extent = viewport.world_extent(
        &vitrail_core::viewport::Camera::default(),
        vitrail_compose::NAV_PLANE,
    );

    let mut hover = idle_inputs();
    hover.pointer_ndc = Some(Point::new(
        label.x / (extent.width / 2.0),
        label.y / (extent.height / 2.0),
    ));
    let tick = driver.next_tick();
    let outputs = scene.advance(&tick, &hover, driver.dt());
    assert_eq!(outputs.cursor, CursorStyle::Pointer);

    let tick = driver.next_tick();
    let outputs = scene.advance(&tick, &idle_inputs(), driver.dt());
    assert_eq!(outputs.cursor, CursorStyle::Default);
}
