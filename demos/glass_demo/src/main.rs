// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives the bar-mode scene through a scripted five-second run: the pointer
//! sweeps the canvas, scrolling ramps to the bottom, the glass geometry
//! "loads" two seconds in, and a navigation label is clicked. Prints a
//! summary of what the executor saw.

use kurbo::{Point, Size};

use vitrail_compose::{Mode, ModeOverrides, NAV_PLANE, SceneManifest, SceneRoot};
use vitrail_core::geometry::{BoundingBox3, Vec3};
use vitrail_core::timing::FrameInputs;
use vitrail_core::trace::{ShapeSkippedEvent, TraceSink, Tracer};
use vitrail_core::viewport::{Camera, Viewport};
use vitrail_harness::{FrameDriver, PassKind, PlanRecorder};
use vitrail_render::PassExecutor;

const FRAMES: u64 = 300;
const GEOMETRY_READY_AT: u64 = 120;
const CLICK_AT: u64 = 150;
const CANVAS: Size = Size::new(1920.0, 1080.0);

#[derive(Default)]
struct SkipCounter {
    skips: u32,
}

impl TraceSink for SkipCounter {
    fn on_shape_skipped(&mut self, _e: &ShapeSkippedEvent) {
        self.skips += 1;
    }
}

fn main() {
    let mut scene = SceneRoot::new(
        Mode::Bar,
        ModeOverrides::default(),
        &SceneManifest::default(),
    );
    let mut driver = FrameDriver::at_60hz();
    let mut recorder = PlanRecorder::new();
    let mut sink = SkipCounter::default();

    let viewport = Viewport::new(CANVAS);
    let camera = Camera::default();
    let mut commands = 0;
    let mut pointer_frames = 0;

    for frame in 0..FRAMES {
        if frame == GEOMETRY_READY_AT {
            scene.geometry_ready(BoundingBox3::new(
                Vec3::new(-1.0, -0.2, -0.05),
                Vec3::new(1.0, 0.2, 0.05),
            ));
        }

        let t = frame as f64 / FRAMES as f64;
        let mut inputs = FrameInputs {
            pointer_ndc: Some(Point::new(
                (t * std::f64::consts::TAU).sin() * 0.8,
                (t * std::f64::consts::TAU).cos() * 0.5,
            )),
            clicked: false,
            viewport_px: CANVAS,
            scroll_fraction: t,
        };

        if frame == CLICK_AT {
            // Aim exactly at the second navigation label and click it.
            let store = scene.store();
            let nav = scene.nav().expect("bar mode has a nav row");
            let label = nav.label_center(store, 1);
            let extent = viewport.world_extent(&camera, NAV_PLANE);
            inputs.pointer_ndc = Some(Point::new(
                label.x / (extent.width / 2.0),
                label.y / (extent.height / 2.0),
            ));
            inputs.clicked = true;
        }

        let tick = driver.next_tick();
        let mut tracer = Tracer::new(&mut sink);
        let outputs = scene.advance_traced(&tick, &inputs, driver.dt(), &mut tracer);
        recorder.execute(scene.passes());

        if outputs.scroll.is_some() {
            commands += 1;
        }
        if outputs.cursor == vitrail_core::timing::CursorStyle::Pointer {
            pointer_frames += 1;
        }
    }

    let ordered = recorder.frames().iter().all(|frame| {
        frame.passes[0]
            .writes
            .is_some_and(|target| frame.write_precedes_reads(target))
    });

    println!("frames executed:        {}", recorder.frames().len());
    println!(
        "shape passes:           {} (skipped {} before geometry was ready)",
        recorder.frames_with(PassKind::Shape),
        sink.skips
    );
    println!(
        "backdrop passes:        {}",
        recorder.frames_with(PassKind::Backdrop)
    );
    println!(
        "overlay passes:         {}",
        recorder.frames_with(PassKind::Overlay)
    );
    println!("write-before-read:      {}", if ordered { "ok" } else { "VIOLATED" });
    println!("scroll commands issued: {commands}");
    println!("pointer-cursor frames:  {pointer_frames}");
    println!("final scroll progress:  {:.3}", scene.progress());
    println!(
        "carousel angle:         {:.3} rad",
        scene.carousel().angle()
    );
}
