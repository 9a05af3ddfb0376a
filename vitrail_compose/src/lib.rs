// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decorative glass scene composition.
//!
//! This crate assembles the concrete scene on top of
//! [`vitrail_core`]/[`vitrail_render`]: a mode-specific glass shape
//! ([`Mode`]), hand-placed section text blocks, a scroll-zooming image
//! gallery, a rotating skill carousel, lighting, and — in bar mode — the
//! pinned navigation row.
//!
//! [`SceneRoot`] is the entry point: build it from a [`SceneManifest`], feed
//! it one [`FrameTick`] + [`FrameInputs`] per frame, and hand the resulting
//! pass list to a [`PassExecutor`].
//!
//! [`FrameTick`]: vitrail_core::timing::FrameTick
//! [`FrameInputs`]: vitrail_core::timing::FrameInputs
//! [`PassExecutor`]: vitrail_render::PassExecutor

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod carousel;
mod gallery;
mod manifest;
mod mode;
mod nav;
mod scene;
mod text;

pub use carousel::Carousel;
pub use gallery::{Gallery, ImageTable, zoom_for};
pub use manifest::{
    CarouselSpec, GalleryImage, ImageScale, LightSpec, NAV_SCROLL_TARGETS, NavEntry, SceneManifest,
    SectionBlock, SectionSize,
};
pub use mode::{BAR_EDGE_MARGIN, Mode, ModeOverrides, ShapeAsset};
pub use nav::{NAV_DEPTH, NAV_PLANE, NAV_TOP_MARGIN, NavBar, OUTLINE_SECONDS};
pub use scene::{GLASS_PLANE, SHAPE_ROTATION_X, SceneOutputs, SceneRoot};
pub use text::{ACCENT, TextOutline, TextRun, TextTable, WHITE};
