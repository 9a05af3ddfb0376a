// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pass-plan definitions and render-to-texture compositing for vitrail.
//!
//! This crate is the intermediate representation between
//! [`vitrail_core`]'s scene evaluation and engine-specific rendering. It
//! defines:
//!
//! - [`RenderItem`] — a single draw in the pass plan
//! - [`RenderPass`] / [`FramePasses`] — the ordered pass list for one frame
//! - [`GeometryRegistry`] — per-geometry asset readiness
//! - [`GlassCompositor`] — builds each frame's passes from the scene tree
//! - [`PassExecutor`] — the one trait a real engine implements

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod compositor;
mod exec;
mod plan;
mod resource;

pub use compositor::{CompositorNodes, GlassCompositor};
pub use exec::PassExecutor;
pub use plan::{FramePasses, RenderItem, RenderPass};
pub use resource::{GeometryAsset, GeometryRegistry};
