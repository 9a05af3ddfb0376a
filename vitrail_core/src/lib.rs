// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene graph and per-frame animation core for the vitrail glass
//! compositor.
//!
//! `vitrail_core` provides the data model and all per-frame computation for
//! a scroll-driven decorative 3-D scene with a refractive glass shape. It is
//! `no_std` compatible (with `alloc`) and uses array-based struct-of-arrays
//! storage with index handles for cache-friendly traversal.
//!
//! # Architecture
//!
//! The crate is organized around a frame loop that turns host animation
//! callbacks into scene updates:
//!
//! ```text
//!   Backend (tick + input sources)
//!       │
//!       ▼
//!   FrameTick + FrameInputs ──► per-frame systems
//!       (scroll damping, follow positioner, zoom, interaction flags)
//!                │
//!                ▼
//!   NodeStore::evaluate() ──► FrameChanges
//!                │
//!                ▼
//!   compositor (vitrail_render) ──► FramePasses ──► PassExecutor
//! ```
//!
//! **[`node`]** — Struct-of-arrays scene tree with generational handles.
//! Placements, opacities, content, and flags are set by the caller; world
//! placements and effective opacities are computed by evaluation.
//!
//! **[`dirty`]** — Multi-channel dirty tracking via `understory_dirty`.
//! PLACEMENT and OPACITY propagate to descendants; CONTENT is local-only;
//! TOPOLOGY triggers a traversal rebuild.
//!
//! **[`viewport`]** — Device classification against fixed breakpoints, the
//! ordered layout-profile table, and camera/world-extent mapping.
//!
//! **[`scroll`]** — Damped scroll timeline over virtual pages with sub-band
//! mapping for partial-scroll effects.
//!
//! **[`follow`]** — Exponentially damped pointer-follow positioning and the
//! fit-to-viewport scale clamp.
//!
//! **[`material`]** — Transmission material parameters for the glass shape.
//!
//! **[`time`]** / **[`timing`]** — Host time, clamped frame deltas, frame
//! ticks, and per-frame input snapshots.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod follow;
pub mod geometry;
pub mod material;
pub mod node;
pub mod placement;
pub mod scroll;
pub mod time;
pub mod timing;
pub mod trace;
pub mod viewport;
