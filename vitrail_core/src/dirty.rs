// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Vitrail uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! propagate invalidation through the scene tree. Each channel represents an
//! independent category of change.
//!
//! # Propagation semantics
//!
//! - **Propagating** — [`PLACEMENT`] and [`OPACITY`] use
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and have dependency edges
//!   from child to parent: world placements, effective opacities, and
//!   effective hidden state are inherited properties, so marking a parent
//!   marks all descendants. (Hidden-flag changes are routed through
//!   [`PLACEMENT`] so that the same drain pass recomputes both.)
//!
//! - **Local-only** — [`CONTENT`] is marked with the default policy. Content
//!   (text run, image with zoom, light, glass geometry) is a per-node
//!   property.
//!
//! - **Structural** — [`TOPOLOGY`] is marked on topology mutations
//!   (add/remove child, create/destroy node) and triggers a traversal-order
//!   rebuild during evaluation.
//!
//! Callers never query dirty state directly: each
//! [`NodeStore::evaluate`](crate::node::NodeStore::evaluate) call drains all
//! channels and surfaces the results as
//! [`FrameChanges`](crate::node::FrameChanges).

use understory_dirty::Channel;

/// Placement or hidden flag changed — requires world placement and effective
/// hidden recomputation for descendants.
pub const PLACEMENT: Channel = Channel::new(0);

/// Opacity changed — requires effective opacity recomputation for descendants.
pub const OPACITY: Channel = Channel::new(1);

/// Node content changed — no propagation needed.
pub const CONTENT: Channel = Channel::new(2);

/// Tree topology changed — triggers traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(3);
