// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene node tree data model.
//!
//! A *node* is an entry in the scene tree. Each node has:
//!
//! - An identity ([`NodeId`]) — a generational handle that becomes stale when
//!   the node is destroyed, preventing use-after-free bugs at the API level.
//! - Topology — parent, first-child, and sibling links forming an ordered
//!   tree.
//! - **Local properties** set by the caller:
//!   [`placement`](NodeStore::set_placement),
//!   [`opacity`](NodeStore::set_opacity),
//!   [`content`](NodeStore::set_content), and
//!   [`flags`](NodeStore::set_flags).
//! - **Computed properties** produced by [`evaluate`](NodeStore::evaluate):
//!   `world_placement` (composition of ancestor local placements) and
//!   `effective_opacity` (product of ancestor local opacities).
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles for
//! cache-friendly traversal.
//!
//! # Dirty tracking
//!
//! Property mutations automatically mark the corresponding dirty channel
//! (see [`dirty`](crate::dirty)):
//!
//! - **PLACEMENT** / **OPACITY** — propagate to all descendants, since world
//!   placements and effective opacities are inherited.
//! - **CONTENT** — local-only; only the modified node is marked.
//! - **TOPOLOGY** — structural changes (add/remove child, create/destroy
//!   node) that trigger a traversal-order rebuild.

mod content;
mod evaluate;
mod id;
mod store;
mod traverse;

pub use content::{LightKind, NodeContent};
pub use evaluate::FrameChanges;
pub use id::{GeometryId, INVALID, ImageId, NodeId, TargetId, TextId};
pub use store::{NodeFlags, NodeStore};
pub use traverse::Children;
