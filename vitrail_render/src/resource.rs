// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry asset readiness.
//!
//! Geometry files are fetched and parsed by the host; the registry records,
//! per asset, whether bounds have been measured yet. The compositor skips a
//! shape pass whose geometry is still [`Pending`](GeometryAsset::Pending),
//! and the follow positioner falls back to a nominal intrinsic width of 1
//! until bounds arrive.

use alloc::vec::Vec;

use vitrail_core::geometry::BoundingBox3;
use vitrail_core::node::GeometryId;

/// Load state of one geometry asset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryAsset {
    /// The host has not finished loading the asset.
    Pending,
    /// The asset is loaded and measured.
    Ready {
        /// Axis-aligned bounds of the geometry.
        bounds: BoundingBox3,
    },
}

/// Registry of geometry assets, indexed by [`GeometryId`].
#[derive(Clone, Debug, Default)]
pub struct GeometryRegistry {
    entries: Vec<GeometryAsset>,
}

impl GeometryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new, still-pending geometry asset.
    pub fn register(&mut self) -> GeometryId {
        let id = GeometryId(u32::try_from(self.entries.len()).expect("geometry count fits in u32"));
        self.entries.push(GeometryAsset::Pending);
        id
    }

    /// Records that the host finished loading an asset.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn set_ready(&mut self, id: GeometryId, bounds: BoundingBox3) {
        let entry = self
            .entries
            .get_mut(id.0 as usize)
            .expect("unknown GeometryId");
        *entry = GeometryAsset::Ready { bounds };
    }

    /// Current load state of an asset.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    #[must_use]
    pub fn asset(&self, id: GeometryId) -> GeometryAsset {
        *self.entries.get(id.0 as usize).expect("unknown GeometryId")
    }

    /// Whether the asset has been measured.
    #[must_use]
    pub fn is_ready(&self, id: GeometryId) -> bool {
        matches!(self.asset(id), GeometryAsset::Ready { .. })
    }

    /// Intrinsic width of the asset, if measured.
    #[must_use]
    pub fn width(&self, id: GeometryId) -> Option<f64> {
        match self.asset(id) {
            GeometryAsset::Ready { bounds } => Some(bounds.width()),
            GeometryAsset::Pending => None,
        }
    }
}
