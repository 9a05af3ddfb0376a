// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape mode variants.
//!
//! A mode picks the glass geometry asset, how the shape follows the pointer,
//! and the material preset. The bar additionally carries the navigation row.

use vitrail_core::follow::FollowConfig;
use vitrail_core::material::TransmissionMaterial;

/// Inward offset of the bar from the top viewport edge, world units.
pub const BAR_EDGE_MARGIN: f64 = 0.1;

/// Which glass shape the scene composes around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// A pointer-following lens.
    #[default]
    Lens,
    /// A bar pinned to the top edge, carrying the navigation row.
    Bar,
    /// A pointer-following cube.
    Cube,
}

/// Reference to the geometry file a mode loads, by path and named node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeAsset {
    /// Asset path, resolved by the host.
    pub path: &'static str,
    /// Name of the mesh node inside the file.
    pub geometry_node: &'static str,
}

impl Mode {
    /// The geometry asset this mode renders.
    #[must_use]
    pub const fn asset(self) -> ShapeAsset {
        match self {
            Self::Lens => ShapeAsset {
                path: "assets/3d/lens.glb",
                geometry_node: "Cylinder",
            },
            Self::Bar => ShapeAsset {
                path: "assets/3d/bar.glb",
                geometry_node: "Cube",
            },
            Self::Cube => ShapeAsset {
                path: "assets/3d/cube.glb",
                geometry_node: "Cube",
            },
        }
    }

    /// How the shape picks its per-frame position target.
    #[must_use]
    pub const fn follow(self, depth: f64) -> FollowConfig {
        match self {
            Self::Lens | Self::Cube => FollowConfig::pointer(depth),
            Self::Bar => FollowConfig::top_bar(depth, BAR_EDGE_MARGIN),
        }
    }

    /// The material preset for this mode.
    #[must_use]
    pub fn material(self) -> TransmissionMaterial {
        match self {
            Self::Lens | Self::Cube => TransmissionMaterial::default(),
            Self::Bar => TransmissionMaterial::bar(),
        }
    }

    /// Whether this mode carries the navigation row.
    #[must_use]
    pub const fn has_nav(self) -> bool {
        matches!(self, Self::Bar)
    }
}

/// Caller overrides applied on top of a mode's defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModeOverrides {
    /// Fixed shape scale; when `None` the fit-to-viewport clamp applies.
    pub scale: Option<f64>,
    /// Replacement material.
    pub material: Option<TransmissionMaterial>,
}
