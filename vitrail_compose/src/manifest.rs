// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene manifest: hand-authored placements and content.
//!
//! Everything here is data. Positions are world units, calibrated against
//! the five-page scroll extent; the navigation scroll targets in
//! particular are tuned by eye against the section placements and must be
//! retuned if sections move. There is no principled derivation.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use vitrail_core::geometry::Vec3;
use vitrail_core::node::LightKind;

/// Size class of a section text block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionSize {
    /// The page title.
    Large,
    /// Section headings.
    Medium,
    /// Body copy.
    Small,
}

impl SectionSize {
    /// Font size in world units.
    #[must_use]
    pub const fn font_size(self) -> f64 {
        match self {
            Self::Large => 0.9,
            Self::Medium => 0.4,
            Self::Small => 0.12,
        }
    }
}

/// One hand-placed text block.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBlock {
    /// Lines of the block, joined with newlines when drawn.
    pub lines: Vec<String>,
    /// Size class.
    pub size: SectionSize,
    /// World position.
    pub position: Vec3,
}

/// Scale of a gallery image plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageScale {
    /// Square plane with the given side length.
    Uniform(f64),
    /// Plane with explicit width and height.
    Plane(f64, f64),
}

/// One gallery image with its desktop-calibrated placement.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryImage {
    /// Base world position before device multipliers.
    pub position: Vec3,
    /// Base scale before device multipliers.
    pub scale: ImageScale,
    /// Image URL, fetched by the host.
    pub url: String,
}

/// One navigation label and the scroll fraction it jumps to.
#[derive(Clone, Debug, PartialEq)]
pub struct NavEntry {
    /// Label text.
    pub label: String,
    /// Scroll progress target in `[0, 1]`.
    pub target_fraction: f64,
}

/// The rotating skill-tile ring.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselSpec {
    /// World position of the ring center.
    pub position: Vec3,
    /// Ring radius, world units.
    pub radius: f64,
    /// Angular speed, radians per second.
    pub speed: f64,
    /// Tile labels.
    pub tiles: Vec<String>,
}

/// One light in the sub-scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSpec {
    /// Light kind.
    pub kind: LightKind,
    /// Intensity.
    pub intensity: f32,
    /// World position (ignored for ambient lights).
    pub position: Vec3,
}

/// Everything the scene root composes: text blocks, gallery, navigation,
/// carousel, and lighting.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneManifest {
    /// Hand-placed text blocks, top to bottom.
    pub sections: Vec<SectionBlock>,
    /// Gallery images.
    pub images: Vec<GalleryImage>,
    /// Navigation entries (used by the bar mode only).
    pub nav: Vec<NavEntry>,
    /// The skill carousel.
    pub carousel: CarouselSpec,
    /// Sub-scene lighting.
    pub lights: Vec<LightSpec>,
}

/// Navigation scroll targets, tuned against the default section placements.
pub const NAV_SCROLL_TARGETS: &[(&str, f64)] = &[
    ("About", 0.094),
    ("Experience", 0.214),
    ("Skills", 0.346),
    ("Projects", 0.419),
];

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            sections: vec![
                SectionBlock {
                    lines: vec!["Vitrail".to_string()],
                    size: SectionSize::Large,
                    position: Vec3::new(0.0, 0.0, 12.0),
                },
                SectionBlock {
                    lines: vec!["About".to_string()],
                    size: SectionSize::Medium,
                    position: Vec3::new(0.0, -2.0, 8.0),
                },
                SectionBlock {
                    lines: vec![
                        "A scroll-driven scene with a refractive glass shape,".to_string(),
                        "floating imagery, and a rotating ring of skills,".to_string(),
                        "composed entirely from hand-placed blocks.".to_string(),
                    ],
                    size: SectionSize::Small,
                    position: Vec3::new(0.0, -2.4, 6.0),
                },
                SectionBlock {
                    lines: vec!["Experience".to_string()],
                    size: SectionSize::Medium,
                    position: Vec3::new(0.0, -5.8, 8.0),
                },
                SectionBlock {
                    lines: vec!["Skills".to_string()],
                    size: SectionSize::Medium,
                    position: Vec3::new(0.0, -10.0, 8.0),
                },
                SectionBlock {
                    lines: vec!["Projects".to_string()],
                    size: SectionSize::Medium,
                    position: Vec3::new(0.0, -12.3, 8.0),
                },
            ],
            images: vec![
                GalleryImage {
                    position: Vec3::new(-2.0, 0.0, 3.0),
                    scale: ImageScale::Uniform(3.0),
                    url: "assets/images/mountains.jpg".to_string(),
                },
                GalleryImage {
                    position: Vec3::new(2.0, 0.0, 3.0),
                    scale: ImageScale::Uniform(3.0),
                    url: "assets/images/painting.png".to_string(),
                },
                GalleryImage {
                    position: Vec3::new(0.0, -4.3, 6.0),
                    scale: ImageScale::Plane(4.0, 2.0),
                    url: "assets/images/campus.jpg".to_string(),
                },
            ],
            nav: NAV_SCROLL_TARGETS
                .iter()
                .map(|&(label, target_fraction)| NavEntry {
                    label: label.to_string(),
                    target_fraction,
                })
                .collect(),
            carousel: CarouselSpec {
                position: Vec3::new(0.0, -11.0, 5.0),
                radius: 1.6,
                speed: 1.0,
                tiles: vec![
                    "Rust".to_string(),
                    "WebGPU".to_string(),
                    "TypeScript".to_string(),
                    "SQL".to_string(),
                    "Linux".to_string(),
                ],
            },
            lights: vec![
                LightSpec {
                    kind: LightKind::Ambient,
                    intensity: 0.5,
                    position: Vec3::ZERO,
                },
                LightSpec {
                    kind: LightKind::Point,
                    intensity: 1.0,
                    position: Vec3::new(10.0, 10.0, 10.0),
                },
                LightSpec {
                    kind: LightKind::Point,
                    intensity: 0.5,
                    position: Vec3::new(-10.0, -10.0, 10.0),
                },
            ],
        }
    }
}
