// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device classification and camera/viewport mapping.
//!
//! Device class is a pure function of window width against two fixed
//! breakpoints. All per-class layout constants live in one ordered table,
//! [`LAYOUT_PROFILES`]; consumers look a profile up once per resize event and
//! pass it down as plain data rather than re-deriving constants ad hoc.
//!
//! The camera mapping converts between the canvas pixel viewport and world
//! units on a given depth plane: for a perspective camera at `position_z`
//! looking down −z, the visible world height at plane `z` is
//! `2 · (position_z − z) · tan(fov/2)`.

use kurbo::{Point, Size};

/// Device class derived from viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Phone-sized viewports (width ≤ 639 px).
    Narrow,
    /// Tablet-sized viewports (640–1023 px).
    Medium,
    /// Everything wider (≥ 1024 px).
    Wide,
}

impl DeviceClass {
    /// Buckets a viewport width into a device class.
    ///
    /// Pure and total; boundary widths 639/640 and 1023/1024 switch classes
    /// exactly at the boundary.
    #[must_use]
    pub fn classify(width: f64) -> Self {
        profile_for(width).class
    }
}

/// Layout constants for one device class.
///
/// One record per class, kept together in [`LAYOUT_PROFILES`] so that layout
/// decisions are data rather than conditionals scattered across components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutProfile {
    /// The class this profile belongs to.
    pub class: DeviceClass,
    /// Largest viewport width (px, inclusive) this profile applies to.
    pub max_width: f64,
    /// Horizontal spacing between navigation labels, world units.
    pub nav_spacing: f64,
    /// Navigation label font size, world units.
    pub nav_font_size: f64,
    /// Multiplier applied to gallery item x/y positions.
    pub gallery_position_factor: [f64; 2],
    /// Multiplier applied to gallery item scales.
    pub gallery_scale_factor: f64,
    /// Multiplier applied to the x position of content anchored beside text
    /// sections, pulling it inward on narrow viewports.
    pub anchor_x_factor: f64,
}

/// The ordered breakpoint table, narrowest class first.
///
/// The last entry is the catch-all; its `max_width` is infinite.
pub static LAYOUT_PROFILES: [LayoutProfile; 3] = [
    LayoutProfile {
        class: DeviceClass::Narrow,
        max_width: 639.0,
        nav_spacing: 0.14,
        nav_font_size: 0.022,
        gallery_position_factor: [0.9, 0.9],
        gallery_scale_factor: 0.5,
        anchor_x_factor: 0.47,
    },
    LayoutProfile {
        class: DeviceClass::Medium,
        max_width: 1023.0,
        nav_spacing: 0.24,
        nav_font_size: 0.045,
        gallery_position_factor: [1.0, 1.0],
        gallery_scale_factor: 0.8,
        anchor_x_factor: 0.8,
    },
    LayoutProfile {
        class: DeviceClass::Wide,
        max_width: f64::INFINITY,
        nav_spacing: 0.3,
        nav_font_size: 0.045,
        gallery_position_factor: [1.0, 1.0],
        gallery_scale_factor: 1.0,
        anchor_x_factor: 1.0,
    },
];

/// Returns the layout profile for a viewport width.
#[must_use]
pub fn profile_for(width: f64) -> &'static LayoutProfile {
    LAYOUT_PROFILES
        .iter()
        .find(|p| width <= p.max_width)
        .unwrap_or(&LAYOUT_PROFILES[LAYOUT_PROFILES.len() - 1])
}

/// A perspective camera on the +z axis looking toward −z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Camera z position in world units.
    pub position_z: f64,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position_z: 20.0,
            fov_y_deg: 15.0,
        }
    }
}

/// The canvas viewport in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Canvas size in pixels.
    pub size_px: Size,
}

impl Viewport {
    /// Creates a viewport from a pixel size.
    #[inline]
    #[must_use]
    pub const fn new(size_px: Size) -> Self {
        Self { size_px }
    }

    /// Width-over-height aspect ratio, defaulting to 1 while the canvas has
    /// no reported extent.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.size_px.height > 0.0 && self.size_px.width > 0.0 {
            self.size_px.width / self.size_px.height
        } else {
            1.0
        }
    }

    /// World-space extent of this viewport on the plane at depth `plane_z`.
    ///
    /// Planes at or behind the camera have zero extent.
    #[must_use]
    pub fn world_extent(&self, camera: &Camera, plane_z: f64) -> Size {
        let distance = camera.position_z - plane_z;
        if distance <= 0.0 {
            return Size::ZERO;
        }
        let half_fov = camera.fov_y_deg.to_radians() / 2.0;
        let height = 2.0 * distance * libm::tan(half_fov);
        Size::new(height * self.aspect(), height)
    }

    /// Maps a pointer position in normalized device coordinates to world
    /// coordinates on the plane at depth `plane_z`.
    #[must_use]
    pub fn ndc_to_world(&self, camera: &Camera, plane_z: f64, ndc: Point) -> Point {
        let extent = self.world_extent(camera, plane_z);
        Point::new(ndc.x * extent.width / 2.0, ndc.y * extent.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(DeviceClass::classify(0.0), DeviceClass::Narrow);
        assert_eq!(DeviceClass::classify(639.0), DeviceClass::Narrow);
        assert_eq!(DeviceClass::classify(640.0), DeviceClass::Medium);
        assert_eq!(DeviceClass::classify(1023.0), DeviceClass::Medium);
        assert_eq!(DeviceClass::classify(1024.0), DeviceClass::Wide);
        assert_eq!(DeviceClass::classify(2560.0), DeviceClass::Wide);
    }

    #[test]
    fn profiles_are_ordered_by_breakpoint() {
        let mut prev = 0.0;
        for profile in &LAYOUT_PROFILES {
            assert!(
                profile.max_width > prev,
                "breakpoints must strictly increase"
            );
            prev = profile.max_width;
        }
    }

    #[test]
    fn profile_lookup_matches_class() {
        for width in [320.0, 639.0, 640.0, 800.0, 1023.0, 1024.0, 1920.0] {
            assert_eq!(profile_for(width).class, DeviceClass::classify(width));
        }
    }

    #[test]
    fn world_extent_at_plane() {
        let camera = Camera::default();
        let vp = Viewport::new(Size::new(1600.0, 800.0));
        // Distance 5 to the z=15 plane, fov 15°.
        let extent = vp.world_extent(&camera, 15.0);
        let expected_height = 2.0 * 5.0 * libm::tan(15.0_f64.to_radians() / 2.0);
        assert!((extent.height - expected_height).abs() < 1e-12);
        assert!((extent.width - expected_height * 2.0).abs() < 1e-12);
    }

    #[test]
    fn extent_scales_with_distance() {
        let camera = Camera::default();
        let vp = Viewport::new(Size::new(1000.0, 1000.0));
        let near = vp.world_extent(&camera, 15.0);
        let far = vp.world_extent(&camera, 0.0);
        // Distance 20 vs 5: four times the extent.
        assert!((far.height / near.height - 4.0).abs() < 1e-9);
    }

    #[test]
    fn plane_behind_camera_has_no_extent() {
        let camera = Camera::default();
        let vp = Viewport::new(Size::new(1000.0, 1000.0));
        assert_eq!(vp.world_extent(&camera, 25.0), Size::ZERO);
    }

    #[test]
    fn ndc_maps_to_half_extent() {
        let camera = Camera::default();
        let vp = Viewport::new(Size::new(1000.0, 500.0));
        let extent = vp.world_extent(&camera, 15.0);
        let corner = vp.ndc_to_world(&camera, 15.0, Point::new(1.0, -1.0));
        assert!((corner.x - extent.width / 2.0).abs() < 1e-12);
        assert!((corner.y + extent.height / 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_sized_canvas_is_tolerated() {
        let camera = Camera::default();
        let vp = Viewport::default();
        assert_eq!(vp.aspect(), 1.0);
        let extent = vp.world_extent(&camera, 15.0);
        assert!(extent.height > 0.0, "square fallback aspect");
    }
}
