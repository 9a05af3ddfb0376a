// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transmission material parameters for the glass shape.
//!
//! These are plain data handed to the executor, which maps them onto
//! whatever physically-based transmission shader its engine provides. Every
//! parameter is independently overridable; the defaults are the lens/cube
//! look and [`TransmissionMaterial::bar`] is the frosted slab used by the
//! navigation bar.

/// An RGB color with `f32` components in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Parameters of a physically-based transmission (refractive glass) shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransmissionMaterial {
    /// Index of refraction.
    pub ior: f64,
    /// Apparent slab thickness in world units.
    pub thickness: f64,
    /// Anisotropic blur of the transmitted background.
    pub anisotropy: f64,
    /// Chromatic aberration strength.
    pub chromatic_aberration: f64,
    /// Transmission amount, 1.0 = fully transmissive.
    pub transmission: f64,
    /// Surface roughness, 0.0 = polished.
    pub roughness: f64,
    /// Surface tint.
    pub color: Rgb,
    /// Absorption tint applied over [`attenuation_distance`](Self::attenuation_distance).
    pub attenuation_color: Rgb,
    /// Distance over which the attenuation color saturates; infinite means
    /// no absorption.
    pub attenuation_distance: f64,
}

impl Default for TransmissionMaterial {
    fn default() -> Self {
        Self {
            ior: 1.15,
            thickness: 5.0,
            anisotropy: 0.01,
            chromatic_aberration: 0.1,
            transmission: 1.0,
            roughness: 0.0,
            color: [1.0, 1.0, 1.0],
            attenuation_color: [1.0, 1.0, 1.0],
            attenuation_distance: f64::INFINITY,
        }
    }
}

impl TransmissionMaterial {
    /// The preset used by the bar shape: a thicker, absorbing slab.
    #[must_use]
    pub fn bar() -> Self {
        Self {
            thickness: 10.0,
            attenuation_distance: 0.25,
            ..Self::default()
        }
    }
}
