// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text run storage.
//!
//! Scene nodes reference text by [`TextId`]; the actual strings and styling
//! live here so node content stays `Copy`. Executors resolve ids against
//! this table when drawing.

use alloc::string::String;
use alloc::vec::Vec;

use vitrail_core::material::Rgb;
use vitrail_core::node::TextId;

/// The scene's accent color (`#5227ff`), used for the clear color and the
/// clicked-label outline.
pub const ACCENT: Rgb = [0.322, 0.153, 1.0];

/// Plain white.
pub const WHITE: Rgb = [1.0, 1.0, 1.0];

/// Outline drawn behind a text run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextOutline {
    /// Outline width in em units.
    pub width: f64,
    /// Outline color.
    pub color: Rgb,
    /// Outline opacity.
    pub opacity: f32,
    /// Blur radius as a fraction of the font size.
    pub blur: f64,
}

/// One styled run of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// The text content; lines are separated by `\n`.
    pub text: String,
    /// Font size in world units.
    pub font_size: f64,
    /// Fill color.
    pub color: Rgb,
    /// Outline, when visible.
    pub outline: Option<TextOutline>,
}

impl TextRun {
    /// Creates a white run with no outline.
    #[must_use]
    pub fn plain(text: String, font_size: f64) -> Self {
        Self {
            text,
            font_size,
            color: WHITE,
            outline: None,
        }
    }
}

/// Table of text runs, indexed by [`TextId`].
#[derive(Clone, Debug, Default)]
pub struct TextTable {
    runs: Vec<TextRun>,
}

impl TextTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a run and returns its id.
    pub fn insert(&mut self, run: TextRun) -> TextId {
        let id = TextId(u32::try_from(self.runs.len()).expect("text count fits in u32"));
        self.runs.push(run);
        id
    }

    /// Returns the run for an id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this table.
    #[must_use]
    pub fn get(&self, id: TextId) -> &TextRun {
        self.runs.get(id.0 as usize).expect("unknown TextId")
    }

    /// Returns the run for an id, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this table.
    pub fn get_mut(&mut self, id: TextId) -> &mut TextRun {
        self.runs.get_mut(id.0 as usize).expect("unknown TextId")
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn insert_and_get() {
        let mut table = TextTable::new();
        let id = table.insert(TextRun::plain("hello".to_string(), 0.4));
        assert_eq!(table.get(id).text, "hello");
        assert_eq!(table.get(id).font_size, 0.4);
        assert!(table.get(id).outline.is_none());
    }

    #[test]
    fn mutation_through_id() {
        let mut table = TextTable::new();
        let id = table.insert(TextRun::plain("hi".to_string(), 0.4));
        table.get_mut(id).font_size = 0.5;
        assert_eq!(table.get(id).font_size, 0.5);
    }

    #[test]
    #[should_panic(expected = "unknown TextId")]
    fn foreign_id_panics() {
        let table = TextTable::new();
        let _ = table.get(TextId(1));
    }
}
