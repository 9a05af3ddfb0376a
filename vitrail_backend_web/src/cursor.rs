// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor-style side effect.
//!
//! The scene's only DOM output besides pixels: while an interactive label is
//! hovered the body cursor becomes a pointer, and reverts when it is not.
//! Styles are applied only on change to avoid touching the DOM every frame.

use wasm_bindgen::JsValue;
use web_sys::Document;

use vitrail_core::timing::CursorStyle;

/// Applies [`CursorStyle`]s to the document body, deduplicating writes.
#[derive(Debug)]
pub struct CursorApplier {
    document: Document,
    current: Option<CursorStyle>,
}

impl CursorApplier {
    /// Creates an applier for `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            current: None,
        }
    }

    /// Sets the body cursor if `style` differs from the last applied one.
    ///
    /// # Errors
    ///
    /// Propagates DOM failures from setting the style property.
    pub fn apply(&mut self, style: CursorStyle) -> Result<(), JsValue> {
        if self.current == Some(style) {
            return Ok(());
        }
        if let Some(body) = self.document.body() {
            body.style().set_property("cursor", style.as_css())?;
            self.current = Some(style);
        }
        Ok(())
    }
}
