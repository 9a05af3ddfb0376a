// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Executor contract for engine integrations.
//!
//! Vitrail splits engine-specific work out of the core crates. An
//! integration provides the following pieces:
//!
//! - **Tick source** — Produces [`FrameTick`] values via a host mechanism
//!   (e.g. `requestAnimationFrame`). This is host-specific and not
//!   abstracted by a trait because setup and lifecycle differ fundamentally
//!   across hosts.
//!
//! - **Input sources** — Maintain the per-frame [`FrameInputs`] snapshot
//!   from pointer, resize, and scroll events.
//!
//! - **Executor** — Implements the [`PassExecutor`] trait to run one frame's
//!   ordered pass list against a real renderer: allocate the offscreen
//!   targets named by [`TargetId`]s, resolve content ids against the
//!   composition layer's tables, and map
//!   [`TransmissionMaterial`](vitrail_core::material::TransmissionMaterial)
//!   onto the engine's refraction shader.
//!
//! - **Side effects** — Apply the scene's
//!   [`CursorStyle`](vitrail_core::timing::CursorStyle) and forward
//!   [`ScrollCommand`](vitrail_core::scroll::ScrollCommand)s to the host
//!   scroll surface.
//!
//! [`FrameTick`]: vitrail_core::timing::FrameTick
//! [`FrameInputs`]: vitrail_core::timing::FrameInputs
//! [`TargetId`]: vitrail_core::node::TargetId

use crate::plan::FramePasses;

/// Executes one frame's ordered pass list against a real renderer.
///
/// Both GPU-backed executors and test doubles implement this trait, enabling
/// generic frame loops.
///
/// # Frame loop pseudocode
///
/// A typical frame callback wires the pieces together like this:
///
/// ```rust,ignore
/// fn on_frame(tick: FrameTick) {
///     let dt = clock.tick(tick.now);
///     let inputs = input_collector.snapshot();
///
///     // Advance: damp scroll/follow state, update interaction flags,
///     // evaluate the scene, and rebuild the pass list.
///     let outputs = scene.advance(&tick, &inputs, dt);
///
///     // Execute: run the passes on the engine.
///     executor.execute(scene.passes());
///
///     // Side effects: cursor style and any scroll command.
///     apply_cursor(outputs.cursor);
///     if let Some(cmd) = outputs.scroll {
///         apply_scroll_command(&scroll_element, cmd);
///     }
/// }
/// ```
pub trait PassExecutor {
    /// Runs the given passes, in order, for one frame.
    fn execute(&mut self, passes: &FramePasses);
}
