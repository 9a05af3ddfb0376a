// Copyright 2026 the Vitrail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic frame driving and pass recording for tests and demos.
//!
//! [`FrameDriver`] produces synthetic [`FrameTick`]s at a fixed timestep, so
//! frame loops can be stepped reproducibly without a host display.
//! [`PlanRecorder`] is a [`PassExecutor`] that keeps a compact summary of
//! every executed frame for assertions (pass kinds, item counts, and
//! write-before-read auditing).

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use vitrail_core::node::TargetId;
use vitrail_core::time::{Duration, HostTime};
use vitrail_core::timing::FrameTick;
use vitrail_render::{FramePasses, PassExecutor, RenderPass};

/// Produces synthetic ticks at a fixed timestep.
#[derive(Clone, Copy, Debug)]
pub struct FrameDriver {
    step: Duration,
    now: HostTime,
    frame_index: u64,
}

impl FrameDriver {
    /// A driver stepping at 60 Hz.
    #[must_use]
    pub const fn at_60hz() -> Self {
        Self::new(Duration(16_667))
    }

    /// Creates a driver with the given timestep.
    #[must_use]
    pub const fn new(step: Duration) -> Self {
        Self {
            step,
            now: HostTime(0),
            frame_index: 0,
        }
    }

    /// The fixed timestep in seconds.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.step.as_secs_f64()
    }

    /// Returns the next tick and advances the synthetic clock.
    pub fn next_tick(&mut self) -> FrameTick {
        let tick = FrameTick {
            now: self.now,
            frame_index: self.frame_index,
        };
        self.now = self.now + self.step;
        self.frame_index += 1;
        tick
    }
}

/// Kind of a recorded pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Offscreen write pass.
    Offscreen,
    /// Backdrop read pass.
    Backdrop,
    /// Glass shape read pass.
    Shape,
    /// Screen-space overlay pass.
    Overlay,
}

/// Compact summary of one executed pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassSummary {
    /// Pass kind.
    pub kind: PassKind,
    /// Target written by the pass, if any.
    pub writes: Option<TargetId>,
    /// Target sampled by the pass, if any.
    pub reads: Option<TargetId>,
    /// Number of draw items.
    pub items: usize,
}

/// One executed frame.
#[derive(Clone, Debug, Default)]
pub struct FrameRecord {
    /// Frame counter from the pass list.
    pub frame_index: u64,
    /// Pass summaries in execution order.
    pub passes: Vec<PassSummary>,
}

impl FrameRecord {
    /// Whether this frame contained a pass of `kind`.
    #[must_use]
    pub fn has_pass(&self, kind: PassKind) -> bool {
        self.passes.iter().any(|p| p.kind == kind)
    }

    /// Whether every read of `target` in this frame came after a write.
    #[must_use]
    pub fn write_precedes_reads(&self, target: TargetId) -> bool {
        let mut written = false;
        for pass in &self.passes {
            if pass.reads == Some(target) && !written {
                return false;
            }
            if pass.writes == Some(target) {
                written = true;
            }
        }
        true
    }
}

/// A [`PassExecutor`] that records frame summaries instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct PlanRecorder {
    frames: Vec<FrameRecord>,
}

impl PlanRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded frames, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// The most recently executed frame.
    ///
    /// # Panics
    ///
    /// Panics if nothing has been executed yet.
    #[must_use]
    pub fn last(&self) -> &FrameRecord {
        self.frames.last().expect("no frames recorded")
    }

    /// Number of recorded frames in which a pass of `kind` ran.
    #[must_use]
    pub fn frames_with(&self, kind: PassKind) -> usize {
        self.frames.iter().filter(|f| f.has_pass(kind)).count()
    }
}

impl PassExecutor for PlanRecorder {
    fn execute(&mut self, passes: &FramePasses) {
        let summaries = passes
            .passes
            .iter()
            .map(|pass| PassSummary {
                kind: match pass {
                    RenderPass::Offscreen { .. } => PassKind::Offscreen,
                    RenderPass::Backdrop { .. } => PassKind::Backdrop,
                    RenderPass::Shape { .. } => PassKind::Shape,
                    RenderPass::Overlay { .. } => PassKind::Overlay,
                },
                writes: pass.writes(),
                reads: pass.reads(),
                items: pass.item_count(),
            })
            .collect();
        self.frames.push(FrameRecord {
            frame_index: passes.frame_index,
            passes: summaries,
        });
    }
}
