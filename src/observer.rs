//! Size tracking for the badge container.
//!
//! [`SizeTracker`] owns the element's single size observation. The host side
//! ([`SizeTracker::gather`]) compares each layout against the last reported
//! size and produces [`ResizeEntry`] values; the element side
//! ([`SizeTracker::deliver`]) turns entries into the published
//! `--badge-width` variable.
//!
//! The observation is always disconnected before a new one is created, and
//! entries for any target other than the current one are ignored, so a
//! replaced badge container can never publish a width.

use tracing::debug;

use crate::layout::{BoxSize, Layout, NodeId, ShadowTree};
use crate::length::format_px;
use crate::style::{BADGE_WIDTH, StyleVariables};

/// One fragment size as reported by an observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeObserverSize {
    pub inline_size: f32,
    pub block_size: f32,
}

/// A size change of an observed node.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeEntry {
    pub target: NodeId,
    pub content_rect: BoxSize,
    /// Border box per fragment; may be empty when the host cannot report it.
    pub border_box_size: Vec<ResizeObserverSize>,
}

impl ResizeEntry {
    /// The width to publish: the first border-box inline size when present
    /// and non-zero, otherwise the content-rect width.
    pub fn measured_width(&self) -> f32 {
        self.border_box_size
            .first()
            .map(|size| size.inline_size)
            .filter(|width| *width != 0.0)
            .unwrap_or(self.content_rect.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Observation {
    target: NodeId,
    last_reported: BoxSize,
}

/// The element's size observer.
#[derive(Debug, Default)]
pub struct SizeTracker {
    observation: Option<Observation>,
}

impl SizeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops any previous observation and starts observing the badge
    /// container of `tree`.
    ///
    /// Does nothing beyond the disconnect when there is no tree.
    pub fn activate(&mut self, tree: Option<&ShadowTree>) -> Option<NodeId> {
        self.disconnect();

        let Some(target) = tree.map(ShadowTree::badge_container) else {
            debug!("no shadow tree; size tracking idle");
            return None;
        };

        self.observation = Some(Observation {
            target,
            last_reported: BoxSize::ZERO,
        });
        debug!(node = %target, "observing badge container");
        Some(target)
    }

    /// Stops observing. Safe to call when nothing is observed.
    ///
    /// Returns true if an observation was active.
    pub fn disconnect(&mut self) -> bool {
        match self.observation.take() {
            Some(observation) => {
                debug!(node = %observation.target, "size observation disconnected");
                true
            }
            None => false,
        }
    }

    pub fn is_observing(&self) -> bool {
        self.observation.is_some()
    }

    /// The currently observed node.
    pub fn target(&self) -> Option<NodeId> {
        self.observation.map(|o| o.target)
    }

    /// Compares `layout` with the last reported size of the observed node.
    ///
    /// Produces an entry only when the size changed. A node without a box
    /// counts as 0x0.
    pub fn gather(&mut self, layout: &Layout) -> Option<ResizeEntry> {
        let observation = self.observation.as_mut()?;

        let size = layout
            .badge
            .filter(|badge| badge.node == observation.target)
            .map(|badge| badge.size)
            .unwrap_or(BoxSize::ZERO);

        if size == observation.last_reported {
            return None;
        }
        observation.last_reported = size;

        Some(ResizeEntry {
            target: observation.target,
            content_rect: size,
            border_box_size: vec![ResizeObserverSize {
                inline_size: size.width,
                block_size: size.height,
            }],
        })
    }

    /// Publishes the width of every entry for the observed node.
    ///
    /// Returns true if the published value changed.
    pub fn deliver(&self, entries: &[ResizeEntry], vars: &mut StyleVariables) -> bool {
        let Some(observation) = self.observation else {
            return false;
        };

        let mut changed = false;
        for entry in entries.iter().filter(|e| e.target == observation.target) {
            let width = entry.measured_width();
            changed |= vars.set_property(BADGE_WIDTH, format_px(width));
            debug!(node = %entry.target, width, "badge width published");
        }
        changed
    }
}
