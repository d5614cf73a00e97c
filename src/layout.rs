//! Internal structure and box layout of the decorator element.
//!
//! A render pass builds a [`ShadowTree`] with two nodes: the icon wrapper
//! (which carries the cutout mask) and the badge container (which carries the
//! corner transform and is the size tracker's target). Slotted content is
//! owned by the host and survives re-renders; the tree does not.

use std::fmt;

use crate::error::Result;
use crate::geometry::decorator_padding;
use crate::layer::svg::{SvgSource, intrinsic_size};
use crate::style::StyleVariables;

/// A size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

impl BoxSize {
    pub const ZERO: BoxSize = BoxSize {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Identity of a node in a shadow tree. Never reused within one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Slots
// ============================================================================

/// The two insertion points of the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotName {
    Icon,
    Decorator,
}

impl SlotName {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotName::Icon => "icon",
            SlotName::Decorator => "decorator",
        }
    }
}

/// Content assigned to a slot, measured once when assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Slotted {
    source: SvgSource,
    intrinsic: BoxSize,
}

impl Slotted {
    /// Parses the source to learn its intrinsic size.
    pub fn new(source: impl Into<SvgSource>) -> Result<Self> {
        let source = source.into();
        let (width, height) = intrinsic_size(&source)?;
        Ok(Self {
            source,
            intrinsic: BoxSize::new(width, height),
        })
    }

    pub fn source(&self) -> &SvgSource {
        &self.source
    }

    pub fn intrinsic(&self) -> BoxSize {
        self.intrinsic
    }
}

// ============================================================================
// ShadowTree
// ============================================================================

/// Nodes created by one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowTree {
    icon_wrapper: NodeId,
    badge_container: NodeId,
}

impl ShadowTree {
    /// Builds a fresh tree, drawing node ids from `next_id`.
    pub fn build(next_id: &mut u64) -> Self {
        let mut allocate = || {
            *next_id += 1;
            NodeId(*next_id)
        };
        let icon_wrapper = allocate();
        let badge_container = allocate();
        Self {
            icon_wrapper,
            badge_container,
        }
    }

    pub fn icon_wrapper(&self) -> NodeId {
        self.icon_wrapper
    }

    pub fn badge_container(&self) -> NodeId {
        self.badge_container
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Box of the badge container and the decorator frame inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeBox {
    pub node: NodeId,
    /// Border box of the container (equal to its content box).
    pub size: BoxSize,
    /// Size of the decorator content inside the padded frame.
    pub content: BoxSize,
    pub padding: f32,
}

/// Result of laying out one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// Host box; identical to the icon wrapper box.
    pub host: BoxSize,
    /// `None` when the element has no structure or is hidden.
    pub badge: Option<BadgeBox>,
}

/// Slot contents and state read by [`compute_layout`].
#[derive(Debug, Clone, Copy)]
pub struct LayoutInputs<'a> {
    pub tree: Option<&'a ShadowTree>,
    pub hidden: bool,
    pub icon: Option<&'a Slotted>,
    pub decorator: Option<&'a Slotted>,
    pub vars: &'a StyleVariables,
}

/// Lays out the host, icon wrapper and badge container.
///
/// A hidden element or one without structure has no boxes at all.
pub fn compute_layout(inputs: LayoutInputs<'_>) -> Layout {
    let Some(tree) = inputs.tree else {
        return Layout::default();
    };
    if inputs.hidden {
        return Layout::default();
    }

    let host = inputs.icon.map(Slotted::intrinsic).unwrap_or(BoxSize::ZERO);

    let (frame, content, padding) = match inputs.decorator {
        Some(decorator) => {
            let padding = decorator_padding(inputs.vars);
            let content = decorator.intrinsic();
            let frame = BoxSize::new(
                content.width + 2.0 * padding,
                content.height + 2.0 * padding,
            );
            (frame, content, padding)
        }
        None => (BoxSize::ZERO, BoxSize::ZERO, 0.0),
    };

    let badge = BadgeBox {
        node: tree.badge_container(),
        // `min-width: 1px` on the container
        size: BoxSize::new(frame.width.max(1.0), frame.height),
        content,
        padding,
    };

    Layout {
        host,
        badge: Some(badge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::DECORATOR_PADDING;

    const ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="40"><rect width="48" height="40"/></svg>"#;
    const BADGE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20"><rect width="20" height="20"/></svg>"#;

    fn inputs<'a>(
        tree: Option<&'a ShadowTree>,
        icon: Option<&'a Slotted>,
        decorator: Option<&'a Slotted>,
        vars: &'a StyleVariables,
    ) -> LayoutInputs<'a> {
        LayoutInputs {
            tree,
            hidden: false,
            icon,
            decorator,
            vars,
        }
    }

    #[test]
    fn node_ids_are_never_reused() {
        let mut next = 0;
        let first = ShadowTree::build(&mut next);
        let second = ShadowTree::build(&mut next);
        assert_ne!(first.badge_container(), second.badge_container());
        assert_ne!(first.icon_wrapper(), second.icon_wrapper());
    }

    #[test]
    fn host_takes_the_icon_size() {
        let mut next = 0;
        let tree = ShadowTree::build(&mut next);
        let icon = Slotted::new(ICON).unwrap();
        let vars = StyleVariables::new();

        let layout = compute_layout(inputs(Some(&tree), Some(&icon), None, &vars));
        assert_eq!(layout.host, BoxSize::new(48.0, 40.0));
    }

    #[test]
    fn badge_box_includes_padding() {
        let mut next = 0;
        let tree = ShadowTree::build(&mut next);
        let badge = Slotted::new(BADGE).unwrap();
        let mut vars = StyleVariables::new();
        vars.set_property(DECORATOR_PADDING, "3px");

        let layout = compute_layout(inputs(Some(&tree), None, Some(&badge), &vars));
        let badge_box = layout.badge.unwrap();
        assert_eq!(badge_box.node, tree.badge_container());
        assert_eq!(badge_box.size, BoxSize::new(26.0, 26.0));
        assert_eq!(badge_box.content, BoxSize::new(20.0, 20.0));
        assert_eq!(badge_box.padding, 3.0);
    }

    #[test]
    fn empty_decorator_slot_keeps_min_width() {
        let mut next = 0;
        let tree = ShadowTree::build(&mut next);
        let vars = StyleVariables::new();

        let layout = compute_layout(inputs(Some(&tree), None, None, &vars));
        assert_eq!(layout.host, BoxSize::ZERO);
        assert_eq!(layout.badge.unwrap().size, BoxSize::new(1.0, 0.0));
    }

    #[test]
    fn hidden_or_unbuilt_elements_have_no_boxes() {
        let mut next = 0;
        let tree = ShadowTree::build(&mut next);
        let icon = Slotted::new(ICON).unwrap();
        let vars = StyleVariables::new();

        let mut hidden = inputs(Some(&tree), Some(&icon), None, &vars);
        hidden.hidden = true;
        assert_eq!(compute_layout(hidden), Layout::default());

        let unbuilt = inputs(None, Some(&icon), None, &vars);
        assert_eq!(compute_layout(unbuilt), Layout::default());
    }
}
