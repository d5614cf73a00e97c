//! The decorator element.
//!
//! [`IconDecorator`] ties the three responsibilities together: the
//! configuration resolver writes variables on attribute changes, the size
//! tracker writes `--badge-width` on resize notifications, and the style
//! engine derives geometry from whatever is currently published.
//!
//! # Lifecycle
//!
//! ```text
//! Unattached ──connect──▶ Rendering ──reveal frame──▶ Ready
//!                             ▲                         │
//!                             └───────re-render─────────┘
//!      Rendering / Ready ──disconnect──▶ Detached ──connect──▶ Rendering
//! ```
//!
//! Rendering is two-phase: the structure is built while the element is
//! hidden, and an animation frame reveals it after the first layout has been
//! scheduled, so there is never a frame showing the unmasked icon.

use std::fmt;

use tracing::{debug, warn};

use crate::config::PlacementConfig;
use crate::error::Result;
use crate::geometry::{ComputedStyle, StyleEngine};
use crate::icon::{IconImage, SizePx};
use crate::layer::{BadgeConfig, CutoutConfig, LayerPipeline, SvgSource};
use crate::layout::{Layout, LayoutInputs, ShadowTree, SlotName, Slotted, compute_layout};
use crate::observer::{ResizeEntry, SizeTracker};
use crate::profile::DecoratorProfile;
use crate::registry::ElementDefinition;
use crate::style::{Attributes, StyleVariables};

/// Tag name under which the element is registered.
pub const ELEMENT_NAME: &str = "icon-decorator";

/// Handle of an element within its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", ELEMENT_NAME, self.0)
    }
}

/// Where the element is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Unattached,
    Rendering,
    Ready,
    Detached,
}

// ============================================================================
// Frame scheduling
// ============================================================================

/// Work deferred to the next animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Show the element built by render pass `render`.
    Reveal { render: u64 },
}

/// Host hook for deferring work to the next display refresh.
pub trait FrameScheduler {
    fn request_animation_frame(&mut self, element: ElementId, request: FrameRequest);
}

impl FrameScheduler for Vec<(ElementId, FrameRequest)> {
    fn request_animation_frame(&mut self, element: ElementId, request: FrameRequest) {
        self.push((element, request));
    }
}

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`DecoratorProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &DecoratorProfile) -> Result<()>;

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> DecoratorProfile;
}

// ============================================================================
// IconDecorator
// ============================================================================

/// An icon with a badge inset at one of its corners.
///
/// # Example
///
/// ```
/// use icon_decorator::{IconDecorator, ElementId, FrameRequest, Lifecycle};
///
/// let mut element = IconDecorator::new(Default::default());
/// element.set_attribute("position", "top-left");
///
/// let mut frames: Vec<(ElementId, FrameRequest)> = Vec::new();
/// element.connected_callback(&mut frames);
/// assert_eq!(element.lifecycle(), Lifecycle::Rendering);
///
/// for (_, request) in frames.drain(..) {
///     element.on_animation_frame(request);
/// }
/// assert_eq!(element.lifecycle(), Lifecycle::Ready);
/// ```
pub struct IconDecorator {
    id: ElementId,
    definition: ElementDefinition,
    lifecycle: Lifecycle,
    attributes: Attributes,
    variables: StyleVariables,
    /// Inline `display: none` during the first render phase.
    hidden: bool,
    icon: Option<Slotted>,
    decorator: Option<Slotted>,
    tree: Option<ShadowTree>,
    next_node: u64,
    render_count: u64,
    tracker: SizeTracker,
    engine: StyleEngine,
    pipeline: LayerPipeline,
}

impl IconDecorator {
    /// Attributes whose changes re-resolve the configuration.
    pub const OBSERVED_ATTRIBUTES: [&'static str; 5] = crate::config::OBSERVED_ATTRIBUTES;

    /// Creates an unattached element with no attributes and empty slots.
    pub fn new(id: ElementId) -> Self {
        Self::from_definition(id, ElementDefinition::icon_decorator())
    }

    /// Creates an unattached element under a registered definition. Only the
    /// attributes the definition observes trigger re-resolution.
    pub fn from_definition(id: ElementId, definition: ElementDefinition) -> Self {
        Self {
            id,
            definition,
            lifecycle: Lifecycle::Unattached,
            attributes: Attributes::new(),
            variables: StyleVariables::new(),
            hidden: false,
            icon: None,
            decorator: None,
            tree: None,
            next_node: 0,
            render_count: 0,
            tracker: SizeTracker::new(),
            engine: StyleEngine::new(),
            pipeline: LayerPipeline::default(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The tag name the element was created under.
    pub fn local_name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &ElementDefinition {
        &self.definition
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn style_variables(&self) -> &StyleVariables {
        &self.variables
    }

    /// True while the element is kept out of layout by the first render phase.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn shadow_tree(&self) -> Option<&ShadowTree> {
        self.tree.as_ref()
    }

    pub fn size_tracker(&self) -> &SizeTracker {
        &self.tracker
    }

    // ------------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------------

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Sets an attribute, notifying the element when an observed one
    /// changes.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let old = self.attributes.set(name, value.as_str());
        if self.definition.observes(name) {
            self.attribute_changed(name, old.as_deref(), Some(&value));
        }
    }

    /// Removes an attribute, notifying the element when an observed one
    /// changes.
    pub fn remove_attribute(&mut self, name: &str) {
        let old = self.attributes.remove(name);
        if self.definition.observes(name) {
            self.attribute_changed(name, old.as_deref(), None);
        }
    }

    /// Reacts to an observed attribute changing from `old` to `new`.
    pub fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        if old == new {
            return;
        }
        debug!(element = %self.id, name, ?old, ?new, "attribute changed");
        self.update_styles();
    }

    /// Resolves the configuration and publishes it.
    pub fn update_styles(&mut self) -> PlacementConfig {
        let config = PlacementConfig::resolve(&self.attributes);
        if config.publish(&mut self.attributes, &mut self.variables) {
            debug!(element = %self.id, position = %config.position, "configuration published");
        }
        config
    }

    // ------------------------------------------------------------------------
    // Slots
    // ------------------------------------------------------------------------

    /// Assigns content to a slot, or clears it with `None`.
    ///
    /// Fails if the markup cannot be parsed; the slot keeps its previous
    /// content in that case.
    pub fn set_slot(&mut self, slot: SlotName, content: Option<SvgSource>) -> Result<()> {
        let slotted = content.map(Slotted::new).transpose()?;
        match slot {
            SlotName::Icon => self.icon = slotted,
            SlotName::Decorator => self.decorator = slotted,
        }
        debug!(element = %self.id, slot = slot.as_str(), "slot content assigned");
        Ok(())
    }

    pub fn set_icon(&mut self, source: impl Into<SvgSource>) -> Result<()> {
        self.set_slot(SlotName::Icon, Some(source.into()))
    }

    pub fn set_decorator(&mut self, source: impl Into<SvgSource>) -> Result<()> {
        self.set_slot(SlotName::Decorator, Some(source.into()))
    }

    pub fn slot(&self, slot: SlotName) -> Option<&Slotted> {
        match slot {
            SlotName::Icon => self.icon.as_ref(),
            SlotName::Decorator => self.decorator.as_ref(),
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// The element was inserted into a document.
    pub fn connected_callback(&mut self, frames: &mut impl FrameScheduler) {
        debug!(element = %self.id, from = ?self.lifecycle, "connected");
        self.lifecycle = Lifecycle::Rendering;
        self.render(frames);
    }

    /// The element was removed from its document. Safe to call repeatedly.
    pub fn disconnected_callback(&mut self) {
        let was_observing = self.tracker.disconnect();
        if self.lifecycle != Lifecycle::Detached {
            debug!(element = %self.id, was_observing, "disconnected");
        }
        self.lifecycle = Lifecycle::Detached;
    }

    /// Rebuilds the internal structure from scratch.
    ///
    /// The element is hidden until the requested animation frame reveals it.
    /// The size tracker is re-pointed at the new badge container.
    pub fn render(&mut self, frames: &mut impl FrameScheduler) {
        self.hidden = true;
        self.tree = Some(ShadowTree::build(&mut self.next_node));
        self.render_count += 1;
        self.pipeline.invalidate_all();
        self.engine.reset();
        if self.lifecycle == Lifecycle::Ready {
            self.lifecycle = Lifecycle::Rendering;
        }

        self.update_styles();
        self.init_size_tracker();

        frames.request_animation_frame(
            self.id,
            FrameRequest::Reveal {
                render: self.render_count,
            },
        );
    }

    /// Points the size tracker at the current badge container.
    pub fn init_size_tracker(&mut self) {
        self.tracker.activate(self.tree.as_ref());
    }

    /// Runs a deferred frame request.
    pub fn on_animation_frame(&mut self, request: FrameRequest) {
        match request {
            FrameRequest::Reveal { render } => {
                self.hidden = false;
                if self.lifecycle == Lifecycle::Rendering && render == self.render_count {
                    self.lifecycle = Lifecycle::Ready;
                    debug!(element = %self.id, render, "revealed");
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Layout and size observation
    // ------------------------------------------------------------------------

    /// Lays out the element with its current content and variables.
    pub fn layout(&self) -> Layout {
        compute_layout(LayoutInputs {
            tree: self.tree.as_ref(),
            hidden: self.hidden || self.lifecycle == Lifecycle::Detached,
            icon: self.icon.as_ref(),
            decorator: self.decorator.as_ref(),
            vars: &self.variables,
        })
    }

    /// Host side of size observation: lays out and reports a changed badge
    /// container size, if any.
    pub fn gather_resize(&mut self) -> Option<ResizeEntry> {
        let layout = self.layout();
        self.tracker.gather(&layout)
    }

    /// Size observation callback.
    pub fn on_resize(&mut self, entries: &[ResizeEntry]) {
        self.tracker.deliver(entries, &mut self.variables);
    }

    // ------------------------------------------------------------------------
    // Style and paint
    // ------------------------------------------------------------------------

    /// The geometry for the current inputs.
    pub fn computed_style(&mut self) -> ComputedStyle {
        let host = self.layout().host;
        self.engine.evaluate(&self.attributes, &self.variables, host)
    }

    /// Paints the composite at `device_scale`.
    ///
    /// Returns `None` while the element is hidden or not connected, when the
    /// host box is empty, when `device_scale` is not a positive finite number,
    /// or when the canvas would exceed [`MAX_CANVAS_SIDE`](crate::MAX_CANVAS_SIDE)
    /// on either side.
    pub fn paint(&mut self, device_scale: f32) -> Option<IconImage> {
        if !matches!(self.lifecycle, Lifecycle::Rendering | Lifecycle::Ready) || self.hidden {
            return None;
        }
        if !(device_scale > 0.0 && device_scale.is_finite()) {
            return None;
        }

        let layout = self.layout();
        if layout.host.is_empty() {
            return None;
        }
        let Some(size) = SizePx::from_scaled(layout.host.width, layout.host.height, device_scale)
        else {
            warn!(
                element = %self.id,
                width = layout.host.width,
                height = layout.host.height,
                device_scale,
                "canvas is too large to paint"
            );
            return None;
        };
        let style = self
            .engine
            .evaluate(&self.attributes, &self.variables, layout.host);

        let cutout = self
            .icon
            .as_ref()
            .map(|icon| CutoutConfig::new(icon.source().clone(), style.mask));
        self.pipeline.cutout.set_config(cutout);

        let badge = self
            .decorator
            .as_ref()
            .zip(layout.badge)
            .map(|(decorator, badge_box)| BadgeConfig {
                source: decorator.source().clone(),
                frame: badge_box.size,
                content: badge_box.content,
                padding: badge_box.padding,
                placement: style.badge,
            });
        self.pipeline.badge.set_config(badge);

        Some(self.pipeline.render(size, device_scale))
    }

    /// Drops all cached paint output.
    pub fn clear_cache(&mut self) {
        self.pipeline.invalidate_all();
    }
}

impl Configurable for IconDecorator {
    /// Sets every attribute the profile carries and removes the others, then
    /// replaces slot content the profile provides.
    fn apply_profile(&mut self, profile: &DecoratorProfile) -> Result<()> {
        for (name, value) in profile.attributes() {
            match value {
                Some(value) => self.set_attribute(name, value),
                None => self.remove_attribute(name),
            }
        }

        if let Some(icon) = &profile.icon {
            self.set_slot(SlotName::Icon, Some(icon.clone().into()))?;
        }
        if let Some(decorator) = &profile.decorator {
            self.set_slot(SlotName::Decorator, Some(decorator.clone().into()))?;
        }
        Ok(())
    }

    fn export_profile(&self) -> DecoratorProfile {
        let mut profile = DecoratorProfile::from_attributes(&self.attributes);
        profile.icon = self.icon.as_ref().map(|s| s.source().into());
        profile.decorator = self.decorator.as_ref().map(|s| s.source().into());
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BADGE_WIDTH, CUTOUT_BORDER, INNER_POSITION_ATTR, OFFSET, SCALE};

    const ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="40"><rect width="40" height="40" fill="#ff0000"/></svg>"##;
    const BADGE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20"><rect width="20" height="20" fill="#0000ff"/></svg>"##;

    type Frames = Vec<(ElementId, FrameRequest)>;

    /// Runs queued frames, then one layout/observation pass.
    fn tick(element: &mut IconDecorator, frames: &mut Frames) {
        for (_, request) in std::mem::take(frames) {
            element.on_animation_frame(request);
        }
        if let Some(entry) = element.gather_resize() {
            element.on_resize(&[entry]);
        }
    }

    fn ready_element() -> (IconDecorator, Frames) {
        let mut element = IconDecorator::new(ElementId(1));
        element.set_icon(ICON).unwrap();
        element.set_decorator(BADGE).unwrap();
        element.set_attribute("decorator-padding", "0px");

        let mut frames = Frames::new();
        element.connected_callback(&mut frames);
        tick(&mut element, &mut frames);
        (element, frames)
    }

    #[test]
    fn connect_renders_hidden_then_reveals() {
        let mut element = IconDecorator::new(ElementId(1));
        element.set_icon(ICON).unwrap();
        assert_eq!(element.lifecycle(), Lifecycle::Unattached);

        let mut frames = Frames::new();
        element.connected_callback(&mut frames);
        assert_eq!(element.lifecycle(), Lifecycle::Rendering);
        assert!(element.is_hidden());
        assert!(element.shadow_tree().is_some());
        assert!(element.size_tracker().is_observing());
        assert!(element.paint(1.0).is_none());
        assert_eq!(frames.len(), 1);

        tick(&mut element, &mut frames);
        assert_eq!(element.lifecycle(), Lifecycle::Ready);
        assert!(!element.is_hidden());
        assert!(element.paint(1.0).is_some());
    }

    #[test]
    fn defaults_are_published_on_render() {
        let mut element = IconDecorator::new(ElementId(1));
        let mut frames = Frames::new();
        element.connected_callback(&mut frames);

        let vars = element.style_variables();
        assert_eq!(vars.inline(OFFSET), Some("3px"));
        assert_eq!(vars.inline(SCALE), Some("0.5"));
        assert_eq!(vars.inline(CUTOUT_BORDER), Some("2px"));
        assert_eq!(element.get_attribute(INNER_POSITION_ATTR), Some("bottom-right"));
    }

    #[test]
    fn badge_width_published_after_reveal() {
        let (element, _) = ready_element();
        assert_eq!(element.style_variables().inline(BADGE_WIDTH), Some("20px"));
    }

    #[test]
    fn attribute_change_updates_without_rebuilding() {
        let (mut element, mut frames) = ready_element();
        let tree = element.shadow_tree().cloned();

        element.set_attribute("position", "top-left");
        assert_eq!(element.get_attribute(INNER_POSITION_ATTR), Some("top-left"));
        assert_eq!(element.shadow_tree().cloned(), tree);
        assert_eq!(element.lifecycle(), Lifecycle::Ready);
        assert!(frames.is_empty());

        let mask = element.computed_style().mask.unwrap();
        assert_eq!((mask.origin.x, mask.origin.y), (17.0, 17.0));

        tick(&mut element, &mut frames);
        assert_eq!(element.shadow_tree().cloned(), tree);
    }

    #[test]
    fn unobserved_attributes_do_not_resolve() {
        let (mut element, _) = ready_element();
        let version = element.style_variables().version();
        element.set_attribute("title", "badge");
        assert_eq!(element.style_variables().version(), version);
    }

    #[test]
    fn removing_an_attribute_restores_its_default() {
        let (mut element, _) = ready_element();
        element.set_attribute("offset", "8px");
        assert_eq!(element.style_variables().inline(OFFSET), Some("8px"));
        element.remove_attribute("offset");
        assert_eq!(element.style_variables().inline(OFFSET), Some("3px"));
    }

    #[test]
    fn geometry_follows_size_changes() {
        let (mut element, mut frames) = ready_element();
        assert_eq!(element.computed_style().hole_radius, Some(7.0));

        element
            .set_decorator(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><rect width="32" height="32"/></svg>"#,
            )
            .unwrap();
        tick(&mut element, &mut frames);

        assert_eq!(element.style_variables().inline(BADGE_WIDTH), Some("32px"));
        assert_eq!(element.computed_style().hole_radius, Some(10.0));
    }

    #[test]
    fn paint_insets_the_badge() {
        let (mut element, _) = ready_element();
        let image = element.paint(1.0).unwrap();
        let data = &image.data;

        assert_eq!(image.dimensions(), SizePx::new(40, 40));
        // Icon away from the corner.
        assert_eq!(data.get_pixel(2, 2).0, [255, 0, 0, 255]);
        // Badge centre sits on the cutout centre (23, 23).
        assert_eq!(data.get_pixel(23, 23).0, [0, 0, 255, 255]);
        // Ring between the scaled badge (radius 5) and the hole (radius 7).
        assert_eq!(data.get_pixel(29, 23).0[3], 0);
        // Outside the hole the icon is intact.
        assert_eq!(data.get_pixel(32, 23).0, [255, 0, 0, 255]);
    }

    #[test]
    fn paint_at_device_scale() {
        let (mut element, _) = ready_element();
        let image = element.paint(2.0).unwrap();
        assert_eq!(image.dimensions(), SizePx::new(80, 80));
        assert_eq!(image.data.get_pixel(46, 46).0, [0, 0, 255, 255]);
        assert_eq!(image.data.get_pixel(58, 46).0[3], 0);
    }

    #[test]
    fn every_corner_centres_badge_in_hole() {
        for (position, x, y) in [
            ("top-left", 17, 17),
            ("top-right", 23, 17),
            ("bottom-left", 17, 23),
            ("bottom-right", 23, 23),
        ] {
            let (mut element, _) = ready_element();
            element.set_attribute("position", position);
            let style = element.computed_style();
            let mask = style.mask.unwrap();
            assert_eq!(style.badge.unwrap().center, mask.origin);

            let image = element.paint(1.0).unwrap();
            assert_eq!(image.data.get_pixel(x, y).0, [0, 0, 255, 255], "{position}");
        }
    }

    #[test]
    fn repaint_reuses_cache_until_inputs_change() {
        let (mut element, _) = ready_element();
        let first = element.paint(1.0).unwrap();
        let version = element.pipeline.cutout.version();
        assert_eq!(element.paint(1.0).unwrap(), first);
        assert_eq!(element.pipeline.cutout.version(), version);

        element.set_attribute("cutout-border", "6px");
        let second = element.paint(1.0).unwrap();
        assert_ne!(second, first);
        assert!(element.pipeline.cutout.version() > version);
    }

    #[test]
    fn malformed_ratio_paints_unmasked() {
        let (mut element, _) = ready_element();
        element.set_attribute("size-ratio", "huge");
        let image = element.paint(1.0).unwrap();
        // No hole: the pixel right of the badge keeps the icon colour.
        assert_eq!(image.data.get_pixel(29, 23).0, [255, 0, 0, 255]);
    }

    #[test]
    fn enormous_ratio_skips_the_badge() {
        let (mut element, _) = ready_element();
        element.set_attribute("size-ratio", "1e30");
        let image = element.paint(1.0).unwrap();
        assert_eq!(image.dimensions(), SizePx::new(40, 40));
        // The hole swallows the whole icon and the badge is too large to draw.
        assert!(image.data.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn enormous_padding_skips_the_badge() {
        let (mut element, mut frames) = ready_element();
        element.set_attribute("decorator-padding", "1e30px");

        let image = element.paint(1.0).unwrap();
        assert_eq!(image.data.get_pixel(2, 2).0, [255, 0, 0, 255]);
        assert_eq!(image.data.get_pixel(23, 23).0[3], 0);

        tick(&mut element, &mut frames);
        let image = element.paint(2.0).unwrap();
        assert_eq!(image.dimensions(), SizePx::new(80, 80));
    }

    #[test]
    fn paint_rejects_non_finite_scales() {
        let (mut element, _) = ready_element();
        assert!(element.paint(f32::INFINITY).is_none());
        assert!(element.paint(f32::NAN).is_none());
        assert!(element.paint(-1.0).is_none());
        assert!(element.paint(0.0).is_none());
        assert!(element.paint(1.0).is_some());
    }

    #[test]
    fn oversized_canvas_is_not_painted() {
        let (mut element, mut frames) = ready_element();
        assert!(element.paint(1e6).is_none());

        element
            .set_icon(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="100000" height="10"><rect width="10" height="10"/></svg>"#,
            )
            .unwrap();
        tick(&mut element, &mut frames);
        assert!(element.paint(1.0).is_none());
    }

    #[test]
    fn detach_twice_is_safe() {
        let (mut element, _) = ready_element();
        element.disconnected_callback();
        assert_eq!(element.lifecycle(), Lifecycle::Detached);
        assert!(!element.size_tracker().is_observing());

        element.disconnected_callback();
        assert_eq!(element.lifecycle(), Lifecycle::Detached);
        assert!(!element.size_tracker().is_observing());
        assert!(element.paint(1.0).is_none());
    }

    #[test]
    fn reattach_rebuilds_and_reobserves() {
        let (mut element, mut frames) = ready_element();
        let old_container = element.shadow_tree().unwrap().badge_container();

        element.disconnected_callback();
        element.connected_callback(&mut frames);
        assert_eq!(element.lifecycle(), Lifecycle::Rendering);

        let new_container = element.shadow_tree().unwrap().badge_container();
        assert_ne!(old_container, new_container);
        assert_eq!(element.size_tracker().target(), Some(new_container));

        tick(&mut element, &mut frames);
        assert_eq!(element.lifecycle(), Lifecycle::Ready);
    }

    #[test]
    fn forced_render_tracks_the_new_container() {
        let (mut element, mut frames) = ready_element();
        let old_container = element.shadow_tree().unwrap().badge_container();

        element.render(&mut frames);
        assert_eq!(element.lifecycle(), Lifecycle::Rendering);
        let new_container = element.shadow_tree().unwrap().badge_container();
        assert_ne!(old_container, new_container);

        // A late notification for the removed container is ignored.
        element.on_resize(&[ResizeEntry {
            target: old_container,
            content_rect: crate::layout::BoxSize::new(99.0, 99.0),
            border_box_size: Vec::new(),
        }]);
        assert_eq!(element.style_variables().inline(BADGE_WIDTH), Some("20px"));

        element.set_decorator(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><rect width="24" height="24"/></svg>"#,
        )
        .unwrap();
        tick(&mut element, &mut frames);
        assert_eq!(element.lifecycle(), Lifecycle::Ready);
        assert_eq!(element.style_variables().inline(BADGE_WIDTH), Some("24px"));
    }

    #[test]
    fn stale_reveal_does_not_finish_a_newer_render() {
        let mut element = IconDecorator::new(ElementId(1));
        let mut frames = Frames::new();
        element.connected_callback(&mut frames);
        element.render(&mut frames);
        assert_eq!(frames.len(), 2);

        element.on_animation_frame(frames[0].1);
        assert_eq!(element.lifecycle(), Lifecycle::Rendering);
        element.on_animation_frame(frames[1].1);
        assert_eq!(element.lifecycle(), Lifecycle::Ready);
    }

    #[test]
    fn invalid_slot_content_is_rejected() {
        let mut element = IconDecorator::new(ElementId(1));
        element.set_icon(ICON).unwrap();
        assert!(element.set_icon("<not-svg").is_err());
        assert!(element.slot(SlotName::Icon).is_some());
    }

    #[test]
    fn profile_round_trip_through_element() {
        let (mut element, _) = ready_element();
        element.set_attribute("position", "top-right");

        let profile = element.export_profile();
        assert_eq!(profile.position.as_deref(), Some("top-right"));
        assert_eq!(profile.decorator_padding.as_deref(), Some("0px"));
        assert!(profile.icon.is_some());

        let mut other = IconDecorator::new(ElementId(2));
        other.apply_profile(&profile).unwrap();
        assert_eq!(other.get_attribute("position"), Some("top-right"));
        assert!(other.slot(SlotName::Decorator).is_some());
    }
}
