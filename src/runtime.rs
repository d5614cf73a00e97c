//! A minimal single-threaded document hosting decorator elements.
//!
//! [`Document`] owns the elements, delivers their lifecycle callbacks and
//! drives the frame loop. Each call to [`Document::run_frame`] performs, in
//! order:
//!
//! 1. the animation-frame callbacks requested before the frame started,
//! 2. layout of every connected element,
//! 3. gathering and delivery of size observations, each to its own element.
//!
//! Painting is separate and can happen at any time after a frame.

use tracing::{debug, trace};

use crate::component::{ElementId, FrameRequest, FrameScheduler, IconDecorator, Lifecycle};
use crate::error::{DecoratorError, Result};
use crate::icon::IconImage;
use crate::layer::SvgSource;
use crate::layout::SlotName;
use crate::registry::ElementRegistry;

/// Animation-frame callbacks waiting for the next frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Vec<(ElementId, FrameRequest)>,
}

impl FrameQueue {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn take(&mut self) -> Vec<(ElementId, FrameRequest)> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_animation_frame(&mut self, element: ElementId, request: FrameRequest) {
        trace!(%element, ?request, "animation frame requested");
        self.pending.push((element, request));
    }
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Animation-frame callbacks run.
    pub callbacks: usize,
    /// Resize entries delivered.
    pub resize_entries: usize,
}

impl FrameStats {
    /// True if the frame had nothing to do.
    pub fn is_idle(&self) -> bool {
        self.callbacks == 0 && self.resize_entries == 0
    }
}

/// Owner of elements, their registry and the frame loop.
pub struct Document {
    registry: ElementRegistry,
    elements: Vec<IconDecorator>,
    frames: FrameQueue,
    frame_number: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document with the decorator element defined.
    pub fn new() -> Self {
        Self {
            registry: ElementRegistry::with_icon_decorator(),
            elements: Vec::new(),
            frames: FrameQueue::default(),
            frame_number: 0,
        }
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    /// Number of frames run so far.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn pending_frames(&self) -> &FrameQueue {
        &self.frames
    }

    // ------------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------------

    /// Creates an unattached element of a defined name.
    pub fn create_element(&mut self, name: &str) -> Result<ElementId> {
        let definition = self
            .registry
            .get(name)
            .ok_or_else(|| DecoratorError::UndefinedElement(name.to_string()))?
            .clone();
        let id = ElementId(self.elements.len());
        self.elements.push(IconDecorator::from_definition(id, definition));
        debug!(element = %id, "element created");
        Ok(id)
    }

    pub fn element(&self, id: ElementId) -> Result<&IconDecorator> {
        self.elements
            .get(id.0)
            .ok_or(DecoratorError::UnknownElement(id.0))
    }

    pub fn element_mut(&mut self, id: ElementId) -> Result<&mut IconDecorator> {
        self.elements
            .get_mut(id.0)
            .ok_or(DecoratorError::UnknownElement(id.0))
    }

    pub fn is_connected(&self, id: ElementId) -> bool {
        self.element(id).is_ok_and(|element| {
            matches!(
                element.lifecycle(),
                Lifecycle::Rendering | Lifecycle::Ready
            )
        })
    }

    /// Inserts an element into the document.
    ///
    /// Appending an element that is already connected moves it: it is
    /// disconnected and connected again.
    pub fn append(&mut self, id: ElementId) -> Result<()> {
        let connected = self.is_connected(id);
        let element = self
            .elements
            .get_mut(id.0)
            .ok_or(DecoratorError::UnknownElement(id.0))?;
        if connected {
            element.disconnected_callback();
        }
        element.connected_callback(&mut self.frames);
        Ok(())
    }

    /// Removes an element from the document. Removing an element that is not
    /// connected does nothing.
    pub fn remove(&mut self, id: ElementId) -> Result<()> {
        if self.is_connected(id) {
            self.element_mut(id)?.disconnected_callback();
        } else {
            self.element(id)?;
        }
        Ok(())
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> Result<()> {
        self.element_mut(id)?.set_attribute(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Result<()> {
        self.element_mut(id)?.remove_attribute(name);
        Ok(())
    }

    pub fn set_slot(
        &mut self,
        id: ElementId,
        slot: SlotName,
        content: Option<SvgSource>,
    ) -> Result<()> {
        self.element_mut(id)?.set_slot(slot, content)
    }

    /// Rebuilds an element's internal structure.
    pub fn force_render(&mut self, id: ElementId) -> Result<()> {
        let element = self
            .elements
            .get_mut(id.0)
            .ok_or(DecoratorError::UnknownElement(id.0))?;
        element.render(&mut self.frames);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------------

    /// Runs one frame.
    pub fn run_frame(&mut self) -> FrameStats {
        self.frame_number += 1;
        let mut stats = FrameStats::default();

        for (id, request) in self.frames.take() {
            if let Some(element) = self.elements.get_mut(id.0) {
                element.on_animation_frame(request);
                stats.callbacks += 1;
            }
        }

        for element in &mut self.elements {
            if !matches!(element.lifecycle(), Lifecycle::Rendering | Lifecycle::Ready) {
                continue;
            }
            if let Some(entry) = element.gather_resize() {
                element.on_resize(std::slice::from_ref(&entry));
                stats.resize_entries += 1;
            }
        }

        trace!(frame = self.frame_number, ?stats, "frame complete");
        stats
    }

    /// Runs frames until one does nothing, at most `max_frames`.
    ///
    /// Returns the number of frames run.
    pub fn run_until_idle(&mut self, max_frames: usize) -> usize {
        for ran in 1..=max_frames {
            if self.run_frame().is_idle() {
                return ran;
            }
        }
        max_frames
    }

    /// Paints an element at `device_scale`.
    pub fn paint(&mut self, id: ElementId, device_scale: f32) -> Result<Option<IconImage>> {
        Ok(self.element_mut(id)?.paint(device_scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ElementDefinition;
    use crate::style::{BADGE_WIDTH, INNER_POSITION_ATTR};

    const ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="40"><rect width="40" height="40" fill="#ff0000"/></svg>"##;
    const BADGE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20"><rect width="20" height="20" fill="#0000ff"/></svg>"##;

    fn decorated(document: &mut Document) -> ElementId {
        let id = document.create_element("icon-decorator").unwrap();
        document
            .set_slot(id, SlotName::Icon, Some(ICON.into()))
            .unwrap();
        document
            .set_slot(id, SlotName::Decorator, Some(BADGE.into()))
            .unwrap();
        id
    }

    fn badge_width(document: &Document, id: ElementId) -> Option<String> {
        document
            .element(id)
            .unwrap()
            .style_variables()
            .inline(BADGE_WIDTH)
            .map(str::to_string)
    }

    #[test]
    fn undefined_elements_cannot_be_created() {
        let mut document = Document::new();
        let err = document.create_element("badge-icon").unwrap_err();
        assert!(matches!(err, DecoratorError::UndefinedElement(name) if name == "badge-icon"));
    }

    #[test]
    fn elements_follow_their_definition() {
        let mut document = Document::new();
        let definition = ElementDefinition {
            name: "x-badge".to_string(),
            observed_attributes: vec!["foo".to_string()],
        };
        document
            .registry_mut()
            .define("x-badge", definition.clone())
            .unwrap();

        let id = document.create_element("x-badge").unwrap();
        assert_eq!(document.element(id).unwrap().local_name(), "x-badge");
        assert_eq!(document.element(id).unwrap().definition(), &definition);

        document.set_attribute(id, "position", "top-left").unwrap();
        assert_eq!(
            document.element(id).unwrap().get_attribute(INNER_POSITION_ATTR),
            None
        );

        document.set_attribute(id, "foo", "1").unwrap();
        assert_eq!(
            document.element(id).unwrap().get_attribute(INNER_POSITION_ATTR),
            Some("top-left")
        );
    }

    #[test]
    fn decorator_is_defined_once() {
        let mut document = Document::new();
        assert!(document.registry().is_defined("icon-decorator"));
        assert!(matches!(
            document.registry_mut().define_icon_decorator(),
            Err(DecoratorError::AlreadyDefined(_))
        ));
    }

    #[test]
    fn first_frame_reveals_and_publishes_width() {
        let mut document = Document::new();
        let id = decorated(&mut document);
        document.append(id).unwrap();
        assert_eq!(document.pending_frames().len(), 1);
        assert_eq!(badge_width(&document, id), None);

        let stats = document.run_frame();
        assert_eq!(stats.callbacks, 1);
        assert_eq!(stats.resize_entries, 1);
        assert_eq!(document.element(id).unwrap().lifecycle(), Lifecycle::Ready);
        // Default padding 3px on each side of the 20px decorator.
        assert_eq!(badge_width(&document, id).as_deref(), Some("26px"));

        assert!(document.run_frame().is_idle());
    }

    #[test]
    fn elements_are_observed_independently() {
        let mut document = Document::new();
        let first = decorated(&mut document);
        let second = decorated(&mut document);
        document
            .set_attribute(second, "decorator-padding", "5px")
            .unwrap();

        document.append(first).unwrap();
        document.append(second).unwrap();
        document.run_frame();

        assert_eq!(badge_width(&document, first).as_deref(), Some("26px"));
        assert_eq!(badge_width(&document, second).as_deref(), Some("30px"));
    }

    #[test]
    fn padding_change_is_observed_next_frame() {
        let mut document = Document::new();
        let id = decorated(&mut document);
        document.append(id).unwrap();
        document.run_frame();

        document.set_attribute(id, "decorator-padding", "0").unwrap();
        let stats = document.run_frame();
        assert_eq!(stats.resize_entries, 1);
        assert_eq!(badge_width(&document, id).as_deref(), Some("20px"));
    }

    #[test]
    fn removed_elements_stop_observing() {
        let mut document = Document::new();
        let id = decorated(&mut document);
        document.append(id).unwrap();
        document.run_frame();

        document.remove(id).unwrap();
        document.remove(id).unwrap();
        assert!(!document.is_connected(id));

        document.set_slot(id, SlotName::Decorator, None).unwrap();
        assert!(document.run_frame().is_idle());
        assert_eq!(badge_width(&document, id).as_deref(), Some("26px"));
        assert!(document.paint(id, 1.0).unwrap().is_none());
    }

    #[test]
    fn reappend_renders_again() {
        let mut document = Document::new();
        let id = decorated(&mut document);
        document.append(id).unwrap();
        document.run_frame();
        let tree = document.element(id).unwrap().shadow_tree().cloned();

        document.append(id).unwrap();
        assert_eq!(
            document.element(id).unwrap().lifecycle(),
            Lifecycle::Rendering
        );
        assert_ne!(document.element(id).unwrap().shadow_tree().cloned(), tree);

        document.run_until_idle(4);
        assert_eq!(document.element(id).unwrap().lifecycle(), Lifecycle::Ready);
        assert_eq!(badge_width(&document, id).as_deref(), Some("26px"));
    }

    #[test]
    fn run_until_idle_settles() {
        let mut document = Document::new();
        let id = decorated(&mut document);
        document.append(id).unwrap();

        // One busy frame, then an idle one.
        assert_eq!(document.run_until_idle(10), 2);
        assert_eq!(document.frame_number(), 2);
        assert!(document.pending_frames().is_empty());
    }

    #[test]
    fn paint_after_first_frame() {
        let mut document = Document::new();
        let id = decorated(&mut document);
        document.append(id).unwrap();
        assert!(document.paint(id, 1.0).unwrap().is_none());

        document.run_frame();
        let image = document.paint(id, 1.0).unwrap().unwrap();
        assert_eq!(image.data.dimensions(), (40, 40));
        assert_eq!(image.data.get_pixel(23, 23).0, [0, 0, 255, 255]);
        assert_eq!(image.data.get_pixel(2, 2).0, [255, 0, 0, 255]);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut document = Document::new();
        let stray = ElementId(7);
        assert!(matches!(
            document.append(stray),
            Err(DecoratorError::UnknownElement(7))
        ));
        assert!(document.remove(stray).is_err());
        assert!(document.paint(stray, 1.0).is_err());
    }
}
