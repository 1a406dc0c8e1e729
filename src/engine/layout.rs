use std::collections::BTreeMap;

use crate::{
    animation::tween::Measure,
    foundation::core::{ElementBox, ElementId, Viewport},
};

/// Read access to measured element boxes.
pub trait LayoutSource {
    /// Box of `id`, if laid out.
    fn element(&self, id: &ElementId) -> Option<ElementBox>;

    /// Current viewport.
    fn viewport(&self) -> Viewport;

    /// Whether `id` is laid out.
    fn contains(&self, id: &ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Evaluate a layout-dependent quantity; `None` when its element is absent.
    fn measure(&self, measure: &Measure) -> Option<f64> {
        match measure {
            Measure::TrackOverflow(id) => self
                .element(id)
                .map(|b| (b.scroll_width - self.viewport().width).max(0.0)),
        }
    }
}

/// In-memory element table in document coordinates.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Document {
    viewport: Viewport,
    elements: BTreeMap<ElementId, ElementBox>,
    height: f64,
}

impl Document {
    /// Empty document for `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            elements: BTreeMap::new(),
            height: 0.0,
        }
    }

    /// Add or replace an element; the document grows to contain it.
    pub fn insert(&mut self, id: impl Into<ElementId>, bx: ElementBox) {
        self.height = self.height.max(bx.bottom());
        self.elements.insert(id.into(), bx);
    }

    /// Take an element out. The natural height is left unchanged.
    pub fn remove(&mut self, id: &ElementId) -> Option<ElementBox> {
        self.elements.remove(id)
    }

    /// Update an element's horizontal content width. Returns `false` if absent.
    pub fn set_scroll_width(&mut self, id: &ElementId, scroll_width: f64) -> bool {
        match self.elements.get_mut(id) {
            Some(bx) => {
                *bx = ElementBox::with_scroll_width(bx.rect, scroll_width);
                true
            }
            None => false,
        }
    }

    /// Natural document height, before any pin spacing.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of laid-out elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing is laid out.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl LayoutSource for Document {
    fn element(&self, id: &ElementId) -> Option<ElementBox> {
        self.elements.get(id).copied()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
