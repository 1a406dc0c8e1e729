use std::collections::BTreeMap;

use crate::{
    animation::tween::{Property, PropertyValue},
    foundation::color::Rgba,
    foundation::core::ElementId,
};

/// Inline style values written by the engine, keyed by element and property.
///
/// Absent entries mean the element shows its stylesheet value ([`Property::rest_value`]).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct StyleStore {
    elements: BTreeMap<ElementId, BTreeMap<Property, PropertyValue>>,
}

impl StyleStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an inline value.
    pub fn set(&mut self, target: &ElementId, property: Property, value: PropertyValue) {
        self.elements
            .entry(target.clone())
            .or_default()
            .insert(property, value);
    }

    /// Inline value, if one was written.
    pub fn get(&self, target: &ElementId, property: Property) -> Option<PropertyValue> {
        self.elements.get(target)?.get(&property).copied()
    }

    /// Current value, falling back to the property's rest value.
    pub fn resolved(&self, target: &ElementId, property: Property) -> PropertyValue {
        self.get(target, property)
            .unwrap_or_else(|| property.rest_value())
    }

    /// Resolved scalar; 0 for color properties.
    pub fn scalar(&self, target: &ElementId, property: Property) -> f64 {
        self.resolved(target, property)
            .as_scalar()
            .unwrap_or_default()
    }

    /// Inline color, if one was written.
    pub fn color(&self, target: &ElementId, property: Property) -> Option<Rgba> {
        self.get(target, property)?.as_color()
    }

    /// Drop an inline value. Returns `true` when something was removed.
    pub fn clear(&mut self, target: &ElementId, property: Property) -> bool {
        let Some(props) = self.elements.get_mut(target) else {
            return false;
        };
        let removed = props.remove(&property).is_some();
        if props.is_empty() {
            self.elements.remove(target);
        }
        removed
    }

    /// Whether no inline value is set.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of (element, property) pairs with an inline value.
    pub fn len(&self) -> usize {
        self.elements.values().map(BTreeMap::len).sum()
    }
}
