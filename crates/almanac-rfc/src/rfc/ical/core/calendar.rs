//! The calendar root object.

use serde::Serialize;

use super::component::{Component, ComponentKind};
use super::property::{Property, PropertyList};

/// A parsed or constructed iCalendar object.
///
/// The `VCALENDAR` wrapper is implicit: `properties` are the calendar-level
/// properties and `components` the top-level children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Calendar {
    pub properties: Vec<Property>,
    pub components: Vec<Component>,
}

impl Calendar {
    /// Creates a calendar with no properties or components.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a top-level component and returns a reference to it.
    pub fn add_component(&mut self, component: Component) -> &mut Component {
        let index = self.components.len();
        self.components.push(component);
        &mut self.components[index]
    }

    /// Iterates top-level components of the given kind.
    pub fn components_of(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.is(kind))
    }

    pub fn components_of_mut(
        &mut self,
        kind: ComponentKind,
    ) -> impl Iterator<Item = &mut Component> {
        self.components.iter_mut().filter(move |c| c.is(kind))
    }

    /// Removes top-level components matching `predicate`, returning them.
    pub fn remove_components_if<F>(&mut self, predicate: F) -> Vec<Component>
    where
        F: FnMut(&Component) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.components).into_iter().partition(predicate);
        self.components = kept;
        removed
    }
}

impl PropertyList for Calendar {
    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Vec<Property> {
        &mut self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_filter_by_kind() {
        let mut cal = Calendar::empty();
        cal.add_component(Component::event());
        cal.add_component(Component::todo());
        cal.add_component(Component::event());

        assert_eq!(cal.components_of(ComponentKind::Event).count(), 2);
        assert_eq!(cal.components_of(ComponentKind::Todo).count(), 1);
        assert_eq!(cal.components_of(ComponentKind::Journal).count(), 0);
    }

    #[test]
    fn remove_components_if_returns_removed() {
        let mut cal = Calendar::empty();
        cal.add_component(Component::event());
        cal.add_component(Component::todo());

        let removed = cal.remove_components_if(|c| c.is(ComponentKind::Todo));
        assert_eq!(removed.len(), 1);
        assert_eq!(cal.components.len(), 1);
    }

    #[test]
    fn calendar_properties_use_shared_accessors() {
        let mut cal = Calendar::empty();
        cal.set_property(Property::new("VERSION", "2.0"));
        cal.set_property(Property::new("VERSION", "2.1"));
        assert_eq!(cal.properties.len(), 1);
        assert_eq!(cal.property_value("VERSION"), Some("2.1"));
    }
}
