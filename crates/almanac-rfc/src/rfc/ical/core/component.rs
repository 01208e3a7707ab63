//! iCalendar component types (RFC 5545 §3.6).

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::names::component as names;
use super::property::{Property, PropertyList};

/// Known component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VEVENT component.
    Event,
    /// VTODO component.
    Todo,
    /// VJOURNAL component.
    Journal,
    /// VFREEBUSY component.
    FreeBusy,
    /// VTIMEZONE component.
    Timezone,
    /// VALARM component (nested within VEVENT/VTODO).
    Alarm,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => names::VEVENT,
            Self::Todo => names::VTODO,
            Self::Journal => names::VJOURNAL,
            Self::FreeBusy => names::VFREEBUSY,
            Self::Timezone => names::VTIMEZONE,
            Self::Alarm => names::VALARM,
            Self::Standard => names::STANDARD,
            Self::Daylight => names::DAYLIGHT,
        }
    }

    /// Parses a known component token (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        [
            Self::Event,
            Self::Todo,
            Self::Journal,
            Self::FreeBusy,
            Self::Timezone,
            Self::Alarm,
            Self::Standard,
            Self::Daylight,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Properties and sub-components owned by one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentBody {
    /// Properties in order of appearance.
    pub properties: Vec<Property>,
    /// Nested sub-components.
    pub children: Vec<Component>,
}

/// An iCalendar component.
///
/// For example, a VEVENT may contain VALARMs. Tokens that are not a known
/// kind are kept verbatim in [`Component::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Event(ComponentBody),
    Todo(ComponentBody),
    Journal(ComponentBody),
    FreeBusy(ComponentBody),
    Timezone(ComponentBody),
    Alarm(ComponentBody),
    Standard(ComponentBody),
    Daylight(ComponentBody),
    Other(String, ComponentBody),
}

impl Component {
    /// Creates an empty component of a known kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self::with_body(kind, ComponentBody::default())
    }

    #[must_use]
    pub fn with_body(kind: ComponentKind, body: ComponentBody) -> Self {
        match kind {
            ComponentKind::Event => Self::Event(body),
            ComponentKind::Todo => Self::Todo(body),
            ComponentKind::Journal => Self::Journal(body),
            ComponentKind::FreeBusy => Self::FreeBusy(body),
            ComponentKind::Timezone => Self::Timezone(body),
            ComponentKind::Alarm => Self::Alarm(body),
            ComponentKind::Standard => Self::Standard(body),
            ComponentKind::Daylight => Self::Daylight(body),
        }
    }

    /// Creates an empty component from a `BEGIN` token, mapping known kinds.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match ComponentKind::parse(token) {
            Some(kind) => Self::new(kind),
            None => Self::Other(token.to_string(), ComponentBody::default()),
        }
    }

    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    #[must_use]
    pub fn todo() -> Self {
        Self::new(ComponentKind::Todo)
    }

    #[must_use]
    pub fn journal() -> Self {
        Self::new(ComponentKind::Journal)
    }

    #[must_use]
    pub fn alarm() -> Self {
        Self::new(ComponentKind::Alarm)
    }

    #[must_use]
    pub fn timezone() -> Self {
        Self::new(ComponentKind::Timezone)
    }

    /// Returns the kind, or `None` for an unrecognized token.
    #[must_use]
    pub fn kind(&self) -> Option<ComponentKind> {
        match self {
            Self::Event(_) => Some(ComponentKind::Event),
            Self::Todo(_) => Some(ComponentKind::Todo),
            Self::Journal(_) => Some(ComponentKind::Journal),
            Self::FreeBusy(_) => Some(ComponentKind::FreeBusy),
            Self::Timezone(_) => Some(ComponentKind::Timezone),
            Self::Alarm(_) => Some(ComponentKind::Alarm),
            Self::Standard(_) => Some(ComponentKind::Standard),
            Self::Daylight(_) => Some(ComponentKind::Daylight),
            Self::Other(..) => None,
        }
    }

    #[must_use]
    pub fn is(&self, kind: ComponentKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Returns the token written after `BEGIN:`/`END:`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Other(token, _) => token,
            known => known.kind().map_or("", ComponentKind::as_str),
        }
    }

    #[must_use]
    pub fn body(&self) -> &ComponentBody {
        match self {
            Self::Event(body)
            | Self::Todo(body)
            | Self::Journal(body)
            | Self::FreeBusy(body)
            | Self::Timezone(body)
            | Self::Alarm(body)
            | Self::Standard(body)
            | Self::Daylight(body)
            | Self::Other(_, body) => body,
        }
    }

    pub fn body_mut(&mut self) -> &mut ComponentBody {
        match self {
            Self::Event(body)
            | Self::Todo(body)
            | Self::Journal(body)
            | Self::FreeBusy(body)
            | Self::Timezone(body)
            | Self::Alarm(body)
            | Self::Standard(body)
            | Self::Daylight(body)
            | Self::Other(_, body) => body,
        }
    }

    #[must_use]
    pub fn into_body(self) -> ComponentBody {
        match self {
            Self::Event(body)
            | Self::Todo(body)
            | Self::Journal(body)
            | Self::FreeBusy(body)
            | Self::Timezone(body)
            | Self::Alarm(body)
            | Self::Standard(body)
            | Self::Daylight(body)
            | Self::Other(_, body) => body,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Component] {
        &self.body().children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Component> {
        &mut self.body_mut().children
    }

    /// Appends a sub-component and returns a reference to it.
    pub fn add_child(&mut self, child: Component) -> &mut Component {
        let children = self.children_mut();
        let index = children.len();
        children.push(child);
        &mut children[index]
    }

    /// Iterates direct children of the given kind.
    pub fn children_of(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.children().iter().filter(move |c| c.is(kind))
    }

    pub fn children_of_mut(&mut self, kind: ComponentKind) -> impl Iterator<Item = &mut Component> {
        self.children_mut().iter_mut().filter(move |c| c.is(kind))
    }
}

impl PropertyList for Component {
    fn properties(&self) -> &[Property] {
        &self.body().properties
    }

    fn properties_mut(&mut self) -> &mut Vec<Property> {
        &mut self.body_mut().properties
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Component", 3)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("properties", &self.body().properties)?;
        state.serialize_field("children", &self.body().children)?;
        state.end()
    }
}
