//! iCalendar core models (RFC 5545).
//!
//! These types preserve everything a parse sees: unknown properties,
//! unknown parameters and unknown components survive a round trip.

mod calendar;
mod component;
mod datetime;
mod duration;
pub mod names;
mod parameter;
mod property;
mod value_type;
mod vocabulary;

pub use calendar::Calendar;
pub use component::{Component, ComponentBody, ComponentKind};
pub use datetime::{ParsedTime, TimeValue};
pub use duration::Duration;
pub use parameter::{Parameter, Parameters};
pub use property::{Property, PropertyList, is_valid_name};
pub use value_type::ValueType;
pub use vocabulary::{
    Action, CalendarUserType, Classification, FreeBusyType, Method, ObjectStatus,
    ParticipationRole, ParticipationStatus, RelationshipType, TimeTransparency, TriggerRelated,
};
