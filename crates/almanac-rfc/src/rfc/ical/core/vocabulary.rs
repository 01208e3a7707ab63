//! Enumerated property and parameter values (RFC 5545 §3.2, §3.8).

use std::fmt;
use std::str::FromStr;

use crate::error::RfcError;

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $($variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Returns the wire token.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = RfcError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($token) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(RfcError::invalid_value($label, format!("unknown token '{s}'")))
            }
        }
    };
}

token_enum! {
    /// `METHOD` values (RFC 5546).
    Method("METHOD") {
        Publish => "PUBLISH",
        Request => "REQUEST",
        Reply => "REPLY",
        Add => "ADD",
        Cancel => "CANCEL",
        Refresh => "REFRESH",
        Counter => "COUNTER",
        DeclineCounter => "DECLINECOUNTER",
    }
}

token_enum! {
    /// `STATUS` values across VEVENT, VTODO and VJOURNAL.
    ObjectStatus("STATUS") {
        Tentative => "TENTATIVE",
        Confirmed => "CONFIRMED",
        Cancelled => "CANCELLED",
        NeedsAction => "NEEDS-ACTION",
        Completed => "COMPLETED",
        InProcess => "IN-PROCESS",
        Draft => "DRAFT",
        Final => "FINAL",
    }
}

token_enum! {
    /// `ACTION` values for VALARM.
    Action("ACTION") {
        Audio => "AUDIO",
        Display => "DISPLAY",
        Email => "EMAIL",
        Procedure => "PROCEDURE",
    }
}

token_enum! {
    Classification("CLASS") {
        Public => "PUBLIC",
        Private => "PRIVATE",
        Confidential => "CONFIDENTIAL",
    }
}

token_enum! {
    ParticipationStatus("PARTSTAT") {
        NeedsAction => "NEEDS-ACTION",
        Accepted => "ACCEPTED",
        Declined => "DECLINED",
        Tentative => "TENTATIVE",
        Delegated => "DELEGATED",
        Completed => "COMPLETED",
        InProcess => "IN-PROCESS",
    }
}

token_enum! {
    ParticipationRole("ROLE") {
        Chair => "CHAIR",
        ReqParticipant => "REQ-PARTICIPANT",
        OptParticipant => "OPT-PARTICIPANT",
        NonParticipant => "NON-PARTICIPANT",
    }
}

token_enum! {
    CalendarUserType("CUTYPE") {
        Individual => "INDIVIDUAL",
        Group => "GROUP",
        Resource => "RESOURCE",
        Room => "ROOM",
        Unknown => "UNKNOWN",
    }
}

token_enum! {
    FreeBusyType("FBTYPE") {
        Free => "FREE",
        Busy => "BUSY",
        BusyUnavailable => "BUSY-UNAVAILABLE",
        BusyTentative => "BUSY-TENTATIVE",
    }
}

token_enum! {
    RelationshipType("RELTYPE") {
        Parent => "PARENT",
        Child => "CHILD",
        Sibling => "SIBLING",
    }
}

token_enum! {
    TimeTransparency("TRANSP") {
        Opaque => "OPAQUE",
        Transparent => "TRANSPARENT",
    }
}

token_enum! {
    /// `RELATED` values for TRIGGER.
    TriggerRelated("RELATED") {
        Start => "START",
        End => "END",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!("accepted".parse::<ParticipationStatus>().unwrap(), ParticipationStatus::Accepted);
        assert_eq!("REQ-PARTICIPANT".parse::<ParticipationRole>().unwrap(), ParticipationRole::ReqParticipant);
        assert_eq!(ObjectStatus::NeedsAction.to_string(), "NEEDS-ACTION");
    }

    #[test]
    fn unknown_token_names_the_property() {
        let err = "MAYBE".parse::<Classification>().unwrap_err();
        assert!(err.to_string().contains("CLASS"));
        assert!(err.to_string().contains("MAYBE"));
    }
}
