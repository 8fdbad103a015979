//! Value vocabularies for case report form fields.
//!
//! Every coded answer on a form is a closed set of tokens. The enums here
//! give those tokens compile-time names while keeping the wire
//! representation (`"yes"`, `"not_applicable"`, `"first_dose"`, ...) that
//! the collection layer submits.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Wire token for an answer that does not apply to the subject.
pub const NOT_APPLICABLE: &str = "not_applicable";

/// Wire token for the "other, specify" choice.
pub const OTHER: &str = "other";

/// How a field value counts for conditional rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Null, empty text or an empty selection.
    Blank,
    /// The explicit "not applicable" answer.
    NotApplicable,
    /// Any other answer.
    Value,
}

impl Presence {
    pub fn is_blank(self) -> bool {
        self == Presence::Blank
    }
}

/// A field value that conditional rules can inspect.
pub trait FieldValue {
    fn presence(&self) -> Presence;
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn presence(&self) -> Presence {
        match self {
            Some(value) => value.presence(),
            None => Presence::Blank,
        }
    }
}

impl FieldValue for String {
    fn presence(&self) -> Presence {
        if self.trim().is_empty() {
            Presence::Blank
        } else {
            Presence::Value
        }
    }
}

impl FieldValue for u32 {
    fn presence(&self) -> Presence {
        Presence::Value
    }
}

impl FieldValue for NaiveDate {
    fn presence(&self) -> Presence {
        Presence::Value
    }
}

impl FieldValue for NaiveDateTime {
    fn presence(&self) -> Presence {
        Presence::Value
    }
}

impl<T> FieldValue for Vec<T> {
    fn presence(&self) -> Presence {
        if self.is_empty() {
            Presence::Blank
        } else {
            Presence::Value
        }
    }
}

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire token for this answer.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == normalized)
                    .ok_or_else(|| format!("unknown {} token: {s}", stringify!($name)))
            }
        }

        impl FieldValue for $name {
            fn presence(&self) -> Presence {
                if self.as_str() == NOT_APPLICABLE {
                    Presence::NotApplicable
                } else {
                    Presence::Value
                }
            }
        }
    };
}

token_enum! {
    /// Yes/No question with an explicit not-applicable answer.
    YesNo {
        Yes => "yes",
        No => "no",
        NotApplicable => "not_applicable",
    }
}

token_enum! {
    /// A named position in the two-dose vaccination sequence.
    DoseSlot {
        FirstDose => "first_dose",
        SecondDose => "second_dose",
    }
}

token_enum! {
    /// Answer to "which dose is this" on the vaccination detail form.
    ReceivedDoseBefore {
        FirstDose => "first_dose",
        SecondDose => "second_dose",
        NotApplicable => "not_applicable",
    }
}

impl ReceivedDoseBefore {
    /// The history slot this answer refers to, if any.
    pub fn slot(self) -> Option<DoseSlot> {
        match self {
            ReceivedDoseBefore::FirstDose => Some(DoseSlot::FirstDose),
            ReceivedDoseBefore::SecondDose => Some(DoseSlot::SecondDose),
            ReceivedDoseBefore::NotApplicable => None,
        }
    }
}

token_enum! {
    /// Administration location.
    Location {
        Arm => "arm",
        Thigh => "thigh",
        Other => "other",
        NotApplicable => "not_applicable",
    }
}

token_enum! {
    AeStatus {
        Resolved => "resolved",
        Ongoing => "ongoing",
    }
}

token_enum! {
    AeOutcome {
        Resolved => "resolved",
        ResolvedWithSequelae => "resolved_with_sequelae",
        NotResolved => "not_resolved",
        Fatal => "fatal",
        Unknown => "unknown",
    }
}

token_enum! {
    /// Contraceptive methods (multi-select).
    Contraceptive {
        Condoms => "condoms",
        OralContraceptive => "oral_contraceptive",
        Injectable => "injectable",
        Implant => "implant",
        Iud => "iud",
        Abstinence => "abstinence",
        Other => "other",
    }
}

token_enum! {
    PostMenopausal {
        Yes => "yes",
        No => "no",
        Other => "other",
        NotApplicable => "not_applicable",
    }
}
