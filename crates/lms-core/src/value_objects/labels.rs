//! Closed vocabularies stored and transmitted as SCREAMING_SNAKE_CASE labels
//!
//! Statuses, roles, and categories share one representation across the API,
//! the database, and pub/sub payloads: `"IN_PROGRESS"`, `"SELF_PACED"`, etc.
//! Parsing is lenient about case and separators so `in-progress` and
//! `In Progress` both resolve.

use thiserror::Error;

/// Error when a label does not name any variant of the target enum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Normalize user input into label form (`in progress` -> `IN_PROGRESS`)
pub(crate) fn normalize_label(raw: &str) -> String {
    raw.trim().to_ascii_uppercase().replace(['-', ' '], "_")
}

/// Declare a fieldless enum backed by string labels.
///
/// Generates `as_str`, `ALL`, `Display`, `FromStr`, and serde impls that all
/// agree on the same label for each variant.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable label used in storage and on the wire
            #[inline]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::value_objects::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = $crate::value_objects::normalize_label(s);
                match normalized.as_str() {
                    $($label => Ok(Self::$variant),)+
                    _ => Err($crate::value_objects::ParseEnumError::new(stringify!($name), s)),
                }
            }
        }
    };
}

pub(crate) use labelled_enum;
