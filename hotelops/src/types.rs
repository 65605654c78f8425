//! Common type definitions shared by the entity models and repositories.
//!
//! # ID Types
//!
//! Entity ids are opaque strings assigned by the backing store. Fixture data uses short numeric
//! strings ("1", "2", ...), the in-memory store assigns UUIDv4 strings and the remote record
//! service may hand back anything (the wire adapter coerces numeric ids to strings).
//!
//! - [`RoomId`]: Room identifier
//! - [`ReservationId`]: Reservation identifier
//! - [`TaskId`]: Housekeeping task identifier
//!
//! # Enum-like fields
//!
//! Status and priority fields are closed sets of kebab-case strings. They are declared with
//! [`string_enum!`], which derives serde, `Display` and a lenient `FromStr` that accepts
//! underscore and space separated spellings in any case.

use std::fmt;

pub type RoomId = String;
pub type ReservationId = String;
pub type TaskId = String;

/// Abbreviate an id to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Error returned when a string does not name a variant of a [`string_enum!`] type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.value, self.kind)
    }
}

impl std::error::Error for UnknownVariant {}

/// Normalize a loosely spelled variant ("In Progress", "in_progress") to kebab-case
#[doc(hidden)]
pub fn normalize_variant(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Declare a closed string enum with its canonical kebab-case spellings.
///
/// The first variant listed is the `Default`.
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $first:ident => $first_str:literal,
            $($variant:ident => $str:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            #[default]
            #[serde(rename = $first_str)]
            $first,
            $(
                #[serde(rename = $str)]
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$name::$first, $($name::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$first => $first_str,
                    $($name::$variant => $str,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::types::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = $crate::types::normalize_variant(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == normalized)
                    .ok_or_else(|| $crate::types::UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    string_enum! {
        enum Shade {
            Light => "light",
            Pitch => "pitch-black",
        }
    }

    #[test]
    fn test_abbrev_id() {
        assert_eq!(abbrev_id("550e8400-e29b-41d4-a716-446655440000"), "550e8400");
        assert_eq!(abbrev_id("12"), "12");
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!("Pitch Black".parse::<Shade>(), Ok(Shade::Pitch));
        assert_eq!("pitch_black".parse::<Shade>(), Ok(Shade::Pitch));
        assert_eq!(" LIGHT ".parse::<Shade>(), Ok(Shade::Light));
        let err = "dim".parse::<Shade>().unwrap_err();
        assert_eq!(err.to_string(), "'dim' is not a valid Shade");
    }

    #[test]
    fn test_serde_uses_canonical_spelling() {
        assert_eq!(serde_json::to_string(&Shade::Pitch).unwrap(), "\"pitch-black\"");
        assert_eq!(Shade::default(), Shade::Light);
    }
}
