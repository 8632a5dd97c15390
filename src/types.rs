//! Shared vocabulary types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string is not a member of one of the vocabularies below.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownVariant { kind: $kind, value: other.to_string() }),
                }
            }
        }
    };
}

string_enum!(
    /// Internal lifecycle status stored on every opportunity.
    OpportunityStatus, "status", {
        Draft => "draft",
        Review => "review",
        Active => "active",
        Closed => "closed",
        Archived => "archived",
    }
);

string_enum!(
    PropertyType, "property type", {
        Office => "office",
        Retail => "retail",
        Industrial => "industrial",
        Multifamily => "multifamily",
        Hospitality => "hospitality",
        MixedUse => "mixed_use",
        Land => "land",
        SelfStorage => "self_storage",
        Medical => "medical",
        SeniorHousing => "senior_housing",
        StudentHousing => "student_housing",
        Other => "other",
    }
);

string_enum!(
    InvestmentStrategy, "investment strategy", {
        Core => "core",
        CorePlus => "core_plus",
        ValueAdd => "value_add",
        Opportunistic => "opportunistic",
        Development => "development",
        Debt => "debt",
        Other => "other",
    }
);

impl OpportunityStatus {
    /// Statuses whose records may be shown to the public at all.
    pub fn is_publicly_visible(&self) -> bool {
        matches!(self, OpportunityStatus::Active | OpportunityStatus::Closed)
    }
}
