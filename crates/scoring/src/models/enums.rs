use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A closed vocabulary whose members are fixed at compile time.
///
/// Each member has exactly one wire literal. Lookups are exact and
/// case-sensitive, so `"Funlist"` is not a [`Brand`].
pub trait ClosedSet: Copy + Sized + 'static {
    /// Human readable name of the vocabulary, used in error messages.
    const NAME: &'static str;

    /// Every member, in declaration order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.as_str() == literal)
    }

    /// Allowed literals rendered as `'a' | 'b'`.
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|member| format!("'{}'", member.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {name} '{received}'. Expected {expected}")]
pub struct UnknownLiteral {
    pub name: &'static str,
    pub received: String,
    pub expected: String,
}

impl UnknownLiteral {
    fn of<T: ClosedSet>(received: &str) -> Self {
        Self {
            name: T::NAME,
            received: received.to_string(),
            expected: T::expected(),
        }
    }
}

fn parse_literal<T: ClosedSet>(literal: &str) -> Result<T, UnknownLiteral> {
    T::from_literal(literal).ok_or_else(|| UnknownLiteral::of::<T>(literal))
}

/// Tenant/product namespace a score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Funlist,
    Businesscalendar,
}

impl ClosedSet for Brand {
    const NAME: &'static str = "brand";
    const ALL: &'static [Self] = &[Self::Funlist, Self::Businesscalendar];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Funlist => "funlist",
            Self::Businesscalendar => "businesscalendar",
        }
    }
}

/// Scoring methodology that produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ScoreSystem {
    Funalytics,
    ConnectScore,
    Elevate,
}

impl ClosedSet for ScoreSystem {
    const NAME: &'static str = "system";
    const ALL: &'static [Self] = &[Self::Funalytics, Self::ConnectScore, Self::Elevate];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Funalytics => "Funalytics",
            Self::ConnectScore => "ConnectScore",
            Self::Elevate => "Elevate",
        }
    }
}

/// Kind of entity being scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Event,
    Venue,
    Experience,
}

impl ClosedSet for EntityType {
    const NAME: &'static str = "entity type";
    const ALL: &'static [Self] = &[Self::Event, Self::Venue, Self::Experience];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Venue => "venue",
            Self::Experience => "experience",
        }
    }
}

/// Lifecycle marker of a score record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStatus {
    Pending,
    Computing,
    #[default]
    Completed,
    Failed,
}

impl ClosedSet for ScoreStatus {
    const NAME: &'static str = "status";
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Computing,
        Self::Completed,
        Self::Failed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Computing => "computing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

macro_rules! impl_literal_traits {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = UnknownLiteral;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_literal(s)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

impl_literal_traits!(Brand, ScoreSystem, EntityType, ScoreStatus);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip<T>()
    where
        T: ClosedSet + FromStr<Err = UnknownLiteral> + PartialEq + fmt::Debug + Serialize,
    {
        for member in T::ALL {
            assert_eq!(member.as_str().parse::<T>().unwrap(), *member);
            assert_eq!(
                serde_json::to_value(member).unwrap(),
                serde_json::Value::String(member.as_str().to_string())
            );
        }
    }

    #[test]
    fn test_every_literal_is_accepted() {
        assert_round_trip::<Brand>();
        assert_round_trip::<ScoreSystem>();
        assert_round_trip::<EntityType>();
        assert_round_trip::<ScoreStatus>();
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let err = "Funlist".parse::<Brand>().unwrap_err();
        assert_eq!(err.received, "Funlist");
        assert_eq!(err.expected, "'funlist' | 'businesscalendar'");

        assert!("funalytics".parse::<ScoreSystem>().is_err());
    }

    #[test]
    fn test_unknown_entity_type_names_allowed_values() {
        let err = "coupon".parse::<EntityType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid entity type 'coupon'. Expected 'event' | 'venue' | 'experience'"
        );
    }

    #[test]
    fn test_status_defaults_to_completed() {
        assert_eq!(ScoreStatus::default(), ScoreStatus::Completed);
    }

    #[test]
    fn test_serde_matches_wire_literals() {
        let system: ScoreSystem = serde_json::from_str("\"ConnectScore\"").unwrap();
        assert_eq!(system, ScoreSystem::ConnectScore);
        assert_eq!(Brand::Businesscalendar.to_string(), "businesscalendar");
    }
}
