use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::{Brand, EntityType, ScoreStatus, ScoreSystem};

/// Lowest value an overall score or dimension may take
pub const SCORE_MIN: f64 = 0.0;
/// Highest value an overall score or dimension may take
pub const SCORE_MAX: f64 = 10.0;
/// Maximum length of `reasoning`, counted in characters
pub const REASONING_MAX_CHARS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Dimension '{name}' must be between 0 and 10, received {value}")]
pub struct DimensionOutOfRange {
    pub name: String,
    pub value: f64,
}

/// Named sub-scores of a record, each within [0, 10]
///
/// The key set is open ended. Values are range checked on construction,
/// so a `ScoreDimensions` held anywhere in the crate is always valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ScoreDimensions(BTreeMap<String, f64>);

impl ScoreDimensions {
    pub fn new(values: BTreeMap<String, f64>) -> Result<Self, DimensionOutOfRange> {
        if let Some((name, value)) = values.iter().find(|(_, value)| !is_score(**value)) {
            return Err(DimensionOutOfRange {
                name: name.clone(),
                value: *value,
            });
        }

        Ok(Self(values))
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.0
    }
}

impl TryFrom<BTreeMap<String, f64>> for ScoreDimensions {
    type Error = DimensionOutOfRange;

    fn try_from(values: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<ScoreDimensions> for BTreeMap<String, f64> {
    fn from(dimensions: ScoreDimensions) -> Self {
        dimensions.0
    }
}

impl utoipa::PartialSchema for ScoreDimensions {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        use utoipa::openapi::schema::{KnownFormat, ObjectBuilder, SchemaFormat, Type};

        ObjectBuilder::new()
            .schema_type(Type::Object)
            .description(Some("Named sub-scores, each between 0 and 10"))
            .additional_properties(Some(
                ObjectBuilder::new()
                    .schema_type(Type::Number)
                    .format(Some(SchemaFormat::KnownFormat(KnownFormat::Double)))
                    .minimum(Some(SCORE_MIN))
                    .maximum(Some(SCORE_MAX)),
            ))
            .into()
    }
}

impl ToSchema for ScoreDimensions {
    fn name() -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Borrowed("ScoreDimensions")
    }
}

pub(crate) fn is_score(value: f64) -> bool {
    (SCORE_MIN..=SCORE_MAX).contains(&value)
}

/// Identifies what is being scored, independent of how many records exist for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreSlot {
    pub brand: Brand,
    pub system: ScoreSystem,
    pub entity_type: EntityType,
    pub entity_id: i64,
}

/// A computed evaluation of one entity under one scoring system for one brand
///
/// `id` and the timestamps are assigned by the store; they are optional on
/// input and always present on records read back from a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    pub brand: Brand,

    pub system: ScoreSystem,

    pub entity_type: EntityType,

    #[validate(range(min = 1, message = "Number must be greater than or equal to 1"))]
    #[schema(minimum = 1)]
    pub entity_id: i64,

    #[validate(range(
        min = 0.0,
        max = 10.0,
        message = "Number must be between 0 and 10"
    ))]
    #[schema(minimum = 0, maximum = 10)]
    pub overall_score: f64,

    pub dimensions: ScoreDimensions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "String must contain at most 500 character(s)"))]
    #[schema(max_length = 500)]
    pub reasoning: Option<String>,

    #[serde(default)]
    pub status: ScoreStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ScoreRecord {
    pub fn slot(&self) -> ScoreSlot {
        ScoreSlot {
            brand: self.brand,
            system: self.system,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
        }
    }
}
