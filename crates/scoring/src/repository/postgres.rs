use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, types::Json};
use uuid::Uuid;

use super::ScoreStore;
use crate::dto::score::GetLatestScoreRequest;
use crate::error::{Result, ScoringError};
use crate::models::{ClosedSet, ScoreDimensions, ScoreRecord, ScoreSlot};

const COLUMNS: &str = "id, brand, system, entity_type, entity_id, overall_score, dimensions, \
                       reasoning, status, computed_at, created_at, updated_at";

/// Row of the `score_records` table. Enum columns are TEXT.
#[derive(Debug, FromRow)]
struct ScoreRow {
    id: Uuid,
    brand: String,
    system: String,
    entity_type: String,
    entity_id: i64,
    overall_score: f64,
    dimensions: Json<BTreeMap<String, f64>>,
    reasoning: Option<String>,
    status: String,
    computed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ScoreRow> for ScoreRecord {
    type Error = ScoringError;

    fn try_from(row: ScoreRow) -> Result<Self> {
        let id = row.id;

        Ok(Self {
            id: Some(id),
            brand: row.brand.parse().map_err(|e| corrupt(id, e))?,
            system: row.system.parse().map_err(|e| corrupt(id, e))?,
            entity_type: row.entity_type.parse().map_err(|e| corrupt(id, e))?,
            entity_id: row.entity_id,
            overall_score: row.overall_score,
            dimensions: ScoreDimensions::new(row.dimensions.0).map_err(|e| corrupt(id, e))?,
            reasoning: row.reasoning,
            status: row.status.parse().map_err(|e| corrupt(id, e))?,
            computed_at: row.computed_at,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

fn corrupt(id: Uuid, error: impl std::fmt::Display) -> ScoringError {
    ScoringError::CorruptRecord(format!("score {id}: {error}"))
}

fn into_records(rows: Vec<ScoreRow>) -> Result<Vec<ScoreRecord>> {
    rows.into_iter().map(ScoreRecord::try_from).collect()
}

pub struct PgScoreStore {
    pool: PgPool,
}

impl PgScoreStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreStore for PgScoreStore {
    async fn insert(&self, record: ScoreRecord) -> Result<ScoreRecord> {
        let row = sqlx::query_as::<_, ScoreRow>(&format!(
            r#"
            INSERT INTO score_records
                (id, brand, system, entity_type, entity_id, overall_score, dimensions,
                 reasoning, status, computed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, CURRENT_TIMESTAMP))
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(record.brand.as_str())
        .bind(record.system.as_str())
        .bind(record.entity_type.as_str())
        .bind(record.entity_id)
        .bind(record.overall_score)
        .bind(Json(record.dimensions.as_map()))
        .bind(record.reasoning.as_deref())
        .bind(record.status.as_str())
        .bind(record.computed_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn latest(&self, query: &GetLatestScoreRequest) -> Result<(Vec<ScoreRecord>, u64)> {
        let brand = query.brand.as_str();
        let system = query.system.as_str();
        let entity_type = query.entity_type.as_str();
        let limit = i64::from(query.limit);

        let (rows, total) = match query.entity_id {
            Some(entity_id) => {
                let rows = sqlx::query_as::<_, ScoreRow>(&format!(
                    r#"
                    SELECT {COLUMNS}
                    FROM score_records
                    WHERE brand = $1 AND system = $2 AND entity_type = $3 AND entity_id = $4
                    ORDER BY created_at DESC
                    LIMIT $5
                    "#
                ))
                .bind(brand)
                .bind(system)
                .bind(entity_type)
                .bind(entity_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

                let total: i64 = sqlx::query_scalar(
                    r#"
                    SELECT COUNT(*)
                    FROM score_records
                    WHERE brand = $1 AND system = $2 AND entity_type = $3 AND entity_id = $4
                    "#,
                )
                .bind(brand)
                .bind(system)
                .bind(entity_type)
                .bind(entity_id)
                .fetch_one(&self.pool)
                .await?;

                (rows, total)
            }
            None => {
                let rows = sqlx::query_as::<_, ScoreRow>(&format!(
                    r#"
                    SELECT {COLUMNS}
                    FROM (
                        SELECT DISTINCT ON (entity_id) {COLUMNS}
                        FROM score_records
                        WHERE brand = $1 AND system = $2 AND entity_type = $3
                        ORDER BY entity_id, created_at DESC
                    ) latest
                    ORDER BY created_at DESC
                    LIMIT $4
                    "#
                ))
                .bind(brand)
                .bind(system)
                .bind(entity_type)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

                let total: i64 = sqlx::query_scalar(
                    r#"
                    SELECT COUNT(DISTINCT entity_id)
                    FROM score_records
                    WHERE brand = $1 AND system = $2 AND entity_type = $3
                    "#,
                )
                .bind(brand)
                .bind(system)
                .bind(entity_type)
                .fetch_one(&self.pool)
                .await?;

                (rows, total)
            }
        };

        Ok((into_records(rows)?, total.max(0) as u64))
    }

    async fn latest_for_slot(&self, slot: &ScoreSlot) -> Result<Option<ScoreRecord>> {
        let row = sqlx::query_as::<_, ScoreRow>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM score_records
            WHERE brand = $1 AND system = $2 AND entity_type = $3 AND entity_id = $4
            ORDER BY created_at DESC
            LIMIT 1
            "#
        ))
        .bind(slot.brand.as_str())
        .bind(slot.system.as_str())
        .bind(slot.entity_type.as_str())
        .bind(slot.entity_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ScoreRecord::try_from).transpose()
    }

    async fn find(&self, id: Uuid) -> Result<ScoreRecord> {
        let row = sqlx::query_as::<_, ScoreRow>(&format!(
            "SELECT {COLUMNS} FROM score_records WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ScoringError::NotFound)?;

        row.try_into()
    }
}
