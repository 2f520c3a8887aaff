use async_trait::async_trait;

use crate::dto::score::ComputeScoreRequest;
use crate::error::Result;
use crate::models::{ScoreDimensions, ScoreRecord, ScoreStatus};
use crate::repository::ScoreStore;
use crate::validation::check_rules;

/// Produces a score record for a valid compute request
#[async_trait]
pub trait ScoreEngine: Send + Sync {
    async fn compute(&self, request: &ComputeScoreRequest) -> Result<ScoreRecord>;
}

/// Engine that defers the actual scoring to an external worker.
///
/// It answers every request with a `pending` record. The worker later posts
/// the finished record for the same slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeferredScoreEngine;

#[async_trait]
impl ScoreEngine for DeferredScoreEngine {
    async fn compute(&self, request: &ComputeScoreRequest) -> Result<ScoreRecord> {
        Ok(ScoreRecord {
            id: None,
            brand: request.brand,
            system: request.system,
            entity_type: request.entity_type,
            entity_id: request.entity_id,
            overall_score: 0.0,
            dimensions: ScoreDimensions::default(),
            reasoning: Some(format!("Queued for {} scoring", request.system)),
            status: ScoreStatus::Pending,
            computed_at: None,
            created_at: None,
            updated_at: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComputeOutcome {
    /// An earlier record for the slot was reused
    Cached(ScoreRecord),
    /// The engine produced a new record, which has been stored
    Created(ScoreRecord),
}

impl ComputeOutcome {
    pub fn record(&self) -> &ScoreRecord {
        match self {
            Self::Cached(record) | Self::Created(record) => record,
        }
    }

    pub fn into_record(self) -> ScoreRecord {
        match self {
            Self::Cached(record) | Self::Created(record) => record,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Compute the score for a slot, reusing the latest non-failed record unless
/// `force_recompute` is set
pub async fn compute_score(
    store: &dyn ScoreStore,
    engine: &dyn ScoreEngine,
    request: &ComputeScoreRequest,
) -> Result<ComputeOutcome> {
    let slot = request.slot();

    if !request.force_recompute
        && let Some(existing) = store.latest_for_slot(&slot).await?
        && existing.status != ScoreStatus::Failed
    {
        tracing::debug!("Reusing score {:?} for {:?}", existing.id, slot);
        return Ok(ComputeOutcome::Cached(existing));
    }

    let mut record = engine.compute(request).await?;
    // The engine must score the slot it was asked about.
    record.brand = slot.brand;
    record.system = slot.system;
    record.entity_type = slot.entity_type;
    record.entity_id = slot.entity_id;

    let record = check_rules(record)?;
    let stored = store.insert(record).await?;
    tracing::info!(
        "Computed {} score for {} {} ({}): status {}",
        stored.system,
        stored.entity_type,
        stored.entity_id,
        stored.brand,
        stored.status
    );

    Ok(ComputeOutcome::Created(stored))
}

/// Store a record delivered by an external scoring worker
pub async fn record_score(store: &dyn ScoreStore, record: ScoreRecord) -> Result<ScoreRecord> {
    let stored = store.insert(record).await?;
    tracing::info!(
        "Recorded {} score {} for {} {}",
        stored.system,
        stored.overall_score,
        stored.entity_type,
        stored.entity_id
    );

    Ok(stored)
}
