use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::ScoreStore;
use crate::dto::score::GetLatestScoreRequest;
use crate::error::{Result, ScoringError};
use crate::models::{ScoreRecord, ScoreSlot};

/// Process-local store, used when no database is configured
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    // Insertion order is creation order.
    records: RwLock<Vec<ScoreRecord>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<ScoreRecord>> {
        self.records.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ScoreRecord>> {
        self.records.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn matches_query(record: &ScoreRecord, query: &GetLatestScoreRequest) -> bool {
    record.brand == query.brand
        && record.system == query.system
        && record.entity_type == query.entity_type
        && query.entity_id.is_none_or(|id| record.entity_id == id)
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn insert(&self, mut record: ScoreRecord) -> Result<ScoreRecord> {
        let now = Utc::now();
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(now);
        record.updated_at = Some(now);
        record.computed_at = record.computed_at.or(Some(now));

        self.write().push(record.clone());
        tracing::debug!("Stored score {:?} for {:?}", record.id, record.slot());

        Ok(record)
    }

    async fn latest(&self, query: &GetLatestScoreRequest) -> Result<(Vec<ScoreRecord>, u64)> {
        let records = self.read();
        let newest_first = records
            .iter()
            .rev()
            .filter(|record| matches_query(record, query));

        let matching: Vec<&ScoreRecord> = if query.entity_id.is_some() {
            newest_first.collect()
        } else {
            let mut seen = HashSet::new();
            newest_first
                .filter(|record| seen.insert(record.entity_id))
                .collect()
        };

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn latest_for_slot(&self, slot: &ScoreSlot) -> Result<Option<ScoreRecord>> {
        Ok(self
            .read()
            .iter()
            .rev()
            .find(|record| record.slot() == *slot)
            .cloned())
    }

    async fn find(&self, id: Uuid) -> Result<ScoreRecord> {
        self.read()
            .iter()
            .find(|record| record.id == Some(id))
            .cloned()
            .ok_or(ScoringError::NotFound)
    }
}
