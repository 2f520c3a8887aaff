pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::score::GetLatestScoreRequest;
use crate::error::Result;
use crate::models::{ScoreRecord, ScoreSlot};

pub use memory::MemoryScoreStore;
pub use postgres::PgScoreStore;

/// Persistence for score records.
///
/// A slot may hold any number of records over time; stores never enforce
/// uniqueness per slot.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Persists a record, assigning `id`, `createdAt` and `updatedAt`.
    /// `computedAt` defaults to the creation time when not supplied.
    async fn insert(&self, record: ScoreRecord) -> Result<ScoreRecord>;

    /// Latest records matching the query, newest first, plus the total count.
    ///
    /// With `entityId` this is the slot's history. Without it, the newest
    /// record of each entity of the requested type.
    async fn latest(&self, query: &GetLatestScoreRequest) -> Result<(Vec<ScoreRecord>, u64)>;

    async fn latest_for_slot(&self, slot: &ScoreSlot) -> Result<Option<ScoreRecord>>;

    async fn find(&self, id: Uuid) -> Result<ScoreRecord>;
}
