pub mod enums;
pub mod score_record;

pub use enums::{Brand, ClosedSet, EntityType, ScoreStatus, ScoreSystem, UnknownLiteral};
pub use score_record::{
    DimensionOutOfRange, REASONING_MAX_CHARS, SCORE_MAX, SCORE_MIN, ScoreDimensions, ScoreRecord,
    ScoreSlot,
};
