pub mod score_computation;

pub use score_computation::{
    ComputeOutcome, DeferredScoreEngine, ScoreEngine, compute_score, record_score,
};
