//! Effect-based crew recommendation: applicability, slot scoring, captain
//! viability, synergy, trio ranking and explanations.

pub mod applicability;
pub mod explain;
pub mod ranking;
pub mod scoring;
pub mod synergy;
pub mod viability;

pub use applicability::{resolve_applicability, Applicability, ApplicabilityTier};
pub use explain::NO_VIABLE_CAPTAIN_WARNING;
pub use ranking::{
    recommend_crews, Factor, Recommendation, RecommendRequest, DEFAULT_RECOMMENDATION_LIMIT,
};
pub use scoring::{score, slot_effect_score, EffectContribution, Score, SlotScore, SCALE};
pub use synergy::{synergy_multiplier, SYNERGY_PAIR_MULTIPLIER, SYNERGY_TRIO_MULTIPLIER};
pub use viability::{
    captain_bonus, captain_viability, CaptainViability, CAPTAIN_NONVIABLE_PENALTY,
    CAPTAIN_VIABLE_BONUS,
};
