//! Rank one roster for several intents at once.
//!
//! Each intent is an independent, side-effect-free ranking run, so runs are
//! distributed across the Rayon pool without coordination. Output order
//! follows the order of `intents`.

use rayon::prelude::*;
use serde::Serialize;

use crate::data::effects::EffectBundle;
use crate::error::{EngineError, Result};
use crate::optimizer::ranking::{recommend_crews, Recommendation, RecommendRequest};
use crate::parallel::pool::WorkerPool;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRecommendations {
    pub intent_key: String,
    pub recommendations: Vec<Recommendation>,
}

/// Runs [recommend_crews] for every intent, reusing everything else from `template`.
pub fn recommend_for_intents<'a>(
    template: &RecommendRequest<'a>,
    intents: &[&'a str],
    bundle: Option<&EffectBundle>,
    pool: &WorkerPool,
) -> Result<Vec<IntentRecommendations>> {
    let bundle = bundle.ok_or(EngineError::MissingBundle {
        operation: "multi-intent crew ranking",
    })?;

    pool.install(|| {
        intents
            .par_iter()
            .map(|&intent_key| {
                let request = RecommendRequest {
                    intent_key,
                    ..template.clone()
                };
                recommend_crews(&request, Some(bundle)).map(|recommendations| {
                    IntentRecommendations {
                        intent_key: intent_key.to_string(),
                        recommendations,
                    }
                })
            })
            .collect()
    })
}
