//! Trio search: enumerate (captain, bridge, bridge) crews from a roster, score
//! them with effect data and return the best `limit` as recommendations.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::data::effects::EffectBundle;
use crate::data::roster::RosterOfficer;
use crate::error::{EngineError, Result};
use crate::optimizer::explain::build_recommendation;
use crate::optimizer::scoring::{slot_effect_score, SlotScore};
use crate::optimizer::synergy::{largest_synergy_group, multiplier_for_group_size};
use crate::optimizer::viability::{captain_bonus, captain_viability, CaptainViability};

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// Pending trios are pruned back to `limit` once the buffer reaches this many
/// entries (or `4 * limit`, whichever is larger).
const PRUNE_THRESHOLD: usize = 4096;

#[derive(Debug, Clone)]
pub struct RecommendRequest<'a> {
    pub roster: &'a [RosterOfficer],
    pub intent_key: &'a str,
    /// Officer ids locked to other duties; never used as crew unless pinned as captain.
    pub reservations: &'a [String],
    /// Pins the captain and bypasses viability filtering.
    pub captain_id: Option<&'a str>,
    pub limit: usize,
}

impl<'a> RecommendRequest<'a> {
    pub fn new(roster: &'a [RosterOfficer], intent_key: &'a str) -> Self {
        Self {
            roster,
            intent_key,
            reservations: &[],
            captain_id: None,
            limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub key: String,
    pub score: f64,
}

impl Factor {
    pub fn new(key: impl Into<String>, score: f64) -> Self {
        Self {
            key: key.into(),
            score,
        }
    }
}

/// One ranked crew.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub captain_id: String,
    pub bridge1_id: String,
    pub bridge2_id: String,
    pub total_score: f64,
    pub factors: Vec<Factor>,
    pub reasons: Vec<String>,
}

impl Recommendation {
    pub fn factor(&self, key: &str) -> Option<f64> {
        self.factors
            .iter()
            .find(|factor| factor.key == key)
            .map(|factor| factor.score)
    }
}

/// A crew member with the slot score used for its trio.
#[derive(Debug, Clone, Copy)]
pub struct CrewMember<'a> {
    pub officer: &'a RosterOfficer,
    pub slot_score: &'a SlotScore,
}

/// Everything the explanation builder needs about one scored trio.
#[derive(Debug, Clone, Copy)]
pub struct TrioEvaluation<'a> {
    pub captain: CrewMember<'a>,
    pub bridge: [CrewMember<'a>; 2],
    pub viability: &'a CaptainViability,
    /// Sum of the three effect scores before synergy.
    pub base_score: f64,
    pub synergy_group_size: usize,
    pub synergy_multiplier: f64,
    pub captain_bonus: f64,
    pub total_score: f64,
}

#[derive(Debug)]
struct PoolEntry<'a> {
    officer: &'a RosterOfficer,
    slot_score: SlotScore,
    available: bool,
}

#[derive(Debug, Clone, Copy)]
struct ScoredTrio {
    seq: usize,
    captain: usize,
    bridge1: usize,
    bridge2: usize,
    base_score: f64,
    synergy_group_size: usize,
    synergy_multiplier: f64,
    captain_bonus: f64,
    total_score: f64,
}

#[derive(Debug, Default)]
struct CaptainSelection {
    candidates: Vec<usize>,
    viability: BTreeMap<usize, CaptainViability>,
    fallback: bool,
}

/// Builds the officer pool: the non-reserved roster (first occurrence of each id)
/// plus the pinned captain, even when reserved.
fn build_pool<'a>(request: &RecommendRequest<'a>, bundle: &EffectBundle) -> Vec<PoolEntry<'a>> {
    let reserved: HashSet<&str> = request.reservations.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut pool = Vec::new();
    for officer in request.roster {
        if !seen.insert(officer.id.as_str()) {
            continue;
        }
        let available = !reserved.contains(officer.id.as_str());
        let pinned = request.captain_id == Some(officer.id.as_str());
        if !available && !pinned {
            continue;
        }
        pool.push(PoolEntry {
            officer,
            slot_score: slot_effect_score(&officer.id, request.intent_key, bundle),
            available,
        });
    }
    pool
}

fn select_captains(
    pool: &[PoolEntry<'_>],
    request: &RecommendRequest<'_>,
    bundle: &EffectBundle,
) -> CaptainSelection {
    let mut selection = CaptainSelection::default();

    if let Some(captain_id) = request.captain_id {
        if let Some(index) = pool.iter().position(|entry| entry.officer.id == captain_id) {
            selection.viability.insert(
                index,
                captain_viability(captain_id, request.intent_key, bundle),
            );
            selection.candidates.push(index);
        } else {
            tracing::debug!(captain_id, "pinned captain not in roster");
        }
        return selection;
    }

    for (index, entry) in pool.iter().enumerate().filter(|(_, entry)| entry.available) {
        selection.viability.insert(
            index,
            captain_viability(&entry.officer.id, request.intent_key, bundle),
        );
    }
    selection.candidates = selection
        .viability
        .iter()
        .filter(|(_, viability)| viability.viable)
        .map(|(index, _)| *index)
        .collect();

    if selection.candidates.is_empty() && !selection.viability.is_empty() {
        tracing::warn!(
            intent = request.intent_key,
            officers = selection.viability.len(),
            "no viable captains; falling back to every available officer"
        );
        selection.candidates = selection.viability.keys().copied().collect();
        selection.fallback = true;
    }
    selection
}

fn rank_order(left: &ScoredTrio, right: &ScoredTrio) -> std::cmp::Ordering {
    right
        .total_score
        .total_cmp(&left.total_score)
        .then_with(|| left.seq.cmp(&right.seq))
}

fn keep_top(trios: &mut Vec<ScoredTrio>, limit: usize) {
    trios.sort_by(rank_order);
    trios.truncate(limit);
}

/// Ranks crews for `request.intent_key`. Fails only when `bundle` is `None`.
pub fn recommend_crews(
    request: &RecommendRequest<'_>,
    bundle: Option<&EffectBundle>,
) -> Result<Vec<Recommendation>> {
    let bundle = bundle.ok_or(EngineError::MissingBundle {
        operation: "crew ranking",
    })?;
    if request.limit == 0 {
        return Ok(Vec::new());
    }

    let pool = build_pool(request, bundle);
    let selection = select_captains(&pool, request, bundle);
    let prune_at = PRUNE_THRESHOLD.max(request.limit.saturating_mul(4));

    let mut trios: Vec<ScoredTrio> = Vec::new();
    let mut seq = 0usize;
    for &captain in &selection.candidates {
        let Some(viability) = selection.viability.get(&captain) else {
            continue;
        };
        let bonus = captain_bonus(viability);
        let bridges: Vec<usize> = (0..pool.len())
            .filter(|&index| index != captain && pool[index].available)
            .collect();

        for (i, &bridge1) in bridges.iter().enumerate() {
            for &bridge2 in bridges.iter().skip(i + 1) {
                let members = [
                    pool[captain].officer,
                    pool[bridge1].officer,
                    pool[bridge2].officer,
                ];
                let base_score = pool[captain].slot_score.effect_score()
                    + pool[bridge1].slot_score.effect_score()
                    + pool[bridge2].slot_score.effect_score();
                let synergy_group_size = largest_synergy_group(&members);
                let synergy_multiplier = multiplier_for_group_size(synergy_group_size);

                trios.push(ScoredTrio {
                    seq,
                    captain,
                    bridge1,
                    bridge2,
                    base_score,
                    synergy_group_size,
                    synergy_multiplier,
                    captain_bonus: bonus,
                    total_score: base_score * synergy_multiplier + bonus,
                });
                seq += 1;

                if trios.len() >= prune_at {
                    keep_top(&mut trios, request.limit);
                }
            }
        }
    }
    keep_top(&mut trios, request.limit);

    tracing::debug!(
        intent = request.intent_key,
        roster = request.roster.len(),
        pool = pool.len(),
        captains = selection.candidates.len(),
        trios = seq,
        returned = trios.len(),
        fallback = selection.fallback,
        "ranked crews"
    );

    let context = bundle.context_for(request.intent_key);
    let recommendations = trios
        .iter()
        .enumerate()
        .filter_map(|(rank, trio)| {
            let viability = selection.viability.get(&trio.captain)?;
            let evaluation = TrioEvaluation {
                captain: member(&pool, trio.captain),
                bridge: [member(&pool, trio.bridge1), member(&pool, trio.bridge2)],
                viability,
                base_score: trio.base_score,
                synergy_group_size: trio.synergy_group_size,
                synergy_multiplier: trio.synergy_multiplier,
                captain_bonus: trio.captain_bonus,
                total_score: trio.total_score,
            };
            Some(build_recommendation(
                &evaluation,
                request.intent_key,
                &context,
                selection.fallback && rank == 0,
            ))
        })
        .collect();
    Ok(recommendations)
}

fn member<'a>(pool: &'a [PoolEntry<'a>], index: usize) -> CrewMember<'a> {
    CrewMember {
        officer: pool[index].officer,
        slot_score: &pool[index].slot_score,
    }
}
