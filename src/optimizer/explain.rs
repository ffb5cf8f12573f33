//! Turns a scored trio into factor breakdowns and human-readable reasons.
//! All text is derived from effect-bundle data.

use crate::data::effects::TargetContext;
use crate::optimizer::applicability::ApplicabilityTier;
use crate::optimizer::ranking::{CrewMember, Factor, Recommendation, TrioEvaluation};
use crate::optimizer::scoring::EffectContribution;

pub const NO_VIABLE_CAPTAIN_WARNING: &str =
    "No viable captains found for this intent; every available officer was considered as captain.";

/// Effects listed per officer in reasons.
const MAX_EFFECTS_PER_OFFICER: usize = 3;

pub fn build_recommendation(
    trio: &TrioEvaluation<'_>,
    intent_key: &str,
    context: &TargetContext,
    include_fallback_warning: bool,
) -> Recommendation {
    Recommendation {
        captain_id: trio.captain.officer.id.clone(),
        bridge1_id: trio.bridge[0].officer.id.clone(),
        bridge2_id: trio.bridge[1].officer.id.clone(),
        total_score: trio.total_score,
        factors: factors(trio),
        reasons: reasons(trio, intent_key, context, include_fallback_warning),
    }
}

/// Factor scores sum to the trio's total score.
fn factors(trio: &TrioEvaluation<'_>) -> Vec<Factor> {
    let mut factors = vec![Factor::new("effectScore", trio.base_score)];
    if trio.synergy_multiplier > 1.0 {
        factors.push(Factor::new(
            "synergy",
            trio.base_score * (trio.synergy_multiplier - 1.0),
        ));
    }
    if trio.captain_bonus != 0.0 {
        factors.push(Factor::new("captainBonus", trio.captain_bonus));
    }
    factors
}

fn reasons(
    trio: &TrioEvaluation<'_>,
    intent_key: &str,
    context: &TargetContext,
    include_fallback_warning: bool,
) -> Vec<String> {
    let mut reasons = Vec::new();
    let captain_name = trio.captain.officer.display_name();

    if trio.viability.viable {
        reasons.push(format!(
            "{captain_name} captains with a maneuver that works for {intent_key}: {}",
            trio.viability.relevant_keys.join(", ")
        ));
    } else {
        reasons.push(format!(
            "{captain_name} has no combat captain maneuver that applies to {intent_key} ({:+.1})",
            trio.captain_bonus
        ));
    }

    for member in std::iter::once(&trio.captain).chain(trio.bridge.iter()) {
        reasons.push(describe_member(member, intent_key, context));
    }

    match trio.synergy_group_size {
        0 | 1 => {}
        2 => reasons.push(format!(
            "Partial synergy multiplies the combined effect score x{:.2}",
            trio.synergy_multiplier
        )),
        _ => reasons.push(format!(
            "Full-crew synergy multiplies the combined effect score x{:.2}",
            trio.synergy_multiplier
        )),
    }

    if include_fallback_warning {
        reasons.push(NO_VIABLE_CAPTAIN_WARNING.to_string());
    }
    reasons
}

fn describe_member(member: &CrewMember<'_>, intent_key: &str, context: &TargetContext) -> String {
    let name = member.officer.display_name();
    let mut weighted: Vec<&EffectContribution> = member
        .slot_score
        .contributions
        .iter()
        .filter(|contribution| contribution.weight != 0.0)
        .collect();
    if weighted.is_empty() {
        return format!("{name}: no effects weighted for {intent_key}");
    }
    weighted.sort_by(|left, right| right.contribution.total_cmp(&left.contribution));

    let details: Vec<String> = weighted
        .iter()
        .take(MAX_EFFECTS_PER_OFFICER)
        .map(|contribution| describe_effect(contribution, context))
        .collect();
    format!(
        "{name} ({:.1}): {}",
        member.slot_score.effect_score(),
        details.join("; ")
    )
}

fn describe_effect(contribution: &EffectContribution, context: &TargetContext) -> String {
    let magnitude = contribution.magnitude * 100.0;
    match contribution.tier {
        ApplicabilityTier::Unconditional => format!(
            "{} {magnitude:+.0}% works against {} ({:+.1})",
            contribution.effect_key, context.target_kind, contribution.contribution
        ),
        ApplicabilityTier::Conditional => {
            let when: Vec<String> = contribution
                .conditions
                .iter()
                .map(|condition| condition.describe())
                .collect();
            format!(
                "{} {magnitude:+.0}% conditional {} ({:+.1})",
                contribution.effect_key,
                when.join(" and "),
                contribution.contribution
            )
        }
        ApplicabilityTier::Blocked => format!(
            "{} does not apply against {}",
            contribution.effect_key, context.target_kind
        ),
    }
}
