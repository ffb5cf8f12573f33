//! Slot scorer: folds an officer's ability effects into one number for an intent.

use serde::Serialize;

use crate::data::effects::{AbilitySlot, ConditionKind, CrewSlot, EffectBundle};
use crate::error::{EngineError, Result};
use crate::optimizer::applicability::{resolve_applicability, ApplicabilityTier};
use crate::optimizer::viability::{captain_bonus, captain_viability};

/// Display scaling: a fully applicable, weight-2, magnitude-1.0 effect scores 20.
pub const SCALE: f64 = 10.0;

/// One effect's share of a slot score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectContribution {
    pub ability_slot: AbilitySlot,
    pub effect_key: String,
    pub magnitude: f64,
    pub weight: f64,
    pub tier: ApplicabilityTier,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionKind>,
    pub contribution: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotScore {
    /// Signed sum of contributions; negative weights can pull it below zero.
    pub raw_total: f64,
    pub contributions: Vec<EffectContribution>,
}

impl SlotScore {
    pub fn effect_score(&self) -> f64 {
        self.raw_total.max(0.0)
    }
}

/// Per-officer, per-slot result.
///
/// `goal_fit`, `ship_fit` and `counter_fit` belong to the older heuristic
/// scorer and are always zero when effect data drives scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub effect_score: f64,
    pub captain_bonus: f64,
    pub goal_fit: f64,
    pub ship_fit: f64,
    pub counter_fit: f64,
    pub contributions: Vec<EffectContribution>,
}

/// Scores every non-inert ability of `officer_id` against `intent_key`.
/// Officers absent from the bundle score zero.
pub fn slot_effect_score(officer_id: &str, intent_key: &str, bundle: &EffectBundle) -> SlotScore {
    let Some(abilities) = bundle.abilities_for(officer_id) else {
        return SlotScore::default();
    };
    let context = bundle.context_for(intent_key);

    let mut score = SlotScore::default();
    for ability in abilities.iter().filter(|ability| !ability.is_inert) {
        for effect in &ability.effects {
            let weight = bundle.weight(intent_key, &effect.effect_key);
            let applicability = resolve_applicability(effect, &context);
            let contribution = effect.magnitude * weight * applicability.multiplier() * SCALE;
            score.raw_total += contribution;
            score.contributions.push(EffectContribution {
                ability_slot: ability.slot,
                effect_key: effect.effect_key.clone(),
                magnitude: effect.magnitude,
                weight,
                tier: applicability.tier,
                conditions: effect
                    .conditions
                    .iter()
                    .map(|condition| condition.condition_key.clone())
                    .collect(),
                contribution,
            });
        }
    }
    score
}

/// Scores one officer for one crew slot. Fails only when no bundle is supplied.
pub fn score(
    officer_id: &str,
    slot: CrewSlot,
    intent_key: &str,
    bundle: Option<&EffectBundle>,
) -> Result<Score> {
    let bundle = bundle.ok_or(EngineError::MissingBundle {
        operation: "officer scoring",
    })?;

    let slot_score = slot_effect_score(officer_id, intent_key, bundle);
    let captain_bonus = match slot {
        CrewSlot::Captain => captain_bonus(&captain_viability(officer_id, intent_key, bundle)),
        CrewSlot::Bridge => 0.0,
    };

    Ok(Score {
        effect_score: slot_score.effect_score(),
        captain_bonus,
        goal_fit: 0.0,
        ship_fit: 0.0,
        counter_fit: 0.0,
        contributions: slot_score.contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::effects::{
        ConditionKind, EffectTag, Engagement, IntentDefinition, OfficerAbility, TargetContext,
    };
    use crate::optimizer::viability::{CAPTAIN_NONVIABLE_PENALTY, CAPTAIN_VIABLE_BONUS};

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-9, "expected {b}, got {a}");
    }

    fn bundle_with(officer: &str, abilities: Vec<OfficerAbility>) -> EffectBundle {
        let mut bundle = EffectBundle::default();
        bundle.intent_weights.insert(
            "grinding".to_string(),
            [
                ("damage_dealt".to_string(), 2.0),
                ("mining_rate".to_string(), -1.0),
            ]
            .into_iter()
            .collect(),
        );
        bundle.intents.insert(
            "grinding".to_string(),
            IntentDefinition {
                name: Some("Grinding".to_string()),
                default_context: TargetContext::new("hostile", Engagement::Attacking),
            },
        );
        bundle.officer_abilities.insert(officer.to_string(), abilities);
        bundle
    }

    fn single_effect(effect: EffectTag) -> EffectBundle {
        bundle_with(
            "kirk",
            vec![OfficerAbility::new(AbilitySlot::OfficerAbility, vec![effect])],
        )
    }

    #[test]
    fn applicability_tiers_scale_the_score() {
        let unconditional =
            single_effect(EffectTag::new("damage_dealt", 1.0).with_target_kind("hostile"));
        let conditional = single_effect(
            EffectTag::new("damage_dealt", 1.0)
                .with_target_kind("hostile")
                .with_condition(ConditionKind::AtRoundStart),
        );
        let mismatched =
            single_effect(EffectTag::new("damage_dealt", 1.0).with_target_kind("station"));

        let score_of = |bundle: &EffectBundle| {
            score("kirk", CrewSlot::Bridge, "grinding", Some(bundle))
                .unwrap()
                .effect_score
        };
        approx_eq(score_of(&unconditional), 20.0);
        approx_eq(score_of(&conditional), 10.0);
        approx_eq(score_of(&mismatched), 0.0);
    }

    #[test]
    fn missing_bundle_fails_fast() {
        let err = score("kirk", CrewSlot::Captain, "grinding", None).unwrap_err();
        assert!(err.to_string().contains("effect bundle is required"));
    }

    #[test]
    fn unknown_officer_scores_zero_and_is_penalized_as_captain() {
        let bundle = single_effect(EffectTag::new("damage_dealt", 1.0));
        let bridge = score("nobody", CrewSlot::Bridge, "grinding", Some(&bundle)).unwrap();
        let captain = score("nobody", CrewSlot::Captain, "grinding", Some(&bundle)).unwrap();

        approx_eq(bridge.effect_score, 0.0);
        approx_eq(bridge.captain_bonus, 0.0);
        approx_eq(captain.captain_bonus, CAPTAIN_NONVIABLE_PENALTY);
    }

    #[test]
    fn inert_abilities_are_ignored() {
        let mut inert = OfficerAbility::new(
            AbilitySlot::CaptainManeuver,
            vec![EffectTag::new("damage_dealt", 1.0)],
        );
        inert.is_inert = true;
        let bundle = bundle_with("kirk", vec![inert]);
        let result = score("kirk", CrewSlot::Captain, "grinding", Some(&bundle)).unwrap();
        approx_eq(result.effect_score, 0.0);
        approx_eq(result.captain_bonus, CAPTAIN_NONVIABLE_PENALTY);
    }

    #[test]
    fn negative_weights_leave_raw_total_signed_but_score_floored() {
        let bundle = single_effect(EffectTag::new("mining_rate", 1.0));
        let slot = slot_effect_score("kirk", "grinding", &bundle);
        approx_eq(slot.raw_total, -10.0);
        approx_eq(slot.effect_score(), 0.0);
    }

    #[test]
    fn captain_slot_adds_viability_bonus_and_legacy_factors_stay_zero() {
        let bundle = bundle_with(
            "kirk",
            vec![OfficerAbility::new(
                AbilitySlot::CaptainManeuver,
                vec![EffectTag::new("damage_dealt", 0.5)],
            )],
        );
        let result = score("kirk", CrewSlot::Captain, "grinding", Some(&bundle)).unwrap();
        approx_eq(result.effect_score, 10.0);
        approx_eq(result.captain_bonus, CAPTAIN_VIABLE_BONUS);
        approx_eq(result.goal_fit + result.ship_fit + result.counter_fit, 0.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let bundle = single_effect(
            EffectTag::new("damage_dealt", 0.37).with_condition(ConditionKind::AtCombatStart),
        );
        let first = score("kirk", CrewSlot::Captain, "grinding", Some(&bundle)).unwrap();
        let second = score("kirk", CrewSlot::Captain, "grinding", Some(&bundle)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.effect_score.to_bits(), second.effect_score.to_bits());
    }
}
