//! Captain viability gate.
//!
//! An officer is a viable captain for an intent when at least one effect of a
//! non-inert captain maneuver is both applicable in the intent's default context
//! and keyed on a combat stat. The intent's weight for that key is ignored:
//! a zero- or negatively-weighted combat effect is still a real captain choice.

use crate::data::effects::{is_combat_effect_key, AbilitySlot, EffectBundle};
use crate::optimizer::applicability::resolve_applicability;

pub const CAPTAIN_VIABLE_BONUS: f64 = 10.0;
/// Smaller in magnitude than [CAPTAIN_VIABLE_BONUS].
pub const CAPTAIN_NONVIABLE_PENALTY: f64 = -5.0;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaptainViability {
    pub viable: bool,
    /// Combat-relevant, applicable captain maneuver effect keys, deduplicated and
    /// in ability order.
    pub relevant_keys: Vec<String>,
}

pub fn captain_viability(
    officer_id: &str,
    intent_key: &str,
    bundle: &EffectBundle,
) -> CaptainViability {
    let Some(abilities) = bundle.abilities_for(officer_id) else {
        return CaptainViability::default();
    };
    let context = bundle.context_for(intent_key);

    let mut relevant_keys: Vec<String> = Vec::new();
    let maneuvers = abilities
        .iter()
        .filter(|ability| ability.slot == AbilitySlot::CaptainManeuver && !ability.is_inert);
    for ability in maneuvers {
        for effect in &ability.effects {
            if !is_combat_effect_key(&effect.effect_key) {
                continue;
            }
            if !resolve_applicability(effect, &context).is_applicable() {
                continue;
            }
            if !relevant_keys.contains(&effect.effect_key) {
                relevant_keys.push(effect.effect_key.clone());
            }
        }
    }

    CaptainViability {
        viable: !relevant_keys.is_empty(),
        relevant_keys,
    }
}

pub fn captain_bonus(viability: &CaptainViability) -> f64 {
    if viability.viable {
        CAPTAIN_VIABLE_BONUS
    } else {
        CAPTAIN_NONVIABLE_PENALTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::effects::{EffectTag, OfficerAbility};

    fn bundle_with_weight(weight: f64, ability: OfficerAbility) -> EffectBundle {
        let mut bundle = EffectBundle::default();
        bundle.intent_weights.insert(
            "pvp".to_string(),
            [("mitigation".to_string(), weight)].into_iter().collect(),
        );
        bundle.officer_abilities.insert("uhura".to_string(), vec![ability]);
        bundle
    }

    #[test]
    fn viability_ignores_weight_sign_and_magnitude() {
        for weight in [-1.5, 0.0, 3.0] {
            let bundle = bundle_with_weight(
                weight,
                OfficerAbility::new(
                    AbilitySlot::CaptainManeuver,
                    vec![EffectTag::new("mitigation", 0.2)],
                ),
            );
            let viability = captain_viability("uhura", "pvp", &bundle);
            assert!(viability.viable, "weight {weight} should not affect viability");
            assert_eq!(viability.relevant_keys, vec!["mitigation".to_string()]);
            assert_eq!(captain_bonus(&viability), CAPTAIN_VIABLE_BONUS);
        }
    }

    #[test]
    fn non_combat_captain_maneuver_is_not_viable() {
        let bundle = bundle_with_weight(
            1.0,
            OfficerAbility::new(
                AbilitySlot::CaptainManeuver,
                vec![EffectTag::new("mining_rate", 0.5)],
            ),
        );
        let viability = captain_viability("uhura", "pvp", &bundle);
        assert!(!viability.viable);
        assert_eq!(captain_bonus(&viability), CAPTAIN_NONVIABLE_PENALTY);
    }

    #[test]
    fn only_captain_maneuvers_count() {
        let bundle = bundle_with_weight(
            1.0,
            OfficerAbility::new(
                AbilitySlot::OfficerAbility,
                vec![EffectTag::new("mitigation", 5.0)],
            ),
        );
        assert!(!captain_viability("uhura", "pvp", &bundle).viable);
    }

    #[test]
    fn blocked_effect_is_not_viable() {
        let bundle = bundle_with_weight(
            1.0,
            OfficerAbility::new(
                AbilitySlot::CaptainManeuver,
                vec![EffectTag::new("mitigation", 0.2).with_target_kind("station")],
            ),
        );
        assert!(!captain_viability("uhura", "pvp", &bundle).viable);
    }

    #[test]
    fn penalty_is_smaller_than_bonus() {
        assert!(CAPTAIN_VIABLE_BONUS > 0.0);
        assert!(CAPTAIN_NONVIABLE_PENALTY < 0.0);
        assert!(CAPTAIN_NONVIABLE_PENALTY.abs() < CAPTAIN_VIABLE_BONUS);
    }
}
