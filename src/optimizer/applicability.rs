//! Three-tier applicability: does an effect fire in an intent's target context?
//!
//! Blocked (0) when the effect is restricted to other target kinds or tags,
//! conditional (0.5) when it carries any battle-phase or stance condition, and
//! unconditional (1) otherwise. This is a static estimate, not a combat sim.

use serde::Serialize;

use crate::data::effects::{EffectTag, TargetContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicabilityTier {
    Blocked,
    Conditional,
    Unconditional,
}

impl ApplicabilityTier {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Blocked => 0.0,
            Self::Conditional => 0.5,
            Self::Unconditional => 1.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Blocked => "does not apply",
            Self::Conditional => "conditional",
            Self::Unconditional => "works",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Applicability {
    pub tier: ApplicabilityTier,
    pub has_condition: bool,
}

impl Applicability {
    pub const fn multiplier(&self) -> f64 {
        self.tier.multiplier()
    }

    pub fn is_applicable(&self) -> bool {
        self.tier != ApplicabilityTier::Blocked
    }
}

/// True when the effect is restricted to target kinds that exclude this context.
fn target_kind_mismatch(effect: &EffectTag, context: &TargetContext) -> bool {
    !effect.applicable_target_kinds.is_empty()
        && !effect.applicable_target_kinds.contains(&context.target_kind)
}

/// Tags only block when both sides name tags and share none.
fn target_tag_mismatch(effect: &EffectTag, context: &TargetContext) -> bool {
    !effect.applicable_target_tags.is_empty()
        && !context.target_tags.is_empty()
        && effect.applicable_target_tags.is_disjoint(&context.target_tags)
}

pub fn resolve_applicability(effect: &EffectTag, context: &TargetContext) -> Applicability {
    let has_condition = !effect.conditions.is_empty();
    let tier = if target_kind_mismatch(effect, context) || target_tag_mismatch(effect, context) {
        ApplicabilityTier::Blocked
    } else if has_condition {
        ApplicabilityTier::Conditional
    } else {
        ApplicabilityTier::Unconditional
    };
    Applicability {
        tier,
        has_condition,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::effects::{ConditionKind, Engagement};

    fn hostile() -> TargetContext {
        TargetContext::new("hostile", Engagement::Attacking).with_tag("pve")
    }

    #[test]
    fn unconstrained_effect_is_unconditional() {
        let effect = EffectTag::new("damage_dealt", 0.3);
        let result = resolve_applicability(&effect, &hostile());
        assert_eq!(result.tier, ApplicabilityTier::Unconditional);
        assert_eq!(result.multiplier(), 1.0);
        assert!(!result.has_condition);
    }

    #[test]
    fn target_kind_mismatch_blocks_even_with_conditions() {
        let effect = EffectTag::new("damage_dealt", 0.3)
            .with_target_kind("station")
            .with_condition(ConditionKind::AtRoundStart);
        let result = resolve_applicability(&effect, &hostile());
        assert_eq!(result.tier, ApplicabilityTier::Blocked);
        assert_eq!(result.multiplier(), 0.0);
        assert!(result.has_condition);
    }

    #[test]
    fn any_condition_halves_confidence() {
        let recognized = EffectTag::new("crit_chance", 0.1)
            .with_target_kind("hostile")
            .with_condition(ConditionKind::RequiresAttacking);
        let unknown = EffectTag::new("crit_chance", 0.1)
            .with_condition(ConditionKind::from("when_cloaked".to_string()));

        assert_eq!(resolve_applicability(&recognized, &hostile()).multiplier(), 0.5);
        assert_eq!(resolve_applicability(&unknown, &hostile()).multiplier(), 0.5);
    }

    #[test]
    fn disjoint_target_tags_block_but_untagged_context_does_not() {
        let pvp_only = EffectTag::new("damage_dealt", 0.2).with_target_tag("pvp");
        assert_eq!(
            resolve_applicability(&pvp_only, &hostile()).tier,
            ApplicabilityTier::Blocked
        );

        let untagged = TargetContext::new("hostile", Engagement::Any);
        assert_eq!(
            resolve_applicability(&pvp_only, &untagged).tier,
            ApplicabilityTier::Unconditional
        );
    }
}
