//! Effect bundle data contract: per-officer ability effects, per-intent weights
//! and per-intent default target contexts.
//!
//! The bundle is produced by the ability-text ingestion pipeline and is read-only
//! here. Maps are `BTreeMap` so every derived output iterates in a stable order.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Effect keys that make a captain maneuver relevant to a combat intent.
pub const COMBAT_EFFECT_KEYS: &[&str] = &[
    "damage_dealt",
    "weapon_damage",
    "crit_chance",
    "crit_damage",
    "mitigation",
    "armor",
    "hull_health",
    "shield_health",
    "officer_attack",
    "officer_defense",
    "officer_health",
    "dodge",
];

pub fn is_combat_effect_key(key: &str) -> bool {
    COMBAT_EFFECT_KEYS.contains(&key)
}

/// Which ability block of an officer an effect comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilitySlot {
    CaptainManeuver,
    OfficerAbility,
    BelowDeckAbility,
}

impl AbilitySlot {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CaptainManeuver => "captain_maneuver",
            Self::OfficerAbility => "officer_ability",
            Self::BelowDeckAbility => "below_deck_ability",
        }
    }
}

/// Crew position being filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewSlot {
    Captain,
    Bridge,
}

impl CrewSlot {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "captain" => Some(Self::Captain),
            "bridge" | "officer" => Some(Self::Bridge),
            _ => None,
        }
    }
}

/// Recognized battle-phase / stance conditions. Anything else is kept verbatim
/// as [ConditionKind::Unrecognized] and still resolves at half confidence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionKind {
    RequiresAttacking,
    RequiresDefending,
    AtRoundStart,
    AtCombatStart,
    RequiresHullBreach,
    RequiresShieldsDepleted,
    Unrecognized(String),
}

impl ConditionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::RequiresAttacking => "requires_attacking",
            Self::RequiresDefending => "requires_defending",
            Self::AtRoundStart => "at_round_start",
            Self::AtCombatStart => "at_combat_start",
            Self::RequiresHullBreach => "requires_hull_breach",
            Self::RequiresShieldsDepleted => "requires_shields_depleted",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Short phrase for explanations, e.g. "when attacking".
    pub fn describe(&self) -> String {
        match self {
            Self::RequiresAttacking => "when attacking".to_string(),
            Self::RequiresDefending => "when defending".to_string(),
            Self::AtRoundStart => "at round start".to_string(),
            Self::AtCombatStart => "at combat start".to_string(),
            Self::RequiresHullBreach => "against a hull-breached target".to_string(),
            Self::RequiresShieldsDepleted => "once shields are down".to_string(),
            Self::Unrecognized(raw) => format!("if {}", raw.replace('_', " ")),
        }
    }
}

impl From<String> for ConditionKind {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "requires_attacking" => Self::RequiresAttacking,
            "requires_defending" => Self::RequiresDefending,
            "at_round_start" => Self::AtRoundStart,
            "at_combat_start" => Self::AtCombatStart,
            "requires_hull_breach" => Self::RequiresHullBreach,
            "requires_shields_depleted" => Self::RequiresShieldsDepleted,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<ConditionKind> for String {
    fn from(kind: ConditionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectCondition {
    pub condition_key: ConditionKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl EffectCondition {
    pub fn new(kind: ConditionKind) -> Self {
        Self {
            condition_key: kind,
            params: BTreeMap::new(),
        }
    }
}

/// One quantified game effect attached to an ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectTag {
    pub effect_key: String,
    /// Fractional bonus: 0.30 is +30%.
    pub magnitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacking: Option<String>,
    /// Empty means unconstrained.
    #[serde(default)]
    pub applicable_target_kinds: BTreeSet<String>,
    #[serde(default)]
    pub applicable_target_tags: BTreeSet<String>,
    #[serde(default)]
    pub conditions: Vec<EffectCondition>,
}

impl EffectTag {
    pub fn new(effect_key: impl Into<String>, magnitude: f64) -> Self {
        Self {
            effect_key: effect_key.into(),
            magnitude,
            unit: None,
            stacking: None,
            applicable_target_kinds: BTreeSet::new(),
            applicable_target_tags: BTreeSet::new(),
            conditions: Vec::new(),
        }
    }

    pub fn with_target_kind(mut self, kind: impl Into<String>) -> Self {
        self.applicable_target_kinds.insert(kind.into());
        self
    }

    pub fn with_target_tag(mut self, tag: impl Into<String>) -> Self {
        self.applicable_target_tags.insert(tag.into());
        self
    }

    pub fn with_condition(mut self, kind: ConditionKind) -> Self {
        self.conditions.push(EffectCondition::new(kind));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerAbility {
    pub slot: AbilitySlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ability text states it grants no benefit.
    #[serde(default)]
    pub is_inert: bool,
    #[serde(default)]
    pub effects: Vec<EffectTag>,
}

impl OfficerAbility {
    pub fn new(slot: AbilitySlot, effects: Vec<EffectTag>) -> Self {
        Self {
            slot,
            name: None,
            is_inert: false,
            effects,
        }
    }

    pub fn inert(slot: AbilitySlot) -> Self {
        Self {
            slot,
            name: None,
            is_inert: true,
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engagement {
    Attacking,
    Defending,
    #[default]
    Any,
}

/// The situation an intent is played in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetContext {
    pub target_kind: String,
    #[serde(default)]
    pub engagement: Engagement,
    #[serde(default)]
    pub target_tags: BTreeSet<String>,
}

impl Default for TargetContext {
    fn default() -> Self {
        Self {
            target_kind: "hostile".to_string(),
            engagement: Engagement::Any,
            target_tags: BTreeSet::new(),
        }
    }
}

impl TargetContext {
    pub fn new(target_kind: impl Into<String>, engagement: Engagement) -> Self {
        Self {
            target_kind: target_kind.into(),
            engagement,
            target_tags: BTreeSet::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.target_tags.insert(tag.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub default_context: TargetContext,
}

pub type IntentWeights = BTreeMap<String, f64>;

/// Everything the engine needs to score officers for any intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectBundle {
    /// intent key -> effect key -> weight (may be zero or negative)
    #[serde(default)]
    pub intent_weights: BTreeMap<String, IntentWeights>,
    /// officer id -> abilities
    #[serde(default)]
    pub officer_abilities: BTreeMap<String, Vec<OfficerAbility>>,
    #[serde(default)]
    pub intents: BTreeMap<String, IntentDefinition>,
}

impl EffectBundle {
    pub fn abilities_for(&self, officer_id: &str) -> Option<&[OfficerAbility]> {
        self.officer_abilities.get(officer_id).map(Vec::as_slice)
    }

    /// Weight for an effect under an intent; unknown intent or key weighs 0.
    pub fn weight(&self, intent_key: &str, effect_key: &str) -> f64 {
        self.intent_weights
            .get(intent_key)
            .and_then(|weights| weights.get(effect_key))
            .copied()
            .unwrap_or(0.0)
    }

    /// Default target context for an intent, or the hostile/any default.
    pub fn context_for(&self, intent_key: &str) -> TargetContext {
        self.intents
            .get(intent_key)
            .map(|intent| intent.default_context.clone())
            .unwrap_or_default()
    }
}
