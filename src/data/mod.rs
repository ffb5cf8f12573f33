pub mod effects;
pub mod loader;
pub mod roster;
pub mod validate;

pub use effects::{
    is_combat_effect_key, AbilitySlot, ConditionKind, CrewSlot, EffectBundle, EffectCondition,
    EffectTag, Engagement, IntentDefinition, OfficerAbility, TargetContext, COMBAT_EFFECT_KEYS,
};
pub use loader::{load_effect_bundle, load_roster, DEFAULT_BUNDLE_PATH};
pub use roster::{RosterOfficer, DEFAULT_ROSTER_PATH};
pub use validate::{validate_bundle, ValidationDiagnostic, ValidationReport, ValidationSeverity};
