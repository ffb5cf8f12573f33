use std::collections::BTreeSet;
use std::fmt;

use crate::data::effects::{EffectBundle, OfficerAbility};
use crate::data::roster::RosterOfficer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Checks an effect bundle (and optionally the roster it will score) for data
/// problems the engine would otherwise silently absorb.
pub fn validate_bundle(bundle: &EffectBundle, roster: &[RosterOfficer]) -> ValidationReport {
    let mut report = ValidationReport::default();

    let weighted_keys: BTreeSet<&str> = bundle
        .intent_weights
        .values()
        .flat_map(|weights| weights.keys().map(String::as_str))
        .collect();

    for (intent, weights) in &bundle.intent_weights {
        for (key, weight) in weights {
            if !weight.is_finite() {
                report.push(
                    ValidationSeverity::Error,
                    format!("intentWeights.{intent}.{key}"),
                    format!("weight is not finite ({weight})"),
                );
            }
        }
        if !bundle.intents.contains_key(intent) {
            report.push(
                ValidationSeverity::Warning,
                format!("intents.{intent}"),
                "intent has weights but no default target context; assuming hostile/any",
            );
        }
    }

    for (officer_id, abilities) in &bundle.officer_abilities {
        for (index, ability) in abilities.iter().enumerate() {
            validate_ability(
                &mut report,
                &format!("officerAbilities.{officer_id}[{index}]"),
                ability,
                &weighted_keys,
            );
        }
    }

    for officer in roster {
        if bundle.abilities_for(&officer.id).is_none() {
            tracing::warn!(officer = %officer.id, "roster officer missing from effect bundle");
            report.push(
                ValidationSeverity::Warning,
                format!("roster.{}", officer.id),
                "officer has no effect data and will score 0",
            );
        }
    }

    report
}

fn validate_ability(
    report: &mut ValidationReport,
    context: &str,
    ability: &OfficerAbility,
    weighted_keys: &BTreeSet<&str>,
) {
    if ability.is_inert && !ability.effects.is_empty() {
        report.push(
            ValidationSeverity::Info,
            context,
            format!(
                "{} is flagged inert but carries {} effect(s); they are ignored",
                ability.slot.as_str(),
                ability.effects.len()
            ),
        );
    }

    for (index, effect) in ability.effects.iter().enumerate() {
        let effect_context = format!("{context}.effects[{index}]");
        if !effect.magnitude.is_finite() {
            report.push(
                ValidationSeverity::Error,
                format!("{effect_context}.magnitude"),
                format!("magnitude is not finite ({})", effect.magnitude),
            );
        }
        if !weighted_keys.contains(effect.effect_key.as_str()) {
            report.push(
                ValidationSeverity::Warning,
                format!("{effect_context}.effectKey"),
                format!("'{}' is weighted by no intent", effect.effect_key),
            );
        }
        for condition in &effect.conditions {
            if !condition.condition_key.is_recognized() {
                report.push(
                    ValidationSeverity::Info,
                    format!("{effect_context}.conditions"),
                    format!(
                        "unrecognized condition '{}' treated as half confidence",
                        condition.condition_key
                    ),
                );
            }
        }
    }
}
