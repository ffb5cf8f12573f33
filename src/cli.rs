use serde::Serialize;

use crate::config::EngineConfig;
use crate::data::effects::{CrewSlot, EffectBundle};
use crate::data::loader::{load_effect_bundle, load_roster};
use crate::data::roster::RosterOfficer;
use crate::data::validate::{validate_bundle, ValidationSeverity};
use crate::optimizer::ranking::{recommend_crews, RecommendRequest, DEFAULT_RECOMMENDATION_LIMIT};
use crate::optimizer::scoring::score;
use crate::parallel::{recommend_for_intents, WorkerPool};

const USAGE: &str = "usage: majel <recommend|compare|score|validate>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Recommend,
    Compare,
    Score,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("recommend") => Some(Command::Recommend),
        Some("compare") => Some(Command::Compare),
        Some("score") => Some(Command::Score),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    run_with_config(args, &EngineConfig::from_env())
}

pub fn run_with_config(args: &[String], config: &EngineConfig) -> i32 {
    match parse_command(args) {
        Some(Command::Recommend) => handle_recommend(args, config),
        Some(Command::Compare) => handle_compare(args, config),
        Some(Command::Score) => handle_score(args, config),
        Some(Command::Validate) => handle_validate(config),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn load_bundle(config: &EngineConfig) -> Option<EffectBundle> {
    match load_effect_bundle(&config.bundle_path) {
        Ok(bundle) => Some(bundle),
        Err(err) => {
            eprintln!("failed to load effect bundle: {err}");
            None
        }
    }
}

fn load_roster_or_report(config: &EngineConfig) -> Option<Vec<RosterOfficer>> {
    match load_roster(&config.roster_path) {
        Ok(roster) => Some(roster),
        Err(err) => {
            eprintln!("failed to load roster: {err}");
            None
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            1
        }
    }
}

fn handle_recommend(args: &[String], config: &EngineConfig) -> i32 {
    let Some(intent) = args.get(2) else {
        eprintln!("usage: majel recommend <intent> [limit] [captain_id]");
        return 2;
    };
    let limit = parse_usize_arg(args.get(3), "limit", DEFAULT_RECOMMENDATION_LIMIT);
    let captain_id = args.get(4).map(String::as_str);

    let Some(roster) = load_roster_or_report(config) else {
        return 1;
    };
    let bundle = load_bundle(config);
    let request = RecommendRequest {
        reservations: &config.reservations,
        captain_id,
        limit,
        ..RecommendRequest::new(&roster, intent)
    };
    tracing::info!(intent = %intent, limit, roster = roster.len(), "recommending crews");

    match recommend_crews(&request, bundle.as_ref()) {
        Ok(recommendations) => print_json(&recommendations),
        Err(err) => {
            eprintln!("recommend failed: {err}");
            1
        }
    }
}

fn handle_compare(args: &[String], config: &EngineConfig) -> i32 {
    let Some(raw_intents) = args.get(2) else {
        eprintln!("usage: majel compare <intent[,intent...]> [limit]");
        return 2;
    };
    let intents: Vec<&str> = raw_intents
        .split(',')
        .map(str::trim)
        .filter(|intent| !intent.is_empty())
        .collect();
    let limit = parse_usize_arg(args.get(3), "limit", DEFAULT_RECOMMENDATION_LIMIT);

    let Some(roster) = load_roster_or_report(config) else {
        return 1;
    };
    let bundle = load_bundle(config);
    let template = RecommendRequest {
        reservations: &config.reservations,
        limit,
        ..RecommendRequest::new(&roster, "")
    };
    let pool = WorkerPool::with_workers(config.workers);

    match recommend_for_intents(&template, &intents, bundle.as_ref(), &pool) {
        Ok(results) => print_json(&results),
        Err(err) => {
            eprintln!("compare failed: {err}");
            1
        }
    }
}

fn handle_score(args: &[String], config: &EngineConfig) -> i32 {
    let (Some(officer_id), Some(intent)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: majel score <officer_id> <intent> [captain|bridge]");
        return 2;
    };
    let slot = match args.get(4) {
        None => CrewSlot::Captain,
        Some(raw) => match CrewSlot::parse(raw) {
            Some(slot) => slot,
            None => {
                eprintln!("invalid slot '{raw}', expected captain or bridge");
                return 2;
            }
        },
    };

    let bundle = load_bundle(config);
    match score(officer_id, slot, intent, bundle.as_ref()) {
        Ok(result) => print_json(&result),
        Err(err) => {
            eprintln!("score failed: {err}");
            1
        }
    }
}

fn handle_validate(config: &EngineConfig) -> i32 {
    let Some(bundle) = load_bundle(config) else {
        return 1;
    };
    // A missing roster only skips the roster checks; a broken one is an error.
    let (roster, roster_error) = match load_roster(&config.roster_path) {
        Ok(roster) => (roster, None),
        Err(err) if err.is_not_found() => (Vec::new(), None),
        Err(err) => (Vec::new(), Some(err)),
    };
    let mut report = validate_bundle(&bundle, &roster);
    if let Some(err) = roster_error {
        report.push(ValidationSeverity::Error, "roster", err.to_string());
    }

    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    if report.has_errors() {
        eprintln!("validation failed: {} issue(s)", report.diagnostics.len());
        1
    } else {
        println!(
            "validation passed: {} ({} diagnostic(s))",
            config.bundle_path.display(),
            report.diagnostics.len()
        );
        0
    }
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
