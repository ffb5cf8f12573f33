//! Runtime configuration for the CLI, read from `MAJEL_*` environment variables.

use std::env;
use std::path::PathBuf;

use crate::data::loader::DEFAULT_BUNDLE_PATH;
use crate::data::roster::DEFAULT_ROSTER_PATH;

pub const BUNDLE_PATH_VAR: &str = "MAJEL_BUNDLE_PATH";
pub const ROSTER_PATH_VAR: &str = "MAJEL_ROSTER_PATH";
pub const RESERVATIONS_VAR: &str = "MAJEL_RESERVATIONS";
pub const WORKERS_VAR: &str = "MAJEL_WORKERS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub bundle_path: PathBuf,
    pub roster_path: PathBuf,
    pub reservations: Vec<String>,
    /// 0 means all cores.
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bundle_path: PathBuf::from(DEFAULT_BUNDLE_PATH),
            roster_path: PathBuf::from(DEFAULT_ROSTER_PATH),
            reservations: Vec::new(),
            workers: 0,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or blank values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());
        let defaults = Self::default();

        let workers = match value(WORKERS_VAR) {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid {WORKERS_VAR}, defaulting to all cores");
                defaults.workers
            }),
            None => defaults.workers,
        };

        Self {
            bundle_path: value(BUNDLE_PATH_VAR).map(PathBuf::from).unwrap_or(defaults.bundle_path),
            roster_path: value(ROSTER_PATH_VAR).map(PathBuf::from).unwrap_or(defaults.roster_path),
            reservations: value(RESERVATIONS_VAR)
                .map(|raw| parse_id_list(&raw))
                .unwrap_or_default(),
            workers,
        }
    }
}

fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(EngineConfig::from_lookup(|_| None), EngineConfig::default());
    }

    #[test]
    fn reads_paths_reservations_and_workers() {
        let vars: HashMap<&str, &str> = [
            (BUNDLE_PATH_VAR, "fixtures/bundle.yaml"),
            (ROSTER_PATH_VAR, "fixtures/roster.json"),
            (RESERVATIONS_VAR, " kirk, ,spock "),
            (WORKERS_VAR, "4"),
        ]
        .into_iter()
        .collect();
        let config = EngineConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.bundle_path, PathBuf::from("fixtures/bundle.yaml"));
        assert_eq!(config.roster_path, PathBuf::from("fixtures/roster.json"));
        assert_eq!(config.reservations, vec!["kirk".to_string(), "spock".to_string()]);
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn invalid_workers_falls_back_to_default() {
        let config = EngineConfig::from_lookup(|key| {
            (key == WORKERS_VAR).then(|| "many".to_string())
        });
        assert_eq!(config.workers, 0);
    }
}
