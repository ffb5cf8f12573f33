//! Load effect bundles and rosters from disk. Format is chosen by extension.

use std::fs;
use std::path::Path;

use crate::data::effects::EffectBundle;
use crate::data::roster::{RosterFile, RosterOfficer};
use crate::error::LoadError;

pub const DEFAULT_BUNDLE_PATH: &str = "data/effects/bundle.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
}

fn detect_format(path: &Path) -> Result<FileFormat, LoadError> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => Ok(FileFormat::Json),
        Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
        _ => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, raw: &str) -> Result<T, LoadError> {
    match detect_format(path)? {
        FileFormat::Json => serde_json::from_str(raw).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        FileFormat::Yaml => serde_yaml::from_str(raw).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn load_effect_bundle(path: impl AsRef<Path>) -> Result<EffectBundle, LoadError> {
    let path = path.as_ref();
    detect_format(path)?;
    let raw = read(path)?;
    let bundle: EffectBundle = parse(path, &raw)?;
    tracing::debug!(
        path = %path.display(),
        officers = bundle.officer_abilities.len(),
        intents = bundle.intent_weights.len(),
        "loaded effect bundle"
    );
    Ok(bundle)
}

/// Roster files may be a bare array or `{ "officers": [...] }`.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<RosterOfficer>, LoadError> {
    let path = path.as_ref();
    detect_format(path)?;
    let raw = read(path)?;
    let file: RosterFile = parse(path, &raw)?;
    Ok(file.into_officers())
}
