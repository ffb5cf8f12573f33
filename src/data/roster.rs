use serde::{Deserialize, Serialize};

pub const DEFAULT_ROSTER_PATH: &str = "data/roster.json";

/// One officer the player can crew. Ownership, level and power are carried for
/// display only; effect scoring never reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterOfficer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub synergy_id: Option<String>,
    #[serde(default)]
    pub owned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u64>,
}

impl RosterOfficer {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            synergy_id: None,
            owned: true,
            level: None,
            power: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_synergy(mut self, group: impl Into<String>) -> Self {
        self.synergy_id = Some(group.into());
        self
    }

    /// Name for reason strings; falls back to the id when no name was supplied.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RosterFile {
    Officers(Vec<RosterOfficer>),
    Wrapped { officers: Vec<RosterOfficer> },
}

impl RosterFile {
    pub(crate) fn into_officers(self) -> Vec<RosterOfficer> {
        match self {
            Self::Officers(officers) | Self::Wrapped { officers } => officers,
        }
    }
}
