use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{CleaningHistory, ScheduledCleaning, Theme};
use crate::utils::DEFAULT_LANGUAGE;

pub const STATE_VERSION: u32 = 1;
pub const STATE_FILE_NAME: &str = "tidyclean-storage.json";

/// The fields of the store that survive a restart. Nothing else is written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub theme: Theme,
    pub language: String,
    pub history: Vec<CleaningHistory>,
    pub total_space_saved: u64,
    pub total_items_cleaned: u64,
    pub scheduled_cleanings: Vec<ScheduledCleaning>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            language: DEFAULT_LANGUAGE.to_string(),
            history: Vec::new(),
            total_space_saved: 0,
            total_items_cleaned: 0,
            scheduled_cleanings: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    state: &'a PersistedState,
}

#[derive(Deserialize)]
struct RawEnvelope {
    version: u32,
    state: serde_json::Value,
}

/// A single JSON record on disk holding the [`PersistedState`].
#[derive(Clone, Debug)]
pub struct Persistence {
    path: PathBuf,
}

impl Persistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/tidyclean/tidyclean-storage.json`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(Error::NoStateDir)?;
        Ok(dir.join("tidyclean").join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored state. A missing file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<PersistedState>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let raw: RawEnvelope = serde_json::from_str(&text)?;
        if raw.version != STATE_VERSION {
            return Err(Error::UnsupportedVersion(raw.version));
        }
        let state = serde_json::from_value(raw.state)?;
        debug!("loaded state from {}", self.path.display());
        Ok(Some(state))
    }

    /// Write the state, replacing the previous record in one rename.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(&Envelope {
            version: STATE_VERSION,
            state,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!("saved state to {}", self.path.display());
        Ok(())
    }
}
