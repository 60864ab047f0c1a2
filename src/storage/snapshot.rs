//! JSON snapshot of a league: roster plus fixtures.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::StorageError;
use crate::models::{Fixture, Participant, ParticipantId};

/// Everything needed to re-derive the schedule view and the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub participants: Vec<Participant>,

    pub fixtures: Vec<Fixture>,

    /// When the snapshot was last written
    pub saved_at: DateTime<Utc>,
}

impl LeagueSnapshot {
    pub fn new(participants: Vec<Participant>, fixtures: Vec<Fixture>) -> Self {
        Self {
            participants,
            fixtures,
            saved_at: Utc::now(),
        }
    }

    pub fn participant_name(&self, id: ParticipantId) -> &str {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
            .unwrap_or("?")
    }
}

/// Reads and writes a [`LeagueSnapshot`] at a fixed path.
#[derive(Debug, Clone)]
pub struct LeagueStore {
    path: PathBuf,
}

impl LeagueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<LeagueSnapshot, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let snapshot: LeagueSnapshot = serde_json::from_reader(BufReader::new(file))?;

        debug!(
            "Loaded {} participants and {} fixtures from {:?}",
            snapshot.participants.len(),
            snapshot.fixtures.len(),
            self.path
        );
        Ok(snapshot)
    }

    /// Write the snapshot, replacing any existing file. Stamps `saved_at`.
    pub fn save(&self, snapshot: &mut LeagueSnapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        snapshot.saved_at = Utc::now();

        // Written to a sibling temp file, then renamed into place.
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        info!("Saved league to {:?}", self.path);
        Ok(())
    }

    /// Delete the snapshot. Returns whether a file was removed.
    pub fn remove(&self) -> Result<bool, StorageError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        info!("Removed league at {:?}", self.path);
        Ok(true)
    }
}
