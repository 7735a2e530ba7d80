//! State store: whole-snapshot persistence of tournaments, keyed by tournament id.
//!
//! Snapshots are only ever written or read whole. Callers save after a mutation has completed;
//! a failed save never rolls back the in-memory tournament.

use crate::models::{Tournament, TournamentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Errors from reading or writing snapshots.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serde(serde_json::Error),
    /// Lock poisoned (in-memory store).
    Lock,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "State store I/O error: {}", e),
            StoreError::Serde(e) => write!(f, "Corrupted tournament snapshot: {}", e),
            StoreError::Lock => write!(f, "State store lock error"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serde(e)
    }
}

/// What is persisted: the full tournament plus when it was saved.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub tournament: Tournament,
    pub saved_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            saved_at: Utc::now(),
        }
    }

    /// Worth restoring: still being played, or finished with a champion.
    fn is_restorable(&self) -> bool {
        self.tournament.is_active() || self.tournament.champion.is_some()
    }
}

/// Durable key/value store of tournament snapshots.
pub trait StateStore: Send + Sync {
    fn save(&self, tournament: &Tournament) -> Result<Snapshot, StoreError>;
    /// `Ok(None)` when nothing (restorable) is stored under `id`.
    fn load(&self, id: TournamentId) -> Result<Option<Snapshot>, StoreError>;
    /// Succeeds when nothing is stored.
    fn clear(&self, id: TournamentId) -> Result<(), StoreError>;
    /// Every restorable snapshot, for startup.
    fn load_all(&self) -> Result<Vec<Snapshot>, StoreError>;
}

/// One pretty-printed JSON file per tournament under a directory.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: TournamentId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn read(path: &Path) -> Result<Option<Snapshot>, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot).filter(Snapshot::is_restorable))
    }
}

impl StateStore for JsonFileStore {
    fn save(&self, tournament: &Tournament) -> Result<Snapshot, StoreError> {
        fs::create_dir_all(&self.dir)?;
        let snapshot = Snapshot::new(tournament.clone());
        let json = serde_json::to_string_pretty(&snapshot)?;
        // Write then rename so a reader never sees a half-written file.
        let path = self.path_for(tournament.id);
        let tmp = path.with_extension(format!("json.{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Saved tournament {} to {}", tournament.id, path.display());
        Ok(snapshot)
    }

    fn load(&self, id: TournamentId) -> Result<Option<Snapshot>, StoreError> {
        Self::read(&self.path_for(id))
    }

    fn clear(&self, id: TournamentId) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn load_all(&self) -> Result<Vec<Snapshot>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut snapshots = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read(&path) {
                Ok(Some(snapshot)) => snapshots.push(snapshot),
                Ok(None) => {}
                Err(e) => log::warn!("Skipping snapshot {}: {}", path.display(), e),
            }
        }
        Ok(snapshots)
    }
}

enum WriteCommand {
    Save(Box<Tournament>),
    Clear(TournamentId),
}

/// Fire-and-forget front of a [`StateStore`]: one background task applies saves and clears in
/// the order they were queued, so an older snapshot never lands after a newer one or a clear.
#[derive(Clone)]
pub struct SnapshotWriter {
    tx: mpsc::UnboundedSender<WriteCommand>,
}

impl SnapshotWriter {
    /// Start the writer task on the current tokio runtime. The task ends once every
    /// `SnapshotWriter` clone is dropped and the queue is drained.
    pub fn spawn(store: Arc<dyn StateStore>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteCommand>();
        let handle = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                let store = Arc::clone(&store);
                let written =
                    tokio::task::spawn_blocking(move || apply(store.as_ref(), command)).await;
                if let Err(e) = written {
                    log::error!("Snapshot write task failed: {}", e);
                }
            }
            log::debug!("Snapshot writer stopped");
        });
        (Self { tx }, handle)
    }

    /// Queue a save of the tournament as it is now.
    pub fn save(&self, tournament: &Tournament) {
        self.send(WriteCommand::Save(Box::new(tournament.clone())));
    }

    /// Queue removal of a tournament's snapshot, after any save already queued for it.
    pub fn clear(&self, id: TournamentId) {
        self.send(WriteCommand::Clear(id));
    }

    fn send(&self, command: WriteCommand) {
        if self.tx.send(command).is_err() {
            log::error!("Snapshot writer is gone, change not persisted");
        }
    }
}

fn apply(store: &dyn StateStore, command: WriteCommand) {
    match command {
        WriteCommand::Save(tournament) => {
            if let Err(e) = store.save(&tournament) {
                log::error!("Failed to save tournament {}: {}", tournament.id, e);
            }
        }
        WriteCommand::Clear(id) => {
            if let Err(e) = store.clear(id) {
                log::error!("Failed to clear snapshot of tournament {}: {}", id, e);
            }
        }
    }
}

/// In-memory store (tests, or running without a state directory).
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: RwLock<HashMap<TournamentId, Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn save(&self, tournament: &Tournament) -> Result<Snapshot, StoreError> {
        let snapshot = Snapshot::new(tournament.clone());
        self.snapshots
            .write()
            .map_err(|_| StoreError::Lock)?
            .insert(tournament.id, snapshot.clone());
        Ok(snapshot)
    }

    fn load(&self, id: TournamentId) -> Result<Option<Snapshot>, StoreError> {
        let g = self.snapshots.read().map_err(|_| StoreError::Lock)?;
        Ok(g.get(&id).cloned().filter(Snapshot::is_restorable))
    }

    fn clear(&self, id: TournamentId) -> Result<(), StoreError> {
        self.snapshots
            .write()
            .map_err(|_| StoreError::Lock)?
            .remove(&id);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Snapshot>, StoreError> {
        let g = self.snapshots.read().map_err(|_| StoreError::Lock)?;
        Ok(g.values().filter(|s| s.is_restorable()).cloned().collect())
    }
}
