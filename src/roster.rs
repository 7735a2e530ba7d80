//! Roster provider: entrants for a bracket, validated to a power-of-two count, and the random draw.

use crate::models::{Player, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::Read;
use std::path::Path;

/// A validated list of entrants: non-empty, unique names, power-of-two count.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster from raw names. Names are trimmed and blank ones dropped.
    /// Names must be unique (case-insensitive).
    pub fn new<I, S>(names: I) -> Result<Self, TournamentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut players: Vec<Player> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if players.iter().any(|p| p.name().eq_ignore_ascii_case(name)) {
                return Err(TournamentError::DuplicatePlayerName(name.to_string()));
            }
            players.push(Player::new(name));
        }

        let found = players.len();
        if found == 0 {
            return Err(TournamentError::RosterEmpty);
        }
        if found < 2 || !found.is_power_of_two() {
            let required = found.max(2).next_power_of_two();
            return Err(TournamentError::RosterInvalid {
                found,
                required,
                missing: required - found,
            });
        }
        Ok(Self { players })
    }

    /// Read a roster from CSV with a header row. The player name is taken from `name_column`;
    /// rows without it are skipped.
    pub fn from_csv_reader<R: Read>(reader: R, name_column: usize) -> Result<Self, TournamentError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let mut names = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| TournamentError::RosterUnreadable(e.to_string()))?;
            if let Some(name) = record.get(name_column) {
                names.push(name.to_string());
            }
        }
        Self::new(names)
    }

    pub fn from_csv_path(path: impl AsRef<Path>, name_column: usize) -> Result<Self, TournamentError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            TournamentError::RosterUnreadable(format!("{}: {}", path.display(), e))
        })?;
        Self::from_csv_reader(file, name_column)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Shuffle the entrants into pairing order for round 1.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Player> {
        let mut players = self.players.clone();
        players.shuffle(rng);
        players
    }
}
