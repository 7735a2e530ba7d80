//! Tournament (the full bracket state) and TournamentError.

use crate::models::pairing::{Pairing, PairingId};
use crate::models::player::Player;
use crate::models::round::{round_names, Round, RoundKind, RoundName};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a pairing could not take a result.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PairingFault {
    /// No pairing with this id in the current round.
    NotFound(PairingId),
    /// The pairing already has a winner.
    AlreadyDecided(PairingId),
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Unknown or already decided pairing. Re-read the current round before retrying.
    InvalidPairingState(PairingFault),
    /// Not all pairings in the current round have a winner.
    IncompleteResults,
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// The bracket snapshot is corrupted (e.g. semifinal winners missing); reset the tournament.
    InconsistentBracketState(String),
    /// Roster contains no players.
    RosterEmpty,
    /// Roster size is not a power of two; `missing` more entrants reach `required`.
    RosterInvalid {
        found: usize,
        required: usize,
        missing: usize,
    },
    /// Roster source could not be read.
    RosterUnreadable(String),
    /// Two roster entries share a name (names are unique, case-insensitive).
    DuplicatePlayerName(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidPairingState(PairingFault::NotFound(_)) => {
                write!(f, "Pairing not found in the current round")
            }
            TournamentError::InvalidPairingState(PairingFault::AlreadyDecided(_)) => {
                write!(f, "Pairing already has a winner")
            }
            TournamentError::IncompleteResults => write!(f, "Not all pairings have a winner"),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::InconsistentBracketState(detail) => {
                write!(f, "Bracket corrupted, please reset ({})", detail)
            }
            TournamentError::RosterEmpty => write!(f, "No players found in the roster"),
            TournamentError::RosterInvalid {
                found,
                required,
                missing,
            } => write!(
                f,
                "Invalid number of players: found {}, need {} ({} missing)",
                found, required, missing
            ),
            TournamentError::RosterUnreadable(reason) => {
                write!(f, "Could not read roster: {}", reason)
            }
            TournamentError::DuplicatePlayerName(name) => {
                write!(f, "A player named {} is already in the roster", name)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament (also the state store key).
pub type TournamentId = Uuid;

/// Whether the bracket is still being played or has produced its ranking.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    #[default]
    Active,
    Completed,
}

/// One player knocked out in one bracket round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Elimination {
    pub player: Player,
    pub round: RoundName,
}

/// Full tournament state: roster, live round, history, third-place splice, and placements.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// Players in drawn order; round 1 pairs them consecutively.
    pub original_players: Vec<Player>,
    pub phase: TournamentPhase,
    /// 1-based index of the live round, counting the third-place round.
    pub round_index: usize,
    /// None once the tournament is completed.
    pub current_round: Option<Round>,
    /// Completed rounds, oldest first.
    pub history: Vec<Round>,
    /// Elimination event log, in the order results were applied.
    pub eliminations: Vec<Elimination>,
    pub semifinal_winners: Vec<Player>,
    pub semifinal_losers: Vec<Player>,
    pub third_place_pairing: Option<Pairing>,
    pub third_place_active: bool,
    pub champion: Option<Player>,
    pub second_place: Option<Player>,
    pub third_place: Option<Player>,
}

impl Tournament {
    /// Create an active tournament whose round 1 pairs `players` two by two, in the given order.
    pub fn with_players(players: Vec<Player>) -> Self {
        let first = RoundName::for_player_count(players.len());
        let round = Round::new(
            1,
            RoundKind::Bracket(first),
            Pairing::pair_consecutive(&players),
        );
        Self {
            id: Uuid::new_v4(),
            original_players: players,
            phase: TournamentPhase::Active,
            round_index: 1,
            current_round: Some(round),
            history: Vec::new(),
            eliminations: Vec::new(),
            semifinal_winners: Vec::new(),
            semifinal_losers: Vec::new(),
            third_place_pairing: None,
            third_place_active: false,
            champion: None,
            second_place: None,
            third_place: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == TournamentPhase::Active
    }

    pub fn is_completed(&self) -> bool {
        self.phase == TournamentPhase::Completed
    }

    /// Bracket round labels for this tournament's starting size.
    pub fn round_names(&self) -> Vec<RoundName> {
        round_names(self.original_players.len())
    }

    /// Label of the live round ("Third Place" while the consolation match is up).
    pub fn current_label(&self) -> Option<String> {
        self.current_round.as_ref().map(Round::label)
    }

    /// Mutable access to the live round; errors once the tournament is over.
    pub fn current_round_mut(&mut self) -> Result<&mut Round, TournamentError> {
        if !self.is_active() {
            return Err(TournamentError::InvalidState);
        }
        self.current_round
            .as_mut()
            .ok_or(TournamentError::InvalidState)
    }

    /// Name of the next bracket round, by its position among bracket rounds played so far.
    /// `entering` is only used when the table has no entry (state not built from a power of two).
    pub(crate) fn next_bracket_round_name(&self, entering: usize) -> RoundName {
        let played = self
            .history
            .iter()
            .filter(|r| matches!(r.kind, RoundKind::Bracket(_)))
            .count();
        self.round_names()
            .get(played)
            .copied()
            .unwrap_or_else(|| RoundName::for_player_count(entering))
    }

    /// Per-round loser lists derived from the elimination log, in bracket order.
    pub fn losers_by_round(&self) -> Vec<(RoundName, Vec<Player>)> {
        let mut buckets: Vec<(RoundName, Vec<Player>)> = Vec::new();
        for e in &self.eliminations {
            match buckets.iter_mut().find(|(round, _)| *round == e.round) {
                Some((_, players)) => players.push(e.player.clone()),
                None => buckets.push((e.round, vec![e.player.clone()])),
            }
        }
        buckets
    }

    /// Full reset: same tournament id and drawn order, every result discarded.
    pub fn reset(&mut self) {
        let id = self.id;
        let players = std::mem::take(&mut self.original_players);
        *self = Self {
            id,
            ..Self::with_players(players)
        };
    }
}
