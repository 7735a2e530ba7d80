//! Single-elimination 1v1 bracket web app: library with models, bracket logic, roster and state store.

pub mod config;
pub mod logic;
pub mod models;
pub mod roster;
pub mod store;

pub use logic::{
    advance_to_final, complete_round, generate_ranking, initialize, position_for_elimination,
    record_final_winner, record_third_place_winner, record_winner, Transition,
};
pub use models::{
    round_names, Elimination, MatchResult, Pairing, PairingFault, PairingId, Player, RankingEntry,
    Round, RoundKind, RoundName, Side, Tournament, TournamentError, TournamentId, TournamentPhase,
};
pub use roster::Roster;
pub use store::{JsonFileStore, MemoryStore, Snapshot, SnapshotWriter, StateStore, StoreError};
