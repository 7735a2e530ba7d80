//! Data structures for the bracket: players, pairings, rounds, tournament state, ranking.

mod pairing;
mod player;
mod ranking;
mod round;
mod tournament;

pub use pairing::{MatchResult, Pairing, PairingId, Side};
pub use player::Player;
pub use ranking::RankingEntry;
pub use round::{round_names, Round, RoundKind, RoundName};
pub use tournament::{
    Elimination, PairingFault, Tournament, TournamentError, TournamentId, TournamentPhase,
};
