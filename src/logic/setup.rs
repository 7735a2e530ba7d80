//! Setup: build round 1 from a drawn roster.

use crate::models::{Player, Tournament};

/// Start a tournament from players in pairing order (already drawn by the caller).
///
/// The roster is trusted: its size must be a power of two and at least 2, which
/// [`Roster`](crate::roster::Roster) checks before anything reaches here.
pub fn initialize(players: Vec<Player>) -> Tournament {
    let tournament = Tournament::with_players(players);
    log::info!(
        "Tournament {} started with {} players ({})",
        tournament.id,
        tournament.original_players.len(),
        tournament.current_label().unwrap_or_default()
    );
    tournament
}
