//! Final ranking, rebuilt from placements and the elimination log on every call.
//!
//! Places 1-4 are exact. Everyone else shares a position with the players knocked out in the
//! same round; there is no ordering inside such a bucket beyond the order results came in.

use crate::models::{Player, RankingEntry, RoundName, Tournament, TournamentError};
use std::collections::HashSet;

/// Players the ranking cannot place are treated as round-of-16 exits.
const UNCLASSIFIED_ROUND: RoundName = RoundName::RoundOf16;

/// Build the ranking of a completed tournament. Pure: repeated calls give identical output.
pub fn generate_ranking(tournament: &Tournament) -> Result<Vec<RankingEntry>, TournamentError> {
    if !tournament.is_completed() {
        return Err(TournamentError::InvalidState);
    }
    let total = tournament.original_players.len();
    let mut ranking = Vec::new();
    let mut placed: HashSet<&Player> = HashSet::new();

    if let Some(champion) = &tournament.champion {
        ranking.push(RankingEntry::new(1, champion.clone(), "Champion"));
        placed.insert(champion);
    }
    if let Some(second) = &tournament.second_place {
        ranking.push(RankingEntry::new(2, second.clone(), "Runner-up"));
        placed.insert(second);
    }

    // Without a recorded third-place result the first semifinal loser takes third.
    let semifinal_losers: &[Player] = if tournament.semifinal_losers.len() == 2 {
        &tournament.semifinal_losers
    } else {
        &[]
    };
    let third = tournament
        .third_place
        .as_ref()
        .or_else(|| semifinal_losers.first());
    if let Some(third) = third {
        if placed.insert(third) {
            ranking.push(RankingEntry::new(3, third.clone(), "Third place"));
        }
    }
    for loser in semifinal_losers {
        if placed.insert(loser) {
            ranking.push(RankingEntry::new(4, loser.clone(), "Fourth place"));
        }
    }

    let mut rest: Vec<RankingEntry> = Vec::new();
    for elimination in &tournament.eliminations {
        if placed.insert(&elimination.player) {
            rest.push(bucket_entry(total, &elimination.player, elimination.round));
        }
    }
    for player in &tournament.original_players {
        if placed.insert(player) {
            log::warn!(
                "Tournament {}: {} has no recorded elimination, ranked as {} exit",
                tournament.id,
                player,
                UNCLASSIFIED_ROUND
            );
            rest.push(bucket_entry(total, player, UNCLASSIFIED_ROUND));
        }
    }
    rest.sort_by_key(|entry| entry.position);
    ranking.extend(rest);
    Ok(ranking)
}

fn bucket_entry(total: usize, player: &Player, round: RoundName) -> RankingEntry {
    RankingEntry::new(
        position_for_elimination(total, round),
        player.clone(),
        format!("Eliminated in {}", round),
    )
}

/// Shared position for players knocked out in `round` of a bracket that started with `total`.
///
/// Rounds the table does not list (earlier rounds of very large brackets, or rounds that do not
/// exist for this size) land on the last listed position.
pub fn position_for_elimination(total: usize, round: RoundName) -> u32 {
    let (table, fallback) = match total {
        t if t >= 32 => (POSITIONS_32, 7),
        t if t >= 16 => (POSITIONS_16, 6),
        t if t >= 8 => (POSITIONS_8, 5),
        _ => (POSITIONS_4, 4),
    };
    table
        .iter()
        .find(|(name, _)| *name == round)
        .map_or(fallback, |(_, position)| *position)
}

const POSITIONS_32: &[(RoundName, u32)] = &[
    (RoundName::RoundOf32, 7),
    (RoundName::RoundOf16, 6),
    (RoundName::Quarterfinal, 5),
    (RoundName::Semifinal, 4),
];
const POSITIONS_16: &[(RoundName, u32)] = &[
    (RoundName::RoundOf16, 6),
    (RoundName::Quarterfinal, 5),
    (RoundName::Semifinal, 4),
];
const POSITIONS_8: &[(RoundName, u32)] = &[(RoundName::Quarterfinal, 5), (RoundName::Semifinal, 4)];
const POSITIONS_4: &[(RoundName, u32)] = &[(RoundName::Semifinal, 4)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_scale_with_bracket_size() {
        assert_eq!(position_for_elimination(32, RoundName::RoundOf32), 7);
        assert_eq!(position_for_elimination(32, RoundName::RoundOf16), 6);
        assert_eq!(position_for_elimination(16, RoundName::RoundOf16), 6);
        assert_eq!(position_for_elimination(16, RoundName::Quarterfinal), 5);
        assert_eq!(position_for_elimination(8, RoundName::Quarterfinal), 5);
        assert_eq!(position_for_elimination(4, RoundName::Semifinal), 4);
    }

    #[test]
    fn unlisted_rounds_use_the_last_bucket() {
        assert_eq!(position_for_elimination(64, RoundName::Nth(64)), 7);
        assert_eq!(position_for_elimination(8, RoundName::RoundOf16), 5);
        assert_eq!(position_for_elimination(4, RoundName::Quarterfinal), 4);
    }
}
