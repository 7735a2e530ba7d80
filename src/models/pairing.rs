//! Pairing (1v1 match), Side, and MatchResult.

use crate::models::player::Player;
use crate::models::tournament::{PairingFault, TournamentError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a pairing.
pub type PairingId = Uuid;

/// Which side of a pairing won.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

/// Outcome of a decided pairing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Player,
    pub loser: Player,
}

/// Two players facing each other in one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub id: PairingId,
    pub player_1: Player,
    pub player_2: Player,
    /// None while undecided.
    pub result: Option<MatchResult>,
}

impl Pairing {
    pub fn new(player_1: Player, player_2: Player) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_1,
            player_2,
            result: None,
        }
    }

    /// Pair up players two by two, left to right.
    ///
    /// Callers only pass even counts. A trailing odd player has no opponent and is left out of
    /// the pairings with a warning.
    pub fn pair_consecutive(players: &[Player]) -> Vec<Pairing> {
        let pairs = players.chunks_exact(2);
        if let [unpaired] = pairs.remainder() {
            log::warn!("{} has no opponent and is left unpaired", unpaired);
        }
        pairs
            .map(|pair| Pairing::new(pair[0].clone(), pair[1].clone()))
            .collect()
    }

    pub fn is_decided(&self) -> bool {
        self.result.is_some()
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::One => &self.player_1,
            Side::Two => &self.player_2,
        }
    }

    pub fn winner(&self) -> Option<&Player> {
        self.result.as_ref().map(|r| &r.winner)
    }

    pub fn loser(&self) -> Option<&Player> {
        self.result.as_ref().map(|r| &r.loser)
    }

    /// Mark the pairing decided. A pairing is decided exactly once.
    pub fn decide(&mut self, side: Side) -> Result<&MatchResult, TournamentError> {
        if self.is_decided() {
            return Err(TournamentError::InvalidPairingState(
                PairingFault::AlreadyDecided(self.id),
            ));
        }
        let (winner, loser) = match side {
            Side::One => (self.player_1.clone(), self.player_2.clone()),
            Side::Two => (self.player_2.clone(), self.player_1.clone()),
        };
        Ok(self.result.insert(MatchResult { winner, loser }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<Player> {
        names.iter().map(|n| Player::new(*n)).collect()
    }

    #[test]
    fn pairs_neighbours_in_order() {
        let pairings = Pairing::pair_consecutive(&roster(&["A", "B", "C", "D"]));
        let names: Vec<_> = pairings
            .iter()
            .map(|p| (p.player_1.name(), p.player_2.name()))
            .collect();
        assert_eq!(names, vec![("A", "B"), ("C", "D")]);
        assert!(pairings.iter().all(|p| !p.is_decided()));
    }

    #[test]
    fn odd_player_out_gets_no_pairing() {
        let pairings = Pairing::pair_consecutive(&roster(&["A", "B", "C"]));
        assert_eq!(pairings.len(), 1);
        assert!(pairings.iter().all(|p| p.player_1.name() != "C" && p.player_2.name() != "C"));
    }

    #[test]
    fn a_pairing_is_decided_once() {
        let mut pairing = Pairing::new(Player::new("A"), Player::new("B"));
        let id = pairing.id;
        assert!(pairing.decide(Side::Two).is_ok());
        assert_eq!(
            pairing.decide(Side::One),
            Err(TournamentError::InvalidPairingState(
                PairingFault::AlreadyDecided(id)
            ))
        );
        assert_eq!(pairing.winner().map(Player::name), Some("B"));
        assert_eq!(pairing.loser().map(Player::name), Some("A"));
    }
}
