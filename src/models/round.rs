//! Round, RoundKind, and the round-name table.

use crate::models::pairing::{Pairing, PairingId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic name of a bracket round, derived from the number of players entering it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundName {
    Final,
    Semifinal,
    Quarterfinal,
    RoundOf16,
    RoundOf32,
    /// Any other entering player count.
    Nth(usize),
}

impl RoundName {
    /// Name of the round entered by `players` players.
    pub fn for_player_count(players: usize) -> Self {
        match players {
            2 => RoundName::Final,
            4 => RoundName::Semifinal,
            8 => RoundName::Quarterfinal,
            16 => RoundName::RoundOf16,
            32 => RoundName::RoundOf32,
            n => RoundName::Nth(n),
        }
    }

    pub fn label(&self) -> String {
        match self {
            RoundName::Final => "Final".to_string(),
            RoundName::Semifinal => "Semifinal".to_string(),
            RoundName::Quarterfinal => "Quarterfinal".to_string(),
            RoundName::RoundOf16 => "Round of 16".to_string(),
            RoundName::RoundOf32 => "Round of 32".to_string(),
            RoundName::Nth(n) => format!("{n}-th Round"),
        }
    }
}

impl fmt::Display for RoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Round labels for a whole tournament, one per bracket round, by halving the starting player count.
///
/// `round_names(8)` is `[Quarterfinal, Semifinal, Final]`. The third-place round is not part of
/// this table; it is spliced in live between the semifinal and the final.
pub fn round_names(total_players_at_start: usize) -> Vec<RoundName> {
    let mut names = Vec::new();
    let mut players = total_players_at_start;
    while players > 1 {
        names.push(RoundName::for_player_count(players));
        players /= 2;
    }
    names
}

/// What a live round is: a regular bracket round or the spliced third-place match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    Bracket(RoundName),
    ThirdPlace,
}

impl RoundKind {
    pub fn label(&self) -> String {
        match self {
            RoundKind::Bracket(name) => name.label(),
            RoundKind::ThirdPlace => "Third Place".to_string(),
        }
    }

    pub fn is_final(&self) -> bool {
        *self == RoundKind::Bracket(RoundName::Final)
    }
}

/// One live round: ordered pairings plus its 1-based index and kind.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub index: usize,
    pub kind: RoundKind,
    pub pairings: Vec<Pairing>,
}

impl Round {
    pub fn new(index: usize, kind: RoundKind, pairings: Vec<Pairing>) -> Self {
        Self {
            index,
            kind,
            pairings,
        }
    }

    pub fn label(&self) -> String {
        self.kind.label()
    }

    pub fn is_complete(&self) -> bool {
        self.pairings.iter().all(Pairing::is_decided)
    }

    pub fn pairing_mut(&mut self, id: PairingId) -> Option<&mut Pairing> {
        self.pairings.iter_mut().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_for_32_players() {
        assert_eq!(
            round_names(32),
            vec![
                RoundName::RoundOf32,
                RoundName::RoundOf16,
                RoundName::Quarterfinal,
                RoundName::Semifinal,
                RoundName::Final,
            ]
        );
    }

    #[test]
    fn larger_brackets_fall_back_to_generic_label() {
        let names = round_names(64);
        assert_eq!(names[0], RoundName::Nth(64));
        assert_eq!(names[0].label(), "64-th Round");
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn two_players_is_just_the_final() {
        assert_eq!(round_names(2), vec![RoundName::Final]);
        assert!(round_names(1).is_empty());
    }
}
