//! Shared helpers for integration tests.
#![allow(dead_code)]

use bracket_tournament_web::{
    complete_round, initialize, record_winner, Player, Side, Tournament, Transition,
};

pub fn players(names: &[&str]) -> Vec<Player> {
    names.iter().map(|n| Player::new(*n)).collect()
}

/// `n` players named P0, P1, ... in that pairing order.
pub fn numbered_players(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"))).collect()
}

/// Decide every pairing of the live round for `side`, then complete the round.
pub fn play_round(t: &mut Tournament, side: Side) -> Transition {
    let ids: Vec<_> = t
        .current_round
        .as_ref()
        .expect("live round")
        .pairings
        .iter()
        .map(|p| p.id)
        .collect();
    for id in ids {
        record_winner(t, id, side).unwrap();
    }
    complete_round(t).unwrap()
}

/// Play a whole bracket where side one always wins. Returns the live labels seen, in order.
pub fn play_out(t: &mut Tournament) -> Vec<String> {
    let mut labels = Vec::new();
    for _ in 0..64 {
        let Some(label) = t.current_label() else {
            return labels;
        };
        labels.push(label);
        play_round(t, Side::One);
    }
    panic!("bracket did not terminate");
}

pub fn completed(n: usize) -> Tournament {
    let mut t = initialize(numbered_players(n));
    play_out(&mut t);
    t
}
