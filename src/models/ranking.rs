//! Final ranking entry.

use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// One row of the final ranking. Positions above 4 are shared by everyone knocked out in the
/// same round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub position: u32,
    pub player: Player,
    pub label: String,
    pub medal: String,
}

impl RankingEntry {
    pub fn new(position: u32, player: Player, label: impl Into<String>) -> Self {
        Self {
            position,
            player,
            label: label.into(),
            medal: medal_for(position).to_string(),
        }
    }
}

fn medal_for(position: u32) -> &'static str {
    match position {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        4..=8 => "🏅",
        _ => "📊",
    }
}
