//! Bracket business logic: setup, round transitions, third place and final, ranking.

mod finals;
mod ranking;
mod rounds;
mod setup;

pub use finals::{advance_to_final, record_final_winner, record_third_place_winner};
pub use ranking::{generate_ranking, position_for_elimination};
pub use rounds::{complete_round, record_winner, Transition};
pub use setup::initialize;
