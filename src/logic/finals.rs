//! End of the bracket: third-place splice after the semifinal, the final, and the champion.

use crate::logic::rounds::{complete_round, record_winner, start_round, Transition};
use crate::models::{
    Pairing, Player, RoundKind, RoundName, Side, Tournament, TournamentError, TournamentPhase,
};

/// Snapshot the semifinal and make the losers' match the only pairing of the next round.
pub(crate) fn splice_third_place(
    tournament: &mut Tournament,
    winners: Vec<Player>,
    losers: Vec<Player>,
) {
    let pairing = Pairing::new(losers[0].clone(), losers[1].clone());
    tournament.semifinal_winners = winners;
    tournament.semifinal_losers = losers;
    tournament.third_place_active = true;
    tournament.third_place_pairing = Some(pairing.clone());
    start_round(tournament, RoundKind::ThirdPlace, vec![pairing]);
}

/// Close the third-place match and open the final between the snapshotted semifinal winners.
///
/// The final is always built from `semifinal_winners`; if that snapshot does not hold exactly
/// two players the bracket is corrupted and no fallback pairing is guessed.
pub fn advance_to_final(tournament: &mut Tournament) -> Result<Transition, TournamentError> {
    if !tournament.is_active() {
        return Err(TournamentError::InvalidState);
    }
    if tournament.semifinal_winners.len() != 2 {
        log::warn!(
            "Tournament {}: cannot build final from {} semifinal winner(s)",
            tournament.id,
            tournament.semifinal_winners.len()
        );
        return Err(TournamentError::InconsistentBracketState(format!(
            "expected 2 semifinal winners, found {}",
            tournament.semifinal_winners.len()
        )));
    }
    let (pairing, third) = match tournament.current_round.as_ref() {
        Some(round) if round.kind == RoundKind::ThirdPlace => {
            let pairing = round.pairings.first().ok_or_else(|| {
                TournamentError::InconsistentBracketState(
                    "third-place round has no pairing".to_string(),
                )
            })?;
            let third = pairing
                .winner()
                .cloned()
                .ok_or(TournamentError::IncompleteResults)?;
            (pairing.clone(), third)
        }
        _ => return Err(TournamentError::InvalidState),
    };

    if let Some(round) = tournament.current_round.take() {
        tournament.history.push(round);
    }
    log::info!("Tournament {}: third place goes to {}", tournament.id, third);
    tournament.third_place = Some(third);
    tournament.third_place_pairing = Some(pairing);
    tournament.third_place_active = false;

    let final_pairing = Pairing::new(
        tournament.semifinal_winners[0].clone(),
        tournament.semifinal_winners[1].clone(),
    );
    start_round(
        tournament,
        RoundKind::Bracket(RoundName::Final),
        vec![final_pairing],
    );
    Ok(Transition::Final)
}

/// Close the final: champion and runner-up are set and the tournament ends.
pub(crate) fn complete_final(tournament: &mut Tournament) -> Result<Transition, TournamentError> {
    let result = tournament
        .current_round
        .as_ref()
        .and_then(|round| round.pairings.first())
        .and_then(|pairing| pairing.result.clone())
        .ok_or(TournamentError::IncompleteResults)?;

    if let Some(round) = tournament.current_round.take() {
        tournament.history.push(round);
    }
    log::info!(
        "Tournament {}: {} is champion, {} runner-up",
        tournament.id,
        result.winner,
        result.loser
    );
    tournament.champion = Some(result.winner);
    tournament.second_place = Some(result.loser);
    tournament.third_place_active = false;
    tournament.phase = TournamentPhase::Completed;
    Ok(Transition::Completed)
}

/// Record the third-place winner and move straight on to the final.
pub fn record_third_place_winner(
    tournament: &mut Tournament,
    side: Side,
) -> Result<Transition, TournamentError> {
    if !tournament.third_place_active {
        return Err(TournamentError::InvalidState);
    }
    let pairing_id = tournament
        .current_round
        .as_ref()
        .filter(|round| round.kind == RoundKind::ThirdPlace)
        .and_then(|round| round.pairings.first())
        .map(|pairing| pairing.id)
        .ok_or(TournamentError::InvalidState)?;
    record_winner(tournament, pairing_id, side)?;
    complete_round(tournament)
}

/// Record the final's winner and end the tournament.
pub fn record_final_winner(
    tournament: &mut Tournament,
    side: Side,
) -> Result<Transition, TournamentError> {
    let pairing_id = tournament
        .current_round
        .as_ref()
        .filter(|round| round.kind.is_final())
        .and_then(|round| round.pairings.first())
        .map(|pairing| pairing.id)
        .ok_or(TournamentError::InvalidState)?;
    record_winner(tournament, pairing_id, side)?;
    complete_round(tournament)
}
