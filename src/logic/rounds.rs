//! Bracket rounds: recording winners and turning a finished round into the next one.

use crate::logic::finals::{advance_to_final, complete_final, splice_third_place};
use crate::models::{
    Elimination, Pairing, PairingFault, PairingId, Player, Round, RoundKind, RoundName, Side,
    Tournament, TournamentError, TournamentPhase,
};

/// Where `complete_round` moved the bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    /// A regular bracket round is now live.
    NextRound(RoundName),
    /// Semifinal done; the third-place match is now live.
    ThirdPlace,
    /// The final is now live.
    Final,
    /// Champion decided, ranking available.
    Completed,
}

/// Record the winner of one pairing in the live round. Does not advance the round.
pub fn record_winner(
    tournament: &mut Tournament,
    pairing_id: PairingId,
    side: Side,
) -> Result<(), TournamentError> {
    let round = tournament.current_round_mut()?;
    let label = round.label();
    let pairing = round
        .pairing_mut(pairing_id)
        .ok_or(TournamentError::InvalidPairingState(PairingFault::NotFound(
            pairing_id,
        )))?;
    let result = pairing.decide(side)?;
    log::debug!("{}: {} beat {}", label, result.winner, result.loser);
    Ok(())
}

/// Complete the live round once every pairing has a winner.
///
/// Dispatches on the round kind: the third-place match advances to the final, the final ends
/// the tournament, and any other bracket round pairs its winners up for the next round.
pub fn complete_round(tournament: &mut Tournament) -> Result<Transition, TournamentError> {
    let round = tournament.current_round_mut()?;
    if !round.is_complete() {
        return Err(TournamentError::IncompleteResults);
    }
    let kind = round.kind;
    if tournament.third_place_active != (kind == RoundKind::ThirdPlace) {
        log::warn!(
            "Tournament {}: third-place flag does not match live round {}",
            tournament.id,
            kind.label()
        );
        return Err(TournamentError::InconsistentBracketState(
            "third-place flag does not match the live round".to_string(),
        ));
    }
    match kind {
        RoundKind::ThirdPlace => advance_to_final(tournament),
        RoundKind::Bracket(RoundName::Final) => complete_final(tournament),
        RoundKind::Bracket(name) => advance_bracket(tournament, name),
    }
}

/// Winners and losers of a decided round, in pairing order.
pub(crate) fn split_results(round: &Round) -> (Vec<Player>, Vec<Player>) {
    round
        .pairings
        .iter()
        .filter_map(|p| p.result.as_ref())
        .map(|r| (r.winner.clone(), r.loser.clone()))
        .unzip()
}

/// Open the next live round.
pub(crate) fn start_round(tournament: &mut Tournament, kind: RoundKind, pairings: Vec<Pairing>) {
    tournament.round_index += 1;
    tournament.current_round = Some(Round::new(tournament.round_index, kind, pairings));
    log::info!(
        "Tournament {}: round {} ({}) with {} pairing(s)",
        tournament.id,
        tournament.round_index,
        kind.label(),
        tournament
            .current_round
            .as_ref()
            .map_or(0, |r| r.pairings.len())
    );
}

fn advance_bracket(
    tournament: &mut Tournament,
    name: RoundName,
) -> Result<Transition, TournamentError> {
    let (winners, losers) = match tournament.current_round.as_ref() {
        Some(round) => split_results(round),
        None => return Err(TournamentError::InvalidState),
    };
    if winners.is_empty() {
        return Err(TournamentError::InconsistentBracketState(format!(
            "{} has no pairings",
            name
        )));
    }
    if name == RoundName::Semifinal && losers.len() != 2 {
        return Err(TournamentError::InconsistentBracketState(format!(
            "semifinal produced {} losers",
            losers.len()
        )));
    }

    tournament
        .eliminations
        .extend(losers.iter().map(|player| Elimination {
            player: player.clone(),
            round: name,
        }));
    if let Some(round) = tournament.current_round.take() {
        tournament.history.push(round);
    }

    if name == RoundName::Semifinal {
        splice_third_place(tournament, winners, losers);
        return Ok(Transition::ThirdPlace);
    }

    match winners.len() {
        1 => {
            let champion = winners.into_iter().next();
            log::info!(
                "Tournament {}: {} is champion without a final",
                tournament.id,
                champion.as_ref().map(Player::name).unwrap_or_default()
            );
            tournament.champion = champion;
            tournament.phase = TournamentPhase::Completed;
            Ok(Transition::Completed)
        }
        2 if tournament.third_place_pairing.is_none() => {
            let pairings = Pairing::pair_consecutive(&winners);
            start_round(tournament, RoundKind::Bracket(RoundName::Final), pairings);
            Ok(Transition::Final)
        }
        entering => {
            let next = tournament.next_bracket_round_name(entering);
            let pairings = Pairing::pair_consecutive(&winners);
            start_round(tournament, RoundKind::Bracket(next), pairings);
            Ok(Transition::NextRound(next))
        }
    }
}
