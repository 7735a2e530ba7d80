//! Integration tests for ranking reconstruction.

mod common;

use bracket_tournament_web::{
    generate_ranking, initialize, RankingEntry, RoundName, TournamentError,
};
use common::{completed, numbered_players};

fn rows(ranking: &[RankingEntry]) -> Vec<(u32, &str)> {
    ranking.iter().map(|e| (e.position, e.player.name())).collect()
}

#[test]
fn ranking_requires_a_completed_tournament() {
    let t = initialize(numbered_players(8));
    assert_eq!(generate_ranking(&t), Err(TournamentError::InvalidState));
}

#[test]
fn eight_player_ranking_buckets_quarterfinal_losers() {
    let t = completed(8);
    let ranking = generate_ranking(&t).unwrap();
    assert_eq!(
        rows(&ranking),
        vec![
            (1, "P0"),
            (2, "P4"),
            (3, "P2"),
            (4, "P6"),
            (5, "P1"),
            (5, "P3"),
            (5, "P5"),
            (5, "P7"),
        ]
    );
    assert_eq!(ranking[0].label, "Champion");
    assert_eq!(ranking[1].label, "Runner-up");
    assert_eq!(ranking[2].label, "Third place");
    assert_eq!(ranking[3].label, "Fourth place");
    assert_eq!(ranking[4].label, "Eliminated in Quarterfinal");
    let medals: Vec<_> = ranking.iter().take(5).map(|e| e.medal.as_str()).collect();
    assert_eq!(medals, vec!["🥇", "🥈", "🥉", "🏅", "🏅"]);
}

#[test]
fn every_player_is_ranked_once() {
    for n in [2, 4, 8, 16, 32, 64] {
        let t = completed(n);
        let ranking = generate_ranking(&t).unwrap();
        assert_eq!(ranking.len(), n, "n = {n}");
        let mut players: Vec<_> = ranking.iter().map(|e| e.player.clone()).collect();
        players.sort();
        players.dedup();
        assert_eq!(players.len(), n, "n = {n}");
        assert!(ranking.windows(2).all(|w| w[0].position <= w[1].position));
    }
}

#[test]
fn thirty_two_player_positions_follow_elimination_round() {
    let t = completed(32);
    let ranking = generate_ranking(&t).unwrap();
    let count = |position: u32| ranking.iter().filter(|e| e.position == position).count();
    assert_eq!(count(5), 4);
    assert_eq!(count(6), 8);
    assert_eq!(count(7), 16);
    assert!(ranking
        .iter()
        .filter(|e| e.position == 7)
        .all(|e| e.label == "Eliminated in Round of 32"));
}

#[test]
fn ranking_is_idempotent() {
    let t = completed(16);
    assert_eq!(generate_ranking(&t).unwrap(), generate_ranking(&t).unwrap());
}

#[test]
fn missing_third_place_falls_back_to_first_semifinal_loser() {
    let mut t = completed(4);
    t.third_place = None;
    // Semifinal (P0, P1) and (P2, P3): losers P1 then P3.
    let ranking = generate_ranking(&t).unwrap();
    assert_eq!(
        rows(&ranking),
        vec![(1, "P0"), (2, "P2"), (3, "P1"), (4, "P3")]
    );
}

#[test]
fn players_without_an_elimination_land_in_the_round_of_16_bucket() {
    let mut t = completed(16);
    t.eliminations.retain(|e| e.round != RoundName::Quarterfinal);
    let ranking = generate_ranking(&t).unwrap();
    assert_eq!(ranking.len(), 16);
    // The four quarterfinal losers now share the round-of-16 position.
    let sixth: Vec<_> = ranking.iter().filter(|e| e.position == 6).collect();
    assert_eq!(sixth.len(), 12);
    assert!(ranking.iter().all(|e| e.position != 5));
    assert!(sixth.iter().all(|e| e.label == "Eliminated in Round of 16"));
}

#[test]
fn unclassified_players_in_small_brackets_use_the_last_bucket() {
    let mut t = completed(8);
    t.eliminations.clear();
    let ranking = generate_ranking(&t).unwrap();
    // Semifinal losers still come from the snapshot; quarterfinal losers are unclassified.
    assert_eq!(
        rows(&ranking)[4..].to_vec(),
        vec![(5, "P1"), (5, "P3"), (5, "P5"), (5, "P7")]
    );
}
