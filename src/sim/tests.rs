use assert_float_eq::*;
use tinyrand::{Seeded, StdRand};

use super::*;
use crate::game::closed_form_game;
use crate::set::prob_set;
use crate::tiebreak::prob_tiebreak;

const TRIALS: u64 = 20_000;
const TOLERANCE: f64 = 0.02;

fn simulator() -> Simulator {
    Simulator::default().with_trials(TRIALS)
}

#[test]
fn random_f64_within_unit_interval() {
    let mut rand = StdRand::seed(7);
    for _ in 0..10_000 {
        let random = random_f64(&mut rand);
        assert!((0.0..1.0).contains(&random), "{random}");
    }
}

#[test]
fn certain_points() {
    let mut rand = StdRand::default();
    for _ in 0..100 {
        assert!(simulate_point(1.0, &mut rand));
        assert!(!simulate_point(0.0, &mut rand));
    }
}

fn to_love(points: u8) -> Vec<Score> {
    (1..=points).map(|point| Score::new(point, 0)).collect()
}

fn game_to_love() -> Simulation {
    Simulation {
        won: true,
        score: Score::new(4, 0),
        progression: to_love(4),
    }
}

/// Asserts that consecutive scores differ by a single point, allowing for a tie of `rewind_at`
/// all being rewound by one point each.
fn assert_point_by_point(progression: &[Score], rewind_at: u8) {
    let mut previous = Score::nil_all();
    for &score in progression {
        if previous == Score::new(rewind_at, rewind_at) {
            previous = Score::new(rewind_at - 1, rewind_at - 1);
        }
        assert_eq!(previous.total() + 1, score.total(), "{previous} to {score} in {progression:?}");
        assert!(score.a >= previous.a && score.b >= previous.b, "{previous} to {score} in {progression:?}");
        previous = score;
    }
}

#[test]
fn certain_games() {
    let mut rand = StdRand::default();
    assert_eq!(game_to_love(), simulate_game(1.0, &mut rand));
    assert_eq!(game_to_love().flip(), simulate_game(0.0, &mut rand));
    assert_eq!(
        vec![Score::new(0, 1), Score::new(0, 2), Score::new(0, 3), Score::new(0, 4)],
        simulate_game(0.0, &mut rand).progression
    );
}

#[test]
fn game_progression() {
    let mut rand = StdRand::seed(3);
    for _ in 0..1_000 {
        let game = simulate_game(0.5, &mut rand);
        assert_eq!(Some(&game.score), game.progression.last());
        assert_point_by_point(&game.progression, 4);
        assert!(game.score.leader() <= 5, "{:?}", game.progression);
    }
}

#[test]
fn certain_tiebreaks() {
    let mut rand = StdRand::default();
    for a_serves_first in [true, false] {
        assert_eq!(
            Simulation {
                won: true,
                score: Score::new(7, 0),
                progression: to_love(7),
            },
            simulate_tiebreak(1.0, 0.0, a_serves_first, &mut rand).unwrap()
        );
        let tiebreak = simulate_tiebreak(0.0, 1.0, a_serves_first, &mut rand).unwrap();
        assert!(!tiebreak.won);
        assert_eq!(Score::new(0, 7), tiebreak.score);
        assert_eq!(7, tiebreak.progression.len());
    }
}

#[test]
fn tiebreak_progression() {
    let mut rand = StdRand::seed(5);
    for _ in 0..1_000 {
        let tiebreak = simulate_tiebreak(0.5, 0.5, true, &mut rand).unwrap();
        assert_eq!(Some(&tiebreak.score), tiebreak.progression.last());
        assert_point_by_point(&tiebreak.progression, 7);
    }
}

#[test]
fn holding_serve_goes_to_a_tiebreak() {
    let mut rand = StdRand::default();
    // `a` wins every point on serve and half of the points on return
    let set = simulate_set(1.0, 0.5, true, &mut rand).unwrap();
    assert!(set.games.a >= 6);
    let set = simulate_set(1.0, 0.0, true, &mut rand).unwrap();
    assert_eq!(
        SetSimulation {
            won: true,
            games: Score::new(6, 0),
            tiebreak: None,
            progression: to_love(6),
            played: vec![game_to_love(); 6],
        },
        set
    );
}

#[test]
fn set_progression() {
    let mut rand = StdRand::seed(11);
    let mut tiebreaks = 0;
    for _ in 0..200 {
        let set = simulate_set(0.9, 0.9, true, &mut rand).unwrap();
        assert_eq!(set.progression.len(), set.played.len());
        assert_eq!(Some(&set.games), set.progression.last());
        assert_point_by_point(&set.progression, u8::MAX);
        let mut previous = Score::nil_all();
        for (game, &score) in set.played.iter().zip(&set.progression) {
            assert_eq!(score.a > previous.a, game.won, "{score} in {:?}", set.progression);
            previous = score;
        }
        if let Some(tiebreak) = set.tiebreak {
            tiebreaks += 1;
            assert_eq!(13, set.played.len());
            assert_eq!(Some(tiebreak), set.played.last().map(|game| game.score));
        }
    }
    assert!(tiebreaks > 0);
}

#[test]
fn stalemates() {
    let mut rand = StdRand::default();
    for p in [0.0, 1.0] {
        assert_eq!(Err(Stalemate { p_a: p, p_b: p }), simulate_tiebreak(p, p, true, &mut rand));
        assert_eq!(Err(Stalemate { p_a: p, p_b: p }), simulate_set(p, p, true, &mut rand));
        assert_eq!(Err(Stalemate { p_a: p, p_b: p }), simulate_match(p, p, true, 3, &mut rand));
        assert!(simulator().estimate_set(p, p).is_err());
    }
    assert_eq!(
        "cannot simulate with serve probabilities 1 and 1: extras never end",
        Stalemate { p_a: 1.0, p_b: 1.0 }.to_string()
    );
}

#[test]
fn certain_match() {
    let mut rand = StdRand::default();
    let outcome = simulate_match(1.0, 0.0, false, 5, &mut rand).unwrap();
    assert_eq!(
        vec![Score::new(1, 0), Score::new(2, 0), Score::new(3, 0)],
        outcome.progression
    );
    assert!(outcome.won);
    assert_eq!(Score::new(3, 0), outcome.sets);
    assert_eq!(3, outcome.played.len());
    for set in &outcome.played {
        assert_eq!(Score::new(6, 0), set.games);
        assert_eq!(vec![game_to_love(); 6], set.played);
    }
}

#[test]
fn match_progression() {
    let mut rand = StdRand::seed(17);
    for _ in 0..100 {
        let outcome = simulate_match(0.62, 0.55, true, 5, &mut rand).unwrap();
        assert_eq!(Some(&outcome.sets), outcome.progression.last());
        assert_eq!(outcome.progression.len(), outcome.played.len());
        assert_point_by_point(&outcome.progression, u8::MAX);
        assert_eq!(outcome.won, outcome.sets.a == 3);
        assert_eq!(outcome.sets.a as usize, outcome.played.iter().filter(|set| set.won).count());
    }
}

#[test]
fn serve_carries_across_sets() {
    assert!(next_set_first_server(true, Score::new(6, 4)));
    assert!(!next_set_first_server(true, Score::new(6, 3)));
    assert!(next_set_first_server(false, Score::new(7, 6)));
    assert!(!next_set_first_server(false, Score::new(5, 7)));
}

#[test]
fn same_seed_same_estimate() {
    let simulator = Simulator::default().with_trials(1_000).with_seed(99);
    assert_eq!(simulator.estimate_set(0.62, 0.55), simulator.estimate_set(0.62, 0.55));
    assert_eq!(1_000, simulator.trials());
}

#[test]
fn fair_estimates() {
    let simulator = simulator();
    assert_float_absolute_eq!(0.5, simulator.estimate_game(0.5), TOLERANCE);
    assert_float_absolute_eq!(0.5, simulator.estimate_tiebreak(0.5, 0.5).unwrap(), TOLERANCE);
    assert_float_absolute_eq!(0.5, simulator.estimate_set(0.5, 0.5).unwrap(), TOLERANCE);
    assert_float_absolute_eq!(0.5, simulator.estimate_match(0.5, 0.5, 3).unwrap(), TOLERANCE);
}

#[test]
fn game_agrees_with_closed_form() {
    let simulator = simulator();
    for p in [0.3, 0.6, 0.75] {
        assert_float_absolute_eq!(closed_form_game(p), simulator.estimate_game(p), TOLERANCE);
    }
}

#[test]
fn tiebreak_agrees_with_model() {
    let simulator = simulator();
    for (p_a, p_b) in [(0.62, 0.55), (0.7, 0.4)] {
        let exact = prob_tiebreak(p_a, p_b, 0, 0).probability;
        assert_float_absolute_eq!(exact, simulator.estimate_tiebreak(p_a, p_b).unwrap(), TOLERANCE);
    }
}

#[test]
fn set_agrees_with_model() {
    let simulator = simulator();
    for (p_a, p_b) in [(0.62, 0.55), (0.55, 0.7)] {
        let exact = prob_set(p_a, p_b, 0, 0);
        assert_float_absolute_eq!(exact, simulator.estimate_set(p_a, p_b).unwrap(), TOLERANCE);
    }
}

#[test]
fn estimate_by_stage() {
    let simulator = Simulator::default().with_trials(1_000);
    assert_eq!(simulator.estimate_game(0.6), simulator.estimate(Stage::Game, 0.6, 0.3, 3).unwrap());
    assert_eq!(
        simulator.estimate_match(0.6, 0.3, 5).unwrap(),
        simulator.estimate(Stage::Match, 0.6, 0.3, 5).unwrap()
    );
}
