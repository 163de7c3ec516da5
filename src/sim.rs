//! Point-by-point Monte Carlo play, keeping the score progression of every game, set and match.
//! Used as an independent check on the analytic models.

use thiserror::Error;
use tinyrand::{Rand, Seeded, StdRand};
use tracing::debug;

use crate::domain::{Score, Stage};
use crate::matchplay::sets_to_win;

/// Serve probabilities under which a tiebreak, once level at 6-6, never ends.
#[derive(Debug, Error, PartialEq)]
#[error("cannot simulate with serve probabilities {p_a} and {p_b}: extras never end")]
pub struct Stalemate {
    pub p_a: f64,
    pub p_b: f64,
}

fn check_stalemate(p_a: f64, p_b: f64) -> Result<(), Stalemate> {
    if p_a * (1.0 - p_b) + (1.0 - p_a) * p_b > 0.0 {
        Ok(())
    } else {
        Err(Stalemate { p_a, p_b })
    }
}

/// Uniform in `[0, 1)` with 53 bits of precision, so that `random_f64(rand) < p` is never true
/// for `p = 0` and always true for `p = 1`.
#[inline]
fn random_f64(rand: &mut impl Rand) -> f64 {
    (rand.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

#[inline]
pub fn simulate_point(p: f64, rand: &mut impl Rand) -> bool {
    random_f64(rand) < p
}

/// Outcome of a game or tiebreak.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Simulation {
    pub won: bool,
    /// Final score. Ties past deuce, or past 6-6 in a tiebreak, are rewound, so a long game ends 5-3 or 3-5.
    pub score: Score,
    /// Score after every point. A rewound tie is recorded before it is rewound, e.g. 4-4 then 4-3.
    pub progression: Vec<Score>,
}
impl Simulation {
    /// The same outcome seen from the other player's side.
    pub fn flip(self) -> Self {
        Self {
            won: !self.won,
            score: self.score.flip(),
            progression: self.progression.iter().map(Score::flip).collect(),
        }
    }
}

/// Plays a game, returning the outcome for the server.
pub fn simulate_game(p: f64, rand: &mut impl Rand) -> Simulation {
    let mut score = Score::nil_all();
    let mut progression = Vec::with_capacity(8);
    loop {
        if simulate_point(p, rand) {
            score.a += 1;
        } else {
            score.b += 1;
        }
        progression.push(score);
        if score.a >= 4 && score.a >= score.b + 2 {
            return Simulation { won: true, score, progression };
        } else if score.b >= 4 && score.b >= score.a + 2 {
            return Simulation { won: false, score, progression };
        } else if score == Score::new(4, 4) {
            score = Score::new(3, 3);
        }
    }
}

/// Whether the player who served the first point of a tiebreak serves the point at index `point`.
#[inline]
fn first_server_serves(point: u64) -> bool {
    point == 0 || ((point - 1) / 2) % 2 == 1
}

/// Plays a tiebreak, returning the outcome for player `a`.
pub fn simulate_tiebreak(p_a: f64, p_b: f64, a_serves_first: bool, rand: &mut impl Rand) -> Result<Simulation, Stalemate> {
    check_stalemate(p_a, p_b)?;
    Ok(play_tiebreak(p_a, p_b, a_serves_first, rand))
}

fn play_tiebreak(p_a: f64, p_b: f64, a_serves_first: bool, rand: &mut impl Rand) -> Simulation {
    let mut score = Score::nil_all();
    let mut progression = Vec::with_capacity(16);
    let mut played = 0u64;
    loop {
        let a_serves = first_server_serves(played) == a_serves_first;
        let a_wins_point = if a_serves {
            simulate_point(p_a, rand)
        } else {
            !simulate_point(p_b, rand)
        };
        if a_wins_point {
            score.a += 1;
        } else {
            score.b += 1;
        }
        progression.push(score);
        played += 1;
        if score.a >= 7 && score.a >= score.b + 2 {
            return Simulation { won: true, score, progression };
        } else if score.b >= 7 && score.b >= score.a + 2 {
            return Simulation { won: false, score, progression };
        } else if score == Score::new(7, 7) {
            score = Score::new(6, 6);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetSimulation {
    pub won: bool,
    pub games: Score,
    pub tiebreak: Option<Score>,
    /// Games score after every game, the tiebreak included.
    pub progression: Vec<Score>,
    /// Every game in the order played, each from the perspective of player `a`.
    pub played: Vec<Simulation>,
}

/// Plays a set with alternating serve, returning the outcome for player `a`.
pub fn simulate_set(p_a: f64, p_b: f64, a_serves_first: bool, rand: &mut impl Rand) -> Result<SetSimulation, Stalemate> {
    check_stalemate(p_a, p_b)?;
    Ok(play_set(p_a, p_b, a_serves_first, rand))
}

fn play_set(p_a: f64, p_b: f64, a_serves_first: bool, rand: &mut impl Rand) -> SetSimulation {
    let mut games = Score::nil_all();
    let mut progression = Vec::with_capacity(13);
    let mut played = Vec::with_capacity(13);
    let mut a_serves = a_serves_first;
    loop {
        if games == Score::new(6, 6) {
            // twelve games in, so the first server of the set is due again
            let tiebreak = play_tiebreak(p_a, p_b, a_serves, rand);
            let won = tiebreak.won;
            if won {
                games.a += 1;
            } else {
                games.b += 1;
            }
            progression.push(games);
            let tiebreak_score = tiebreak.score;
            played.push(tiebreak);
            return SetSimulation {
                won,
                games,
                tiebreak: Some(tiebreak_score),
                progression,
                played,
            };
        }

        let game = if a_serves {
            simulate_game(p_a, rand)
        } else {
            simulate_game(p_b, rand).flip()
        };
        if game.won {
            games.a += 1;
        } else {
            games.b += 1;
        }
        progression.push(games);
        played.push(game);
        a_serves = !a_serves;

        if games.leader() == 7 || (games.leader() == 6 && games.trailer() <= 4) {
            return SetSimulation {
                won: games.a > games.b,
                games,
                tiebreak: None,
                progression,
                played,
            };
        }
    }
}

/// Who serves first in the next set: serve keeps alternating across the set boundary, with a
/// tiebreak counting as a single game.
pub fn next_set_first_server(a_served_first: bool, games: Score) -> bool {
    if games.total() % 2 == 0 {
        a_served_first
    } else {
        !a_served_first
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSimulation {
    pub won: bool,
    pub sets: Score,
    /// Sets score after every set.
    pub progression: Vec<Score>,
    /// Every set in the order played.
    pub played: Vec<SetSimulation>,
}

/// Plays a best-of-`best_of` match, returning the outcome for player `a`.
pub fn simulate_match(
    p_a: f64,
    p_b: f64,
    a_serves_first: bool,
    best_of: u8,
    rand: &mut impl Rand,
) -> Result<MatchSimulation, Stalemate> {
    check_stalemate(p_a, p_b)?;
    Ok(play_match(p_a, p_b, a_serves_first, best_of, rand))
}

fn play_match(p_a: f64, p_b: f64, a_serves_first: bool, best_of: u8, rand: &mut impl Rand) -> MatchSimulation {
    let target = sets_to_win(best_of);
    let mut sets = Score::nil_all();
    let mut progression = Vec::with_capacity(best_of as usize);
    let mut played = Vec::with_capacity(best_of as usize);
    let mut a_serves = a_serves_first;
    while sets.leader() < target {
        let set = play_set(p_a, p_b, a_serves, rand);
        if set.won {
            sets.a += 1;
        } else {
            sets.b += 1;
        }
        progression.push(sets);
        a_serves = next_set_first_server(a_serves, set.games);
        played.push(set);
    }
    MatchSimulation {
        won: sets.a == target,
        sets,
        progression,
        played,
    }
}

/// Estimates win probabilities by repeated simulation. Player `a` serves first in every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulator {
    trials: u64,
    seed: u64,
}
impl Simulator {
    pub fn with_trials(mut self, trials: u64) -> Self {
        assert!(trials > 0, "at least one trial is required");
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    fn estimate_by(&self, stage: Stage, mut trial: impl FnMut(&mut StdRand) -> bool) -> f64 {
        let mut rand = StdRand::seed(self.seed);
        let wins = (0..self.trials).filter(|_| trial(&mut rand)).count();
        let prob = wins as f64 / self.trials as f64;
        debug!("{stage}: won {wins} of {} trials, estimate {prob:.6}", self.trials);
        prob
    }

    pub fn estimate_game(&self, p: f64) -> f64 {
        self.estimate_by(Stage::Game, |rand| simulate_game(p, rand).won)
    }

    pub fn estimate_tiebreak(&self, p_a: f64, p_b: f64) -> Result<f64, Stalemate> {
        check_stalemate(p_a, p_b)?;
        Ok(self.estimate_by(Stage::Tiebreak, |rand| play_tiebreak(p_a, p_b, true, rand).won))
    }

    pub fn estimate_set(&self, p_a: f64, p_b: f64) -> Result<f64, Stalemate> {
        check_stalemate(p_a, p_b)?;
        Ok(self.estimate_by(Stage::Set, |rand| play_set(p_a, p_b, true, rand).won))
    }

    pub fn estimate_match(&self, p_a: f64, p_b: f64, best_of: u8) -> Result<f64, Stalemate> {
        check_stalemate(p_a, p_b)?;
        Ok(self.estimate_by(Stage::Match, |rand| play_match(p_a, p_b, true, best_of, rand).won))
    }

    /// Estimates a single stage from 0-0. A game is served by `a` and uses `p_a` alone.
    pub fn estimate(&self, stage: Stage, p_a: f64, p_b: f64, best_of: u8) -> Result<f64, Stalemate> {
        match stage {
            Stage::Game => Ok(self.estimate_game(p_a)),
            Stage::Tiebreak => self.estimate_tiebreak(p_a, p_b),
            Stage::Set => self.estimate_set(p_a, p_b),
            Stage::Match => self.estimate_match(p_a, p_b, best_of),
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            trials: 100_000,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests;
