//! Rejection of probabilities and scores that the models cannot meaningfully evaluate.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::domain::{Score, Stage};

#[derive(Debug, Error, PartialEq)]
pub enum InvalidInput {
    #[error("{0}")]
    InvalidProbability(#[from] InvalidProbability),

    #[error("{0}")]
    InvalidScore(#[from] InvalidScore),

    #[error("{0}")]
    InvalidBestOf(#[from] InvalidBestOf),

    #[error("{0}")]
    Unresolvable(#[from] Unresolvable),
}

#[derive(Debug, Error, PartialEq)]
#[error("{name} must lie in [0, 1], got {value}")]
pub struct InvalidProbability {
    pub name: &'static str,
    pub value: f64,
}

pub struct ProbabilityAssertion;
impl ProbabilityAssertion {
    pub fn check(name: &'static str, value: f64) -> Result<(), InvalidProbability> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(InvalidProbability { name, value })
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{score} is not a reachable {stage} score")]
pub struct InvalidScore {
    pub stage: Stage,
    pub score: Score,
}

/// Scores that can occur during play, including those that have just ended the stage.
pub struct ScoreAssertion;
impl ScoreAssertion {
    pub fn check_game(score: &Score) -> Result<(), InvalidScore> {
        Self::check(Stage::Game, score, is_reachable_game)
    }

    pub fn check_tiebreak(score: &Score) -> Result<(), InvalidScore> {
        Self::check(Stage::Tiebreak, score, is_reachable_tiebreak)
    }

    pub fn check_set(score: &Score) -> Result<(), InvalidScore> {
        Self::check(Stage::Set, score, is_reachable_set)
    }

    fn check(stage: Stage, score: &Score, reachable: impl FnOnce(&Score) -> bool) -> Result<(), InvalidScore> {
        if reachable(score) {
            Ok(())
        } else {
            Err(InvalidScore {
                stage,
                score: *score,
            })
        }
    }
}

fn is_reachable_game(score: &Score) -> bool {
    let (hi, lo) = (score.leader(), score.trailer());
    if hi <= 3 {
        true
    } else if lo < 3 {
        hi == 4
    } else {
        hi - lo <= 2
    }
}

fn is_reachable_tiebreak(score: &Score) -> bool {
    let (hi, lo) = (score.leader(), score.trailer());
    hi <= 7 || hi - lo <= 2
}

fn is_reachable_set(score: &Score) -> bool {
    let (hi, lo) = (score.leader(), score.trailer());
    match hi {
        0..=6 => true,
        7 => lo == 5 || lo == 6,
        _ => false,
    }
}

pub struct MatchScoreAssertion {
    pub best_of: u8,
}
impl MatchScoreAssertion {
    pub fn check(&self, score: &Score) -> Result<(), InvalidScore> {
        let sets_to_win = self.best_of / 2 + 1;
        if score.leader() <= sets_to_win && score.trailer() < sets_to_win {
            Ok(())
        } else {
            Err(InvalidScore {
                stage: Stage::Match,
                score: *score,
            })
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("best-of must be an odd number in {valid:?}, got {best_of}")]
pub struct InvalidBestOf {
    pub best_of: u8,
    pub valid: RangeInclusive<u8>,
}

pub struct BestOfAssertion;
impl BestOfAssertion {
    /// Upper bound keeps every set-count factorial within `u128`.
    pub const VALID: RangeInclusive<u8> = 1..=35;

    pub fn check(best_of: u8) -> Result<(), InvalidBestOf> {
        if Self::VALID.contains(&best_of) && best_of % 2 == 1 {
            Ok(())
        } else {
            Err(InvalidBestOf {
                best_of,
                valid: Self::VALID,
            })
        }
    }
}

/// Both players either win every point on serve or lose every point on serve, so a tiebreak
/// that reaches 6-6 is never decided.
#[derive(Debug, Error, PartialEq)]
#[error("serve probabilities {p_a} and {p_b} never separate the players once a tiebreak reaches 6-6")]
pub struct Unresolvable {
    pub p_a: f64,
    pub p_b: f64,
}

pub struct ResolvableAssertion;
impl ResolvableAssertion {
    pub fn check(p_a: f64, p_b: f64) -> Result<(), Unresolvable> {
        if p_a * (1.0 - p_b) + (1.0 - p_a) * p_b > 0.0 {
            Ok(())
        } else {
            Err(Unresolvable { p_a, p_b })
        }
    }
}
