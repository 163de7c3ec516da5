//! Validated entry points. Each function checks its inputs, normalises extended deuce scores and
//! delegates to the corresponding model.

use tracing::trace;

use crate::domain::{Breakdown, Score, Stage};
use crate::error::{
    BestOfAssertion, InvalidInput, InvalidScore, MatchScoreAssertion, ProbabilityAssertion,
    ResolvableAssertion, ScoreAssertion,
};
use crate::tiebreak::TiebreakFinish;
use crate::{game, matchplay, set, tiebreak};

/// Rewinds a tie beyond deuce, or an advantage beyond it, to the equivalent 3-3, 4-3 or 3-4.
fn rewind_deuce(score: Score) -> Score {
    let excess = score.trailer().saturating_sub(3);
    Score::new(score.a - excess, score.b - excess)
}

fn check_serve_probabilities(p_a: f64, p_b: f64) -> Result<(), InvalidInput> {
    ProbabilityAssertion::check("p_a", p_a)?;
    ProbabilityAssertion::check("p_b", p_b)?;
    ResolvableAssertion::check(p_a, p_b)?;
    Ok(())
}

/// Probability of the server winning a game from 0-0.
pub fn win_game_probability(p: f64) -> Result<f64, InvalidInput> {
    ProbabilityAssertion::check("p", p)?;
    let prob = game::closed_form_game(p);
    trace!("game from 0-0 at p={p}: {prob}");
    Ok(prob)
}

/// Probability of the server winning a game from `points_for`-`points_against`.
pub fn win_game_probability_from(p: f64, points_for: u8, points_against: u8) -> Result<f64, InvalidInput> {
    ProbabilityAssertion::check("p", p)?;
    let score = Score::new(points_for, points_against);
    ScoreAssertion::check_game(&score)?;
    let score = rewind_deuce(score);
    let prob = game::game_from_score(p, score.a, score.b);
    trace!("game from {points_for}-{points_against} (as {score}) at p={p}: {prob}");
    Ok(prob)
}

/// Probability of winning a tiebreak from `points_for`-`points_against`, where `p_a` belongs to the
/// player about to serve.
pub fn win_tiebreak_probability(
    p_a: f64,
    p_b: f64,
    points_for: u8,
    points_against: u8,
) -> Result<Breakdown<TiebreakFinish>, InvalidInput> {
    check_serve_probabilities(p_a, p_b)?;
    ScoreAssertion::check_tiebreak(&Score::new(points_for, points_against))?;
    let breakdown = tiebreak::prob_tiebreak(p_a, p_b, points_for, points_against);
    trace!(
        "tiebreak from {points_for}-{points_against} at p_a={p_a}, p_b={p_b}: {:?}",
        breakdown
    );
    Ok(breakdown)
}

/// Probability of winning a set from `games_for`-`games_against`, where `p_a` belongs to the player
/// about to serve.
pub fn win_set_probability(p_a: f64, p_b: f64, games_for: u8, games_against: u8) -> Result<f64, InvalidInput> {
    check_serve_probabilities(p_a, p_b)?;
    ScoreAssertion::check_set(&Score::new(games_for, games_against))?;
    let prob = set::prob_set(p_a, p_b, games_for, games_against);
    trace!("set from {games_for}-{games_against} at p_a={p_a}, p_b={p_b}: {prob}");
    Ok(prob)
}

/// Probability of winning a best-of-`best_of` match from `sets_for`-`sets_against`, given `p_set`
/// probability of winning each set.
pub fn win_match_outcome_probability(
    p_set: f64,
    sets_for: u8,
    sets_against: u8,
    best_of: u8,
) -> Result<Breakdown<Score>, InvalidInput> {
    ProbabilityAssertion::check("p_set", p_set)?;
    BestOfAssertion::check(best_of)?;
    MatchScoreAssertion { best_of }.check(&Score::new(sets_for, sets_against))?;
    let breakdown = matchplay::prob_match_outcome(p_set, sets_for, sets_against, best_of);
    trace!(
        "match outcomes from {sets_for}-{sets_against} in best of {best_of} at p_set={p_set}: {:?}",
        breakdown
    );
    Ok(breakdown)
}

/// Probability of winning a best-of-`best_of` match from a full live score. `p_a` belongs to the
/// player about to serve; the points are a tiebreak score when the games stand at 6-6.
pub fn win_match_probability(
    p_a: f64,
    p_b: f64,
    sets_for: u8,
    sets_against: u8,
    games_for: u8,
    games_against: u8,
    points_for: u8,
    points_against: u8,
    best_of: u8,
) -> Result<f64, InvalidInput> {
    check_serve_probabilities(p_a, p_b)?;
    BestOfAssertion::check(best_of)?;
    MatchScoreAssertion { best_of }.check(&Score::new(sets_for, sets_against))?;

    let games = Score::new(games_for, games_against);
    ScoreAssertion::check_set(&games)?;
    if set::is_decided(&games) {
        return Err(InvalidScore {
            stage: Stage::Set,
            score: games,
        }
        .into());
    }

    let points = Score::new(points_for, points_against);
    let points = if games == Score::new(6, 6) {
        ScoreAssertion::check_tiebreak(&points)?;
        points
    } else {
        ScoreAssertion::check_game(&points)?;
        rewind_deuce(points)
    };

    let prob = matchplay::prob_match(
        p_a,
        p_b,
        sets_for,
        sets_against,
        games_for,
        games_against,
        points.a,
        points.b,
        best_of,
    );
    trace!(
        "match from sets {sets_for}-{sets_against}, games {games}, points {points} in best of {best_of} at p_a={p_a}, p_b={p_b}: {prob}"
    );
    Ok(prob)
}
