//! Probability of the server winning a single service game, from 0-0 or from any point score.
//!
//! Scores are `(x, y)`: points won by the server and by the returner. Deuce is reached at 3-3
//! and any later tie is treated as 3-3; the advantage states are 4-3 and 3-4.
//!
//! At advantage the server either wins the next point or goes back to deuce, so 4-3 is worth
//! `p + (1 - p)·win_from_deuce(p)`, which is 0.75 when `p` is 0.5. This keeps the server's chance
//! at 4-3 and the returner's chance at 3-4 summing to 1.

use crate::factorial::{binomial, ncr};

/// Probability of the server winning a game from 0-0, given `p` probability of winning each
/// point on serve.
pub fn closed_form_game(p: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p), "p ({p}) outside [0, 1]");
    let q = 1.0 - p;
    let mut prob = 0.0;
    // to love, to 15, to 30
    for k in 0..=2 {
        prob += ncr(3 + k, k) * p.powi(4) * q.powi(k as i32);
    }
    prob + ncr(6, 3) * p.powi(3) * q.powi(3) * win_from_deuce(p)
}

/// Probability of the server winning from deuce: the geometric series of returns to deuce,
/// summed in closed form.
#[inline]
pub fn win_from_deuce(p: f64) -> f64 {
    p.powi(2) / (1.0 - 2.0 * p * (1.0 - p))
}

/// Probability that a game at `x`-`y` passes through 3-3. Both counts must be at most 3.
pub fn prob_reach_deuce(p: f64, x: u8, y: u8) -> f64 {
    debug_assert!(x <= 3 && y <= 3, "{x}-{y} is past deuce");
    ncr(6 - x - y, 3 - x) * p.powi((3 - x) as i32) * (1.0 - p).powi((3 - y) as i32)
}

/// Probability of the server having won exactly `x` points and the returner `y`, in any order.
pub fn prob_game_outcome(p: f64, x: u8, y: u8) -> f64 {
    binomial(x + y, x, p)
}

/// Probability of the server winning the game from `x`-`y`.
pub fn game_from_score(p: f64, x: u8, y: u8) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p), "p ({p}) outside [0, 1]");
    match (x, y) {
        (4, 0..=2) | (5, _) => return 1.0,
        (0..=2, 4) | (_, 5) => return 0.0,
        _ => {}
    }

    let q = 1.0 - p;
    let mut prob = 0.0;
    if x <= 3 {
        // take the remaining points before the returner gets to 3
        let needed = 3 - x;
        for o in 0..3u8.saturating_sub(y) {
            prob += p * ncr(needed + o, o) * p.powi(needed as i32) * q.powi(o as i32);
        }
    }

    match (x, y) {
        (0..=3, 0..=3) => prob + prob_reach_deuce(p, x, y) * win_from_deuce(p),
        (4, 3) => prob + p + q * win_from_deuce(p),
        (3, 4) => prob + p * win_from_deuce(p),
        _ => prob,
    }
}
