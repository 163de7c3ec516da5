//! Seven-point tiebreak, won by two clear points.
//!
//! The player serving the first point serves once; from then on each player serves two points
//! in a row. Scores are `(a, b)` where `a` belongs to the player **about to serve the next point**
//! and `p_a`, `p_b` are each player's probability of winning a point on their own serve. Under
//! that convention the serve pattern of the remaining points depends only on the parity of the
//! points played so far.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{Breakdown, Role, Score};
use crate::factorial::convolved_binomial;

/// How a run of points divides between the next server's serves and returns. The counts exclude
/// the final point, whose server is identified separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServeSplit {
    pub serves: u8,
    pub returns: u8,
    pub final_point: Role,
}

/// Splits the next `points_to_play` points, given `points_played` so far. At least one point must
/// remain.
pub fn derive_serve_split(points_played: u8, points_to_play: u8) -> ServeSplit {
    debug_assert!(points_to_play > 0, "no points to play");
    let n = points_to_play;
    let half = n / 2;
    let (serves, returns, final_point) = if points_played % 2 == 0 {
        if n % 2 == 0 {
            if n % 4 == 0 {
                (half - 1, half, Role::Server)
            } else {
                (half, half - 1, Role::Receiver)
            }
        } else if (n - 1) % 4 == 0 {
            (half, half, Role::Server)
        } else {
            (half, half, Role::Receiver)
        }
    } else if n % 2 == 0 {
        if n % 4 == 0 {
            (half, half - 1, Role::Receiver)
        } else {
            (half, half - 1, Role::Server)
        }
    } else if (n - 1) % 4 == 0 {
        (half, half, Role::Server)
    } else {
        (half + 1, half - 1, Role::Receiver)
    };
    ServeSplit {
        serves,
        returns,
        final_point,
    }
}

/// How a tiebreak can end in the next server's favour.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum TiebreakFinish {
    /// Won 7-k with `k` at most 5.
    Regulation(Score),
    /// Won after reaching 6-6.
    Extras,
}

impl fmt::Display for TiebreakFinish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiebreakFinish::Regulation(score) => write!(f, "{score}"),
            TiebreakFinish::Extras => write!(f, "extras"),
        }
    }
}

/// A regulation final reachable from the current score.
#[derive(Clone, Debug, PartialEq)]
pub struct TiebreakFinal {
    /// Final score, e.g. 7-3.
    pub score: Score,
    /// Points each player still has to win to get there.
    pub needed: Score,
    pub split: ServeSplit,
    /// Probability of winning the final point.
    pub p_final: f64,
}

/// Lists the finals `(7, k)`, with `k` running from `pt_b` to 5. Empty once `pt_b` reaches 6.
pub fn enumerate_tiebreak_finals(p_a: f64, p_b: f64, pt_a: u8, pt_b: u8) -> Vec<TiebreakFinal> {
    debug_assert!(pt_a <= 6 && pt_b <= 6, "{pt_a}-{pt_b} is past regulation");
    let points_played = pt_a + pt_b;
    (pt_b..=5)
        .map(|k| {
            let needed = Score::new(7 - pt_a, k - pt_b);
            let split = derive_serve_split(points_played, needed.total());
            let p_final = match split.final_point {
                Role::Server => p_a,
                Role::Receiver => 1.0 - p_b,
            };
            TiebreakFinal {
                score: Score::new(7, k),
                needed,
                split,
                p_final,
            }
        })
        .collect()
}

/// Probability of one regulation final: the last point is won with `p_final` and the other
/// `needed.a - 1` points are spread across `serves` and `returns` in any order.
pub fn prob_tiebreak_outcome(needed: Score, serves: u8, returns: u8, p_final: f64, p_a: f64, p_b: f64) -> f64 {
    debug_assert!(needed.a > 0, "no points needed");
    p_final * convolved_binomial(needed.a - 1, serves, returns, p_a, 1.0 - p_b)
}

/// Probability of winning from 6-6. Points are played in pairs with one serve each; a pair is
/// either split, which restores the tie, or won outright.
#[inline]
pub fn win_extras(p_a: f64, p_b: f64) -> f64 {
    let win_pair = p_a * (1.0 - p_b);
    let lose_pair = (1.0 - p_a) * p_b;
    debug_assert!(win_pair + lose_pair > 0.0, "extras with p_a = {p_a}, p_b = {p_b} never end");
    win_pair / (win_pair + lose_pair)
}

/// Probability of winning the tiebreak from `pt_a`-`pt_b`, with the contribution of each final.
/// Scores from 5-6 or 6-5 onwards are resolved directly and carry no breakdown.
pub fn prob_tiebreak(p_a: f64, p_b: f64, pt_a: u8, pt_b: u8) -> Breakdown<TiebreakFinish> {
    if pt_a >= 7 && pt_a.saturating_sub(pt_b) >= 2 {
        return Breakdown::certain();
    } else if pt_b >= 7 && pt_b.saturating_sub(pt_a) >= 2 {
        return Breakdown::impossible();
    }

    if (pt_a >= 6 && pt_b >= 5) || (pt_a >= 5 && pt_b >= 6) {
        let extras = win_extras(p_a, p_b);
        let prob = if pt_a == pt_b {
            extras
        } else if pt_a > pt_b {
            p_a + (1.0 - p_a) * extras
        } else {
            p_a * extras
        };
        return Breakdown::resolved(prob);
    }

    let mut outcomes = BTreeMap::new();
    for fin in enumerate_tiebreak_finals(p_a, p_b, pt_a, pt_b) {
        let prob = prob_tiebreak_outcome(fin.needed, fin.split.serves, fin.split.returns, fin.p_final, p_a, p_b);
        outcomes.insert(TiebreakFinish::Regulation(fin.score), prob);
    }

    // the next server serves the extra point of an odd run
    let to_six_all = 12 - pt_a - pt_b;
    let reach_six_all = convolved_binomial(6 - pt_a, to_six_all.div_ceil(2), to_six_all / 2, p_a, 1.0 - p_b);
    outcomes.insert(TiebreakFinish::Extras, reach_six_all * win_extras(p_a, p_b));
    Breakdown::from_outcomes(outcomes)
}

/// Probability of player `a` winning a tiebreak from 0-0, whichever player serves first.
pub fn tiebreak_for_first_server(p_a: f64, p_b: f64, a_serves_first: bool) -> f64 {
    if a_serves_first {
        prob_tiebreak(p_a, p_b, 0, 0).probability
    } else {
        1.0 - prob_tiebreak(p_b, p_a, 0, 0).probability
    }
}
