//! Best-of-N match, treating every set as an independent trial won with a fixed probability.
//!
//! The set in progress is priced exactly from its game and point score; sets yet to start use the
//! probability of winning a set from 0-0 with `a` serving first.

use std::collections::BTreeMap;

use crate::domain::{Breakdown, Score};
use crate::factorial::binomial;
use crate::game::game_from_score;
use crate::set::prob_set;
use crate::tiebreak::prob_tiebreak;

#[inline]
pub fn sets_to_win(best_of: u8) -> u8 {
    best_of / 2 + 1
}

/// Probability of winning the match from `st_a`-`st_b` in sets, given `p_set` probability of
/// winning each remaining set. Each final set score contributes its own entry.
pub fn prob_match_outcome(p_set: f64, st_a: u8, st_b: u8, best_of: u8) -> Breakdown<Score> {
    let target = sets_to_win(best_of);
    if st_a >= target {
        return Breakdown::certain();
    } else if st_b >= target {
        return Breakdown::impossible();
    }

    let needed = target - st_a;
    let outcomes = (st_b..target)
        .map(|k| {
            let to_play = needed + k - st_b;
            // the last set is won; the rest arrive in any order
            let prob = p_set * binomial(to_play - 1, needed - 1, p_set);
            (Score::new(target, k), prob)
        })
        .collect::<BTreeMap<_, _>>();
    Breakdown::from_outcomes(outcomes)
}

/// Probability of winning the match from a full live score. Player `a` serves the next point:
/// `g_a`-`g_b` is the current set, and `pt_a`-`pt_b` is either a game with `a` serving or, at 6-6,
/// a tiebreak with `a` due to serve.
pub fn prob_match(p_a: f64, p_b: f64, st_a: u8, st_b: u8, g_a: u8, g_b: u8, pt_a: u8, pt_b: u8, best_of: u8) -> f64 {
    let target = sets_to_win(best_of);
    if st_a >= target {
        return 1.0;
    } else if st_b >= target {
        return 0.0;
    }

    let p_set = prob_set(p_a, p_b, 0, 0);
    let p_this = if pt_a == 0 && pt_b == 0 {
        if g_a == 0 && g_b == 0 {
            if st_a == 0 && st_b == 0 {
                return prob_match_outcome(p_set, 0, 0, best_of).probability;
            }
            p_set
        } else {
            prob_set(p_a, p_b, g_a, g_b)
        }
    } else if g_a == 6 && g_b == 6 {
        prob_tiebreak(p_a, p_b, pt_a, pt_b).probability
    } else {
        // the opponent serves the game after this one
        let p_game = game_from_score(p_a, pt_a, pt_b);
        let after_win = 1.0 - prob_set(p_b, p_a, g_b, g_a + 1);
        let after_loss = 1.0 - prob_set(p_b, p_a, g_b + 1, g_a);
        p_game * after_win + (1.0 - p_game) * after_loss
    };

    let win_set = prob_match_outcome(p_set, st_a + 1, st_b, best_of).probability;
    let lose_set = prob_match_outcome(p_set, st_a, st_b + 1, best_of).probability;
    p_this * win_set + (1.0 - p_this) * lose_set
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;
    use crate::testing::assert_breakdown_near;

    #[test]
    fn outcome_best_of_three() {
        let breakdown = prob_match_outcome(0.6, 0, 0, 3);
        assert_float_absolute_eq!(0.648, breakdown.probability, 1e-12);
        assert_float_absolute_eq!(0.36, breakdown.get(&Score::new(2, 0)).unwrap(), 1e-12);
        assert_float_absolute_eq!(0.288, breakdown.get(&Score::new(2, 1)).unwrap(), 1e-12);
        assert_eq!(2, breakdown.outcomes.len());
    }

    #[test]
    fn outcome_best_of_five_from_one_nil() {
        let breakdown = prob_match_outcome(0.6, 1, 0, 5);
        assert_float_absolute_eq!(0.8208, breakdown.probability, 1e-12);
        let expected = [(Score::new(3, 0), 0.36), (Score::new(3, 1), 0.288), (Score::new(3, 2), 0.1728)];
        assert_breakdown_near(&expected, &breakdown, 1e-12);
    }

    #[test]
    fn outcome_terminal() {
        assert_eq!(Breakdown::certain(), prob_match_outcome(0.1, 2, 1, 3));
        assert_eq!(Breakdown::impossible(), prob_match_outcome(0.9, 2, 3, 5));
        assert_eq!(Breakdown::certain(), prob_match_outcome(0.0, 1, 0, 1));
    }

    #[test]
    fn outcome_single_set() {
        let breakdown = prob_match_outcome(0.3, 0, 0, 1);
        assert_eq!(0.3, breakdown.probability);
        assert_eq!(Some(0.3), breakdown.get(&Score::new(1, 0)));
    }

    #[test]
    fn outcome_fair_sets() {
        for best_of in [1, 3, 5, 7] {
            assert_float_absolute_eq!(0.5, prob_match_outcome(0.5, 0, 0, best_of).probability, 1e-12);
        }
    }

    #[test]
    fn terminal_match() {
        assert_eq!(1.0, prob_match(0.1, 0.9, 2, 0, 0, 0, 0, 0, 3));
        assert_eq!(0.0, prob_match(0.9, 0.1, 1, 3, 0, 0, 0, 0, 5));
    }

    #[test]
    fn fair_match() {
        assert_eq!(0.5, prob_match(0.5, 0.5, 0, 0, 0, 0, 0, 0, 3));
        assert_eq!(0.5, prob_match(0.5, 0.5, 1, 1, 0, 0, 0, 0, 3));
        assert_eq!(0.5, prob_match(0.5, 0.5, 0, 0, 0, 0, 0, 0, 1));
    }

    #[test]
    fn values() {
        assert_float_absolute_eq!(0.8195556891114641, prob_match(0.62, 0.55, 0, 0, 0, 0, 0, 0, 3), 1e-12);
        assert_float_absolute_eq!(0.8731813981144438, prob_match(0.62, 0.55, 0, 0, 0, 0, 0, 0, 5), 1e-12);
        assert_float_absolute_eq!(0.9706318123642889, prob_match(0.62, 0.55, 1, 0, 3, 2, 2, 1, 3), 1e-12);
        assert_float_absolute_eq!(0.4513012753278688, prob_match(0.62, 0.55, 1, 1, 6, 6, 3, 4, 3), 1e-12);
        assert_float_absolute_eq!(0.5071049260441086, prob_match(0.62, 0.55, 0, 1, 2, 2, 0, 0, 3), 1e-12);
        assert_float_absolute_eq!(0.8307352115677045, prob_match(0.62, 0.55, 0, 0, 5, 6, 4, 3, 5), 1e-12);
    }

    #[test]
    fn deciding_set_is_the_set() {
        assert_eq!(prob_set(0.62, 0.55, 0, 0), prob_match(0.62, 0.55, 1, 1, 0, 0, 0, 0, 3));
        assert_eq!(prob_set(0.62, 0.55, 3, 4), prob_match(0.62, 0.55, 2, 2, 3, 4, 0, 0, 5));
    }

    #[test]
    fn nil_all_honours_best_of() {
        let p_set = prob_set(0.62, 0.55, 0, 0);
        for best_of in [1, 3, 5, 7] {
            assert_eq!(
                prob_match_outcome(p_set, 0, 0, best_of).probability,
                prob_match(0.62, 0.55, 0, 0, 0, 0, 0, 0, best_of)
            );
        }
    }

    #[test]
    fn monotone_in_p_a() {
        let mut last = 0.0;
        for i in 1..20 {
            let prob = prob_match(i as f64 / 20.0, 0.6, 1, 0, 3, 2, 2, 1, 3);
            assert!(prob >= last - 1e-12, "step {i}: {prob} < {last}");
            last = prob;
        }
    }
}
