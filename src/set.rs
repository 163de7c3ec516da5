//! Advantage set: first to six games by two, with a tiebreak at 6-6.
//!
//! Scores are `(g_a, g_b)` where `a` is the player **about to serve the next game**. Each game is
//! reduced to a hold probability `s_a` and a break probability `r_a` for player `a`.

use crate::domain::{Role, Score};
use crate::factorial::convolved_binomial;
use crate::game::closed_form_game;
use crate::tiebreak::{tiebreak_for_first_server, ServeSplit};

/// Whether either player has already taken the set.
pub fn is_decided(score: &Score) -> bool {
    matches!((score.leader(), score.trailer()), (7, _) | (6, 0..=4))
}

/// Probability of one final: `f_a` for the final game and `score.a` further games won across
/// `serve_games` and `return_games` in any order. `score` counts the games still to win, excluding
/// the final one.
pub fn prob_set_outcome(score: Score, serve_games: u8, return_games: u8, s_a: f64, r_a: f64, f_a: f64) -> f64 {
    f_a * convolved_binomial(score.a, serve_games, return_games, s_a, r_a)
}

/// Splits the next `games_to_play` games, the last of which is the final. Player `a` serves the
/// first of them and serve alternates thereafter.
pub fn derive_game_split(games_to_play: u8) -> ServeSplit {
    debug_assert!(games_to_play > 0, "no games to play");
    let half = games_to_play / 2;
    if games_to_play % 2 == 1 {
        ServeSplit {
            serves: half,
            returns: half,
            final_point: Role::Server,
        }
    } else {
        ServeSplit {
            serves: half,
            returns: half - 1,
            final_point: Role::Receiver,
        }
    }
}

/// Probability of taking the set from 5-5 when the player holding `first` serves game 11 and the
/// player holding `second` serves game 12. `tiebreak` applies if the games are shared.
fn from_five_all(first: f64, second: f64, tiebreak: f64) -> f64 {
    first * second + (first * (1.0 - second) + (1.0 - first) * second) * tiebreak
}

/// Probability of winning the set from `g_a`-`g_b`.
pub fn prob_set(p_a: f64, p_b: f64, g_a: u8, g_b: u8) -> f64 {
    match (g_a, g_b) {
        (7, _) | (6, 0..=4) => return 1.0,
        (_, 7) | (0..=4, 6) => return 0.0,
        _ => {}
    }

    let s_a = closed_form_game(p_a);
    let r_a = 1.0 - closed_form_game(p_b);
    match (g_a, g_b) {
        (6, 6) => return tiebreak_for_first_server(p_a, p_b, true),
        (6, 5) => return s_a + (1.0 - s_a) * tiebreak_for_first_server(p_a, p_b, false),
        (5, 6) => return s_a * tiebreak_for_first_server(p_a, p_b, false),
        (5, 5) => return from_five_all(s_a, r_a, tiebreak_for_first_server(p_a, p_b, true)),
        _ => {}
    }

    let mut prob = 0.0;
    for k in g_b..=4 {
        let needed = Score::new(6 - g_a, k - g_b);
        let split = derive_game_split(needed.total());
        let f_a = match split.final_point {
            Role::Server => s_a,
            Role::Receiver => r_a,
        };
        let others = Score::new(needed.a - 1, needed.b);
        prob += prob_set_outcome(others, split.serves, split.returns, s_a, r_a, f_a);
    }

    // whoever serves the 11th game also serves first in the tiebreak
    let to_five_all = 10 - g_a - g_b;
    let reach_five_all = convolved_binomial(5 - g_a, to_five_all.div_ceil(2), to_five_all / 2, s_a, r_a);
    let from_five_all = if to_five_all % 2 == 0 {
        from_five_all(s_a, r_a, tiebreak_for_first_server(p_a, p_b, true))
    } else {
        from_five_all(r_a, s_a, tiebreak_for_first_server(p_a, p_b, false))
    };
    prob + reach_five_all * from_five_all
}
