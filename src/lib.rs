//! Exact win probabilities for a tennis game, tiebreak, set and match from any live score, given
//! only each player's probability of winning a point on serve.

#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod domain;
pub mod error;
pub mod factorial;
pub mod file;
pub mod game;
pub mod matchplay;
pub mod model;
pub mod print;
pub mod set;
pub mod sim;
pub mod tiebreak;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
