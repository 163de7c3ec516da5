//! Scores, stages and the probability breakdowns shared by every model.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// A pair of counters: `a` for the player whose win probability is sought, `b` for the opponent.
/// The same type tallies points, games and sets.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub a: u8,
    pub b: u8,
}
impl Score {
    pub const fn new(a: u8, b: u8) -> Self {
        Self { a, b }
    }

    pub const fn nil_all() -> Self {
        Self { a: 0, b: 0 }
    }

    pub fn total(&self) -> u8 {
        self.a + self.b
    }

    /// The same score seen from the opponent's side.
    pub fn flip(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }

    /// The higher of the two counts.
    pub fn leader(&self) -> u8 {
        u8::max(self.a, self.b)
    }

    /// The lower of the two counts.
    pub fn trailer(&self) -> u8 {
        u8::min(self.a, self.b)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot parse '{0}' as a score; expected two counts separated by '-', e.g. '3-2'")]
pub struct ParseScoreError(String);

impl FromStr for Score {
    type Err = ParseScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('-')
            .ok_or_else(|| ParseScoreError(s.to_string()))?;
        let a = a
            .trim()
            .parse()
            .map_err(|_| ParseScoreError(s.to_string()))?;
        let b = b
            .trim()
            .parse()
            .map_err(|_| ParseScoreError(s.to_string()))?;
        Ok(Self { a, b })
    }
}

/// Who serves a designated point or game, relative to the player of interest.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Server,
    Receiver,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize)]
pub enum Stage {
    Game,
    Tiebreak,
    Set,
    Match,
}

/// A win probability together with the contribution of each enumerated final.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakdown<K: Ord> {
    pub probability: f64,
    pub outcomes: BTreeMap<K, f64>,
}
impl<K: Ord> Breakdown<K> {
    pub fn certain() -> Self {
        Self::resolved(1.0)
    }

    pub fn impossible() -> Self {
        Self::resolved(0.0)
    }

    /// A probability that was not derived by enumerating finals.
    pub fn resolved(probability: f64) -> Self {
        Self {
            probability,
            outcomes: BTreeMap::new(),
        }
    }

    pub fn from_outcomes(outcomes: BTreeMap<K, f64>) -> Self {
        let probability = outcomes.values().sum();
        Self {
            probability,
            outcomes,
        }
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.outcomes.get(key).copied()
    }

    pub fn is_decomposed(&self) -> bool {
        !self.outcomes.is_empty()
    }
}
