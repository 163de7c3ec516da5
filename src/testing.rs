//! Testing helpers.

use std::fmt::Debug;

use assert_float_eq::*;

use crate::domain::Breakdown;

/// Asserts that `actual` enumerates exactly the `expected` outcomes, each within an absolute
/// `epsilon`, and that they sum to its total.
pub fn assert_breakdown_near<K: Ord + Debug>(expected: &[(K, f64)], actual: &Breakdown<K>, epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.outcomes.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.outcomes.len()
    );
    for (key, expected) in expected {
        let actual = actual
            .get(key)
            .unwrap_or_else(|| panic!("missing outcome {key:?}"));
        assert_float_absolute_eq!(*expected, actual, epsilon);
    }
    let total: f64 = actual.outcomes.values().sum();
    assert_float_absolute_eq!(total, actual.probability, epsilon);
}
