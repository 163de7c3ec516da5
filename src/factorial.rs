//! Factorials, binomial coefficients and the binomial distributions built on them.

pub trait Factorial {
    fn get(&self, n: u8) -> u128;
}

#[derive(Default)]
pub struct Calculator;

impl Factorial for Calculator {
    #[inline]
    fn get(&self, n: u8) -> u128 {
        assert!(n <= 34, "{n}! overflows");
        let mut product = 1u128;
        for i in 2..=n {
            product *= i as u128;
        }
        product
    }
}

/// Binomial coefficient: the number of combinations obtained when sampling `r` items from a
/// set of `n` without replacement.
pub fn combinations(n: u8, r: u8, factorial: &impl Factorial) -> u128 {
    assert!(n >= r, "n ({n}) < r ({r})");
    factorial.get(n) / factorial.get(r) / factorial.get(n - r)
}

/// `nCr` as a real number, ready to be multiplied by fractional probabilities.
#[inline]
pub fn ncr(n: u8, r: u8) -> f64 {
    combinations(n, r, &Calculator) as f64
}

/// Probability of `r` successes in `n` independent Bernoulli trials, given `p` probability of success.
pub fn binomial(n: u8, r: u8, p: f64) -> f64 {
    ncr(n, r) * p.powi(r as i32) * (1.0 - p).powi((n - r) as i32)
}

/// Probability of exactly `successes` across two independent blocks of Bernoulli trials: `n_1`
/// trials with success probability `p_1` and `n_2` trials with `p_2`.
///
/// Splits are visited starting with as many successes as possible in the first block. A split that
/// needs more successes from a block than it has trials contributes nothing; when `successes`
/// exceeds `n_1 + n_2` the result is zero.
pub fn convolved_binomial(successes: u8, n_1: u8, n_2: u8, p_1: f64, p_2: f64) -> f64 {
    let mut prob = 0.0;
    for r_1 in (0..=successes.min(n_1)).rev() {
        let r_2 = successes - r_1;
        if r_2 <= n_2 {
            prob += binomial(n_1, r_1, p_1) * binomial(n_2, r_2, p_2);
        }
    }
    prob
}
