//! Smooth-number generation.
//!
//! Lists the integers in a range whose prime factors all come from a small
//! fixed prime set. The generated kernels support exactly these sizes.

use crate::error::{BuiltinError, Result};

/// Candidate prime factors, in the order they are enabled by `primes`.
pub const SMOOTH_PRIMES: &[u64] = &[2, 3, 5, 7, 11, 13];

/// Request for the smooth numbers in `[min, max]`.
///
/// # Examples
///
/// ```
/// use spec_builtins_core::SmoothNumbers;
///
/// let sizes = SmoothNumbers::new(2, 16).with_primes(2).generate().unwrap();
/// assert_eq!(sizes, [2, 3, 4, 6, 8, 9, 12, 16]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothNumbers {
    pub min: u64,
    pub max: u64,
    /// How many leading entries of [`SMOOTH_PRIMES`] may appear as factors.
    pub primes: usize,
    /// Keep only numbers divisible by two.
    pub even_only: bool,
}

impl SmoothNumbers {
    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min,
            max,
            primes: SMOOTH_PRIMES.len(),
            even_only: false,
        }
    }

    pub fn with_primes(mut self, primes: usize) -> Self {
        self.primes = primes;
        self
    }

    pub fn even_only(mut self, even_only: bool) -> Self {
        self.even_only = even_only;
        self
    }

    /// Returns the matching numbers in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](BuiltinError::InvalidConfig) when `primes`
    /// is outside `1..=6`.
    pub fn generate(&self) -> Result<Vec<u64>> {
        if !(1..=SMOOTH_PRIMES.len()).contains(&self.primes) {
            return Err(BuiltinError::InvalidConfig(format!(
                "prime count must be between 1 and {}, got {}",
                SMOOTH_PRIMES.len(),
                self.primes
            )));
        }

        let mut out = Vec::new();
        collect_products(&SMOOTH_PRIMES[..self.primes], 1, self.max, &mut out);
        out.retain(|&n| {
            (self.min..=self.max).contains(&n) && (!self.even_only || n % 2 == 0)
        });
        out.sort_unstable();
        Ok(out)
    }
}

fn collect_products(primes: &[u64], acc: u64, max: u64, out: &mut Vec<u64>) {
    let Some((&prime, rest)) = primes.split_first() else {
        out.push(acc);
        return;
    };

    let mut value = acc;
    while value <= max {
        collect_products(rest, value, max, out);
        match value.checked_mul(prime) {
            Some(next) => value = next,
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_powers_of_two() {
        let out = SmoothNumbers::new(2, 64).with_primes(1).generate().unwrap();
        assert_eq!(out, [2, 4, 8, 16, 32, 64]);
    }

    #[test]
    fn test_default_range_bounds() {
        let out = SmoothNumbers::new(2, 512).generate().unwrap();
        assert_eq!(out.first(), Some(&2));
        assert_eq!(out.last(), Some(&512));
        assert!(out.contains(&13));
        assert!(out.contains(&429)); // 3 * 11 * 13
        assert!(!out.contains(&17));
        assert!(!out.contains(&1));
        assert!(out.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_even_only() {
        let out = SmoothNumbers::new(1, 20)
            .with_primes(3)
            .even_only(true)
            .generate()
            .unwrap();
        assert_eq!(out, [2, 4, 6, 8, 10, 12, 16, 18, 20]);
    }

    #[test]
    fn test_min_includes_one() {
        let out = SmoothNumbers::new(1, 5).with_primes(2).generate().unwrap();
        assert_eq!(out, [1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_when_min_exceeds_max() {
        let out = SmoothNumbers::new(10, 5).generate().unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_rejects_prime_count() {
        assert!(SmoothNumbers::new(2, 8).with_primes(0).generate().is_err());
        assert!(SmoothNumbers::new(2, 8).with_primes(7).generate().is_err());
    }

    #[test]
    fn test_large_max_does_not_overflow() {
        let out = SmoothNumbers::new(u64::MAX - 1, u64::MAX)
            .with_primes(1)
            .generate()
            .unwrap();
        assert!(out.is_empty());
    }
}
