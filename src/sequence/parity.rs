//! Digit parity classes used to seed and prune the search

/// Whether a digit is even or odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of(value: u64) -> Self {
        if value % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    pub fn matches(self, digit: u32) -> bool {
        Parity::of(u64::from(digit)) == self
    }
}

/// Nonzero digits of `base` whose parity matches the position `next_len`.
///
/// Position `k` (1-based) takes digits of the same parity as `k`: odd
/// positions take odd digits, even positions take even digits.
pub fn parity_class(base: u32, next_len: usize) -> impl Iterator<Item = u32> {
    let parity = Parity::of(next_len as u64);
    (1..base).filter(move |&d| parity.matches(d))
}

/// Split the nonzero digits of `base` into `(odd, even)`.
pub fn partition_digits(base: u32) -> (Vec<u32>, Vec<u32>) {
    (1..base).partition(|&d| Parity::Odd.matches(d))
}
