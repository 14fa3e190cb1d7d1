//! Persistent digit sequences with structural sharing
//!
//! A candidate number is a chain of immutable nodes. The root carries the
//! base and the first digit; every extension points back at its parent, so
//! growing a candidate by one digit is O(1) and never copies or mutates the
//! prefix it extends. Nodes are reference counted, which lets any number of
//! worker threads read (and extend) a shared prefix without locking.

#![allow(dead_code)]

pub mod parity;

pub use parity::{Parity, parity_class, partition_digits};

use std::fmt;
use std::sync::Arc;

/// A candidate number in some base, stored as a chain of digits.
///
/// Cloning a `DigitSequence` is cheap: it bumps a reference count.
#[derive(Clone)]
pub struct DigitSequence {
    node: Arc<Node>,
}

enum Node {
    Root {
        base: u32,
        digit: u32,
    },
    Extension {
        parent: DigitSequence,
        digit: u32,
        len: usize,
    },
}

impl DigitSequence {
    /// Create a length-1 sequence holding `digit` in `base`.
    pub fn root(base: u32, digit: u32) -> Self {
        debug_assert!(base >= 2, "base must be at least 2, got {}", base);
        debug_assert!(
            (1..base).contains(&digit),
            "digit {} out of range for base {}",
            digit,
            base
        );
        Self {
            node: Arc::new(Node::Root { base, digit }),
        }
    }

    /// Create a new sequence that is `self` followed by `digit`.
    ///
    /// The receiver is shared, not copied. The caller guarantees that
    /// `digit` does not already occur in the sequence.
    pub fn extend(&self, digit: u32) -> Self {
        debug_assert!(
            (1..self.base()).contains(&digit),
            "digit {} out of range for base {}",
            digit,
            self.base()
        );
        debug_assert!(!self.contains(digit), "digit {} already used", digit);
        Self {
            node: Arc::new(Node::Extension {
                parent: self.clone(),
                digit,
                len: self.len() + 1,
            }),
        }
    }

    /// The digit stored at this node (the last digit of the sequence).
    pub fn last_digit(&self) -> u32 {
        match *self.node {
            Node::Root { digit, .. } | Node::Extension { digit, .. } => digit,
        }
    }

    /// The sequence without its last digit, or `None` at the root.
    pub fn parent(&self) -> Option<&DigitSequence> {
        match &*self.node {
            Node::Root { .. } => None,
            Node::Extension { parent, .. } => Some(parent),
        }
    }

    /// Number of digits in the sequence.
    pub fn len(&self) -> usize {
        match *self.node {
            Node::Root { .. } => 1,
            Node::Extension { len, .. } => len,
        }
    }

    /// Sequences always hold at least one digit.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The base the sequence is written in, read from the root node.
    pub fn base(&self) -> u32 {
        let mut current = self;
        loop {
            match &*current.node {
                Node::Root { base, .. } => return *base,
                Node::Extension { parent, .. } => current = parent,
            }
        }
    }

    /// Iterate over the digits from the last one back to the root.
    pub fn digits_rev(&self) -> DigitsRev<'_> {
        DigitsRev {
            current: Some(self),
        }
    }

    /// The digits in reading order, root first.
    pub fn digits(&self) -> Vec<u32> {
        let mut digits: Vec<u32> = self.digits_rev().collect();
        digits.reverse();
        digits
    }

    /// Whether `digit` occurs anywhere on the path back to the root.
    pub fn contains(&self, digit: u32) -> bool {
        self.digits_rev().any(|d| d == digit)
    }

    /// Flags indexed by digit, `true` for every digit already in the sequence.
    pub fn used_digits(&self) -> Vec<bool> {
        let mut used = vec![false; self.base() as usize];
        for digit in self.digits_rev() {
            used[digit as usize] = true;
        }
        used
    }

    /// Value of the sequence modulo `modulus`.
    ///
    /// Applies Horner's rule root first, carrying only the remainder, so the
    /// full value is never built.
    pub fn modulo(&self, modulus: u64) -> u64 {
        assert!(modulus > 0, "modulus must be positive");
        let base = u128::from(self.base());
        let modulus = u128::from(modulus);
        let remainder = self
            .digits()
            .into_iter()
            .fold(0u128, |remainder, digit| {
                (u128::from(digit) + base * remainder) % modulus
            });
        // remainder < modulus <= u64::MAX
        remainder as u64
    }

    /// Render as `[d0:d1:...:dk]`, digits in decimal, root first.
    pub fn render(&self) -> String {
        let digits: Vec<String> = self.digits().iter().map(|d| d.to_string()).collect();
        format!("[{}]", digits.join(":"))
    }

    /// Whether two handles point at the same node.
    pub fn ptr_eq(&self, other: &DigitSequence) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl fmt::Display for DigitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for DigitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitSequence")
            .field("base", &self.base())
            .field("digits", &self.digits())
            .finish()
    }
}

/// Iterator over a sequence's digits, last digit first.
pub struct DigitsRev<'a> {
    current: Option<&'a DigitSequence>,
}

impl Iterator for DigitsRev<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let current = self.current?;
        self.current = current.parent();
        Some(current.last_digit())
    }
}
