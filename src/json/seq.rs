// Growable sequence with power-of-two capacity, backing tokens and tree children.
use std::collections::TryReserveError;
use std::error::Error as StdError;
use std::fmt;
use std::ops::Deref;

/// Raised when a `try_push` cannot reserve backing storage. The sequence that
/// hit it has discarded its buffer and must not be grown further.
#[derive(Debug)]
pub struct AllocError {
    source: TryReserveError,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sequence allocation failed: {}", self.source)
    }
}

impl StdError for AllocError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

/// Capacity for a logical size `n`: the smallest power of two strictly
/// greater than `n`, i.e. `2^(floor(log2(n)) + 1)`.
fn capacity_for(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let shift = usize::BITS - n.leading_zeros();
    if shift >= usize::BITS {
        return n;
    }
    1usize << shift
}

#[derive(Clone, Debug, PartialEq)]
pub struct Seq<T> {
    items: Vec<T>,
}

impl<T> Seq<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn push(&mut self, value: T) {
        let wanted = capacity_for(self.items.len() + 1);
        if wanted > self.items.capacity() {
            self.items.reserve_exact(wanted - self.items.len());
        }
        self.items.push(value);
    }

    /// Fallible variant of `push`. On reservation failure the prior buffer is
    /// discarded and the sequence is left empty.
    pub fn try_push(&mut self, value: T) -> Result<(), AllocError> {
        let wanted = capacity_for(self.items.len() + 1);
        if wanted > self.items.capacity() {
            let extra = wanted - self.items.len();
            if let Err(source) = self.items.try_reserve_exact(extra) {
                self.items = Vec::new();
                return Err(AllocError { source });
            }
        }
        self.items.push(value);
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for Seq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Seq<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Seq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{capacity_for, Seq};

    #[test]
    fn capacity_is_next_power_of_two_above_size() {
        let cases = [(1, 2), (2, 4), (3, 4), (4, 8), (5, 8), (7, 8), (8, 16)];
        for (size, capacity) in cases {
            assert_eq!(capacity_for(size), capacity, "size {size}");
        }
    }

    #[test]
    fn first_insertion_allocates() {
        let mut seq = Seq::new();
        seq.push(7u32);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.capacity(), 2);
        assert_eq!(seq[0], 7);
    }

    #[test]
    fn growth_preserves_contents() {
        let mut seq = Seq::new();
        for n in 0..20u32 {
            seq.push(n);
        }
        assert_eq!(seq.len(), 20);
        assert_eq!(seq.capacity(), 32);
        for n in 0..20u32 {
            assert_eq!(seq[n as usize], n);
        }
    }

    #[test]
    fn try_push_succeeds_under_normal_conditions() {
        let mut seq = Seq::new();
        seq.try_push("a").expect("push");
        seq.try_push("b").expect("push");
        assert_eq!(seq.as_slice(), &["a", "b"]);
    }
}
