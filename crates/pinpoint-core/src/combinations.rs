//! Lazy enumeration of token subsets.

/// Largest number of tokens combined into one fragment.
pub const MAX_COMBINATION_SIZE: usize = 3;

/// Every subset of up to `max_size` tokens, each concatenated in token order.
///
/// Subsets are yielded smallest first; within one size they come in
/// lexicographic index order, so `[a, b, c]` gives
/// `a, b, c, ab, ac, bc, abc`. Nothing is computed ahead of the consumer,
/// and a clone taken before iterating replays the whole sequence.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    tokens: &'a [String],
    max_size: usize,
    size: usize,
    /// Indices of the subset yielded last. Empty before the first subset of
    /// the current size.
    indices: Vec<usize>,
}

impl<'a> Combinations<'a> {
    /// Enumerate subsets of `tokens` with at most `max_size` members.
    #[must_use]
    pub fn new(tokens: &'a [String], max_size: usize) -> Self {
        Self {
            tokens,
            max_size,
            size: 1,
            indices: Vec::with_capacity(max_size),
        }
    }

    fn current(&self) -> String {
        self.indices
            .iter()
            .map(|&i| self.tokens[i].as_str())
            .collect()
    }

    /// Step `indices` to the next subset of the same size.
    fn advance(&mut self) -> bool {
        let n = self.tokens.len();
        let k = self.indices.len();
        let Some(pivot) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };
        self.indices[pivot] += 1;
        for i in pivot + 1..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let limit = self.max_size.min(self.tokens.len());
        while self.size <= limit {
            if self.indices.is_empty() {
                self.indices.extend(0..self.size);
                return Some(self.current());
            }
            if self.advance() {
                return Some(self.current());
            }
            self.indices.clear();
            self.size += 1;
        }
        None
    }
}
