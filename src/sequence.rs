//! Strict zipping and lazy powersets.

use crate::error::Ga4ghError;
use crate::Result;

/// Zip equal-length lists into rows of positional elements.
///
/// Fails with `LengthMismatch` naming the first list whose length differs
/// from the first list's.
pub fn zip_lists<T: Clone>(lists: &[&[T]]) -> Result<Vec<Vec<T>>> {
    let Some(first) = lists.first() else {
        return Ok(Vec::new());
    };
    let expected = first.len();
    if let Some((index, list)) = lists
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, list)| list.len() != expected)
    {
        return Err(Ga4ghError::LengthMismatch {
            index,
            len: list.len(),
            expected,
        });
    }

    Ok((0..expected)
        .map(|i| lists.iter().map(|list| list[i].clone()).collect())
        .collect())
}

/// Iterator over every subset of a list, by increasing size and then by
/// element order within each size.
#[derive(Debug, Clone)]
pub struct Powerset<T> {
    items: Vec<T>,
    indices: Vec<usize>,
    done: bool,
}

impl<T: Clone> Powerset<T> {
    /// Start enumerating the subsets of `items`.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
            indices: Vec::new(),
            done: false,
        }
    }

    fn advance(&mut self) {
        let n = self.items.len();
        let k = self.indices.len();
        match (0..k).rev().find(|&i| self.indices[i] < n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None if k == n => self.done = true,
            None => self.indices = (0..=k).collect(),
        }
    }
}

impl<T: Clone> Iterator for Powerset<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let subset = self.indices.iter().map(|&i| self.items[i].clone()).collect();
        self.advance();
        Some(subset)
    }
}

/// Lazily yield the subsets of `items`, at most `max_sets` of them.
///
/// ```
/// use ga4gh_common::sequence::powerset;
///
/// let sets: Vec<_> = powerset([1, 2, 3], None).collect();
/// assert_eq!(sets[4], vec![1, 2]);
/// assert_eq!(sets.len(), 8);
/// ```
pub fn powerset<T: Clone>(
    items: impl IntoIterator<Item = T>,
    max_sets: Option<usize>,
) -> std::iter::Take<Powerset<T>> {
    Powerset::new(items).take(max_sets.unwrap_or(usize::MAX))
}
