// Dataset trait — unified interface for an indexed sample source

use pictor_core::{Error, Result};

/// A dataset is an indexed collection of samples.
///
/// Entries are enumerated once, at construction; `get` materialises one
/// sample by reading its source file(s) and never mutates the entry list.
/// Implementations must be `Send + Sync` so several threads may read from
/// the same instance without locking.
pub trait Dataset: Send + Sync {
    /// What `get` returns: `(image, label)`, `(image, mask)`, the image alone, ...
    type Item;

    /// Total number of samples in the dataset.
    fn len(&self) -> usize;

    /// Whether the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load the sample at position `index`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] past the end, and propagates any
    /// I/O or decode failure of the underlying file.
    fn get(&self, index: usize) -> Result<Self::Item>;

    /// Optional human-readable name.
    fn name(&self) -> &str {
        "dataset"
    }

    /// Iterate every sample in index order.
    fn iter(&self) -> Iter<'_, Self>
    where
        Self: Sized,
    {
        Iter {
            dataset: self,
            next: 0,
        }
    }
}

/// Sequential iterator over a [`Dataset`], yielding `Result` per sample.
pub struct Iter<'a, D> {
    dataset: &'a D,
    next: usize,
}

impl<'a, D: Dataset> Iterator for Iter<'a, D> {
    type Item = Result<D::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.dataset.len() {
            return None;
        }
        let item = self.dataset.get(self.next);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.dataset.len().saturating_sub(self.next);
        (rest, Some(rest))
    }
}

impl<'a, D: Dataset> ExactSizeIterator for Iter<'a, D> {}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(Error::IndexOutOfRange { index, len });
    }
    Ok(())
}
