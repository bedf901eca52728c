//! Partitioning of the entity ID space into fixed-size batches.

use std::num::NonZeroU32;

/// A group of consecutive entity IDs fetched, resolved and loaded together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
  /// Zero-based position of this batch in the run.
  pub index: usize,
  pub ids:   Vec<u32>,
}

impl Batch {
  pub fn len(&self) -> usize { self.ids.len() }

  pub fn is_empty(&self) -> bool { self.ids.is_empty() }
}

/// Split `1..=total` into consecutive batches of `size` IDs.
///
/// Every batch holds exactly `size` IDs except possibly the last, so the
/// iterator yields `ceil(total / size)` batches.
pub fn batches(total: u32, size: NonZeroU32) -> impl Iterator<Item = Batch> {
  let size = size.get();
  (0..total.div_ceil(size)).map(move |index| {
    let first = index * size + 1;
    let last = first.saturating_add(size - 1).min(total);
    Batch { index: index as usize, ids: (first..=last).collect() }
  })
}

/// Number of batches [`batches`] yields for the same arguments.
pub fn batch_count(total: u32, size: NonZeroU32) -> usize {
  total.div_ceil(size.get()) as usize
}

#[cfg(test)]
mod tests {
  use super::*;

  fn size(n: u32) -> NonZeroU32 { NonZeroU32::new(n).unwrap() }

  #[test]
  fn twenty_five_by_ten() {
    let sizes: Vec<usize> = batches(25, size(10)).map(|b| b.len()).collect();
    assert_eq!(sizes, vec![10, 10, 5]);
  }

  #[test]
  fn batch_indices_are_sequential() {
    let indices: Vec<usize> = batches(25, size(10)).map(|b| b.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
  }

  #[test]
  fn covers_every_id_once() {
    for total in 0..40 {
      for n in 1..12 {
        let all: Vec<u32> = batches(total, size(n)).flat_map(|b| b.ids).collect();
        let expected: Vec<u32> = (1..=total).collect();
        assert_eq!(all, expected, "total={total} size={n}");
        assert_eq!(batches(total, size(n)).count(), batch_count(total, size(n)));
        assert_eq!(batch_count(total, size(n)), total.div_ceil(n) as usize);
      }
    }
  }

  #[test]
  fn zero_total_yields_nothing() {
    assert_eq!(batches(0, size(10)).count(), 0);
  }

  #[test]
  fn batch_larger_than_total() {
    let all: Vec<Batch> = batches(3, size(10)).collect();
    assert_eq!(all, vec![Batch { index: 0, ids: vec![1, 2, 3] }]);
  }
}
