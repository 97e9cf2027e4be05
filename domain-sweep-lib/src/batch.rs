//! Partitioning of candidates into batches.
//!
//! A batch is the unit of work handed to one worker. [`Batches`] wraps any
//! candidate iterator and yields consecutive, non-overlapping chunks of at
//! most `batch_size` names, pulling from the source only when asked. Empty
//! input yields no batches.

/// An ordered group of candidates checked sequentially by one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Position of this batch in the partition, starting at 0
    pub index: usize,
    pub domains: Vec<String>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Iterator adapter producing [`Batch`]es from a candidate iterator.
#[derive(Debug, Clone)]
pub struct Batches<I> {
    source: I,
    batch_size: usize,
    next_index: usize,
}

impl<I> Batches<I>
where
    I: Iterator<Item = String>,
{
    /// Partition `source` into batches of `batch_size`.
    ///
    /// A zero `batch_size` is treated as 1; strategies are validated before
    /// they reach this point.
    pub fn new<S>(source: S, batch_size: usize) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self {
            source: source.into_iter(),
            batch_size: batch_size.max(1),
            next_index: 0,
        }
    }
}

impl<I> Iterator for Batches<I>
where
    I: Iterator<Item = String>,
{
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        let domains: Vec<String> = self.source.by_ref().take(self.batch_size).collect();
        if domains.is_empty() {
            return None;
        }

        let batch = Batch {
            index: self.next_index,
            domains,
        };
        self.next_index += 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.source.size_hint();
        (
            lower.div_ceil(self.batch_size),
            upper.map(|upper| upper.div_ceil(self.batch_size)),
        )
    }
}

/// Number of batches needed for `items` candidates: `ceil(items / batch_size)`.
pub fn batch_count(items: usize, batch_size: usize) -> usize {
    items.div_ceil(batch_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::CandidateSet;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("d{}.io", i)).collect()
    }

    #[test]
    fn test_batch_count_and_order() {
        for &(n, b) in &[(0, 1), (1, 1), (10, 3), (12, 4), (100, 1), (7, 50), (17_576, 10)] {
            let input = names(n);
            let batches: Vec<Batch> = Batches::new(input.clone(), b).collect();

            assert_eq!(batches.len(), batch_count(n, b), "n={} b={}", n, b);
            assert!(batches.iter().all(|batch| !batch.is_empty() && batch.len() <= b));
            assert!(batches
                .iter()
                .enumerate()
                .all(|(i, batch)| batch.index == i));

            let rejoined: Vec<String> = batches.into_iter().flat_map(|b| b.domains).collect();
            assert_eq!(rejoined, input);
        }
    }

    #[test]
    fn test_only_last_batch_is_short() {
        let batches: Vec<Batch> = Batches::new(names(10), 4).collect();
        let sizes: Vec<usize> = batches.iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let mut batches = Batches::new(Vec::<String>::new(), 10);
        assert!(batches.next().is_none());
        assert_eq!(batch_count(0, 10), 0);
    }

    #[test]
    fn test_zero_batch_size_treated_as_one() {
        let batches: Vec<Batch> = Batches::new(names(3), 0).collect();
        assert_eq!(batches.len(), 3);
    }

    #[test]
    fn test_lazy_over_candidate_set() {
        let set = CandidateSet::new(4, &["com".to_string()]).unwrap();
        let mut batches = Batches::new(set.iter(), 50);
        assert_eq!(batches.size_hint(), (9140, Some(9140)));

        let first = batches.next().unwrap();
        assert_eq!(first.domains.first().map(String::as_str), Some("aaaa.com"));
        assert_eq!(first.domains.last().map(String::as_str), Some("aabx.com"));
        assert_eq!(batches.next().unwrap().index, 1);
    }
}
