//! Candidate name generation.
//!
//! A [`CandidateSet`] describes every `{letters}.{tld}` name of a fixed length
//! over an ordered TLD list. Nothing is materialized up front: each candidate
//! is decoded from its position, treating the letters as a base-26 number with
//! the first letter most significant. Iteration therefore runs TLD by TLD, and
//! within a TLD in lexicographic order (`aaa`, `aab`, ... `zzz`).
//!
//! # Examples
//!
//! ```
//! use domain_sweep_lib::CandidateSet;
//!
//! let set = CandidateSet::new(3, &["io".to_string(), "com".to_string()]).unwrap();
//! assert_eq!(set.len(), 2 * 17_576);
//!
//! let mut names = set.iter();
//! assert_eq!(names.next().as_deref(), Some("aaa.io"));
//! assert_eq!(names.next().as_deref(), Some("aab.io"));
//! assert_eq!(set.get(17_576).as_deref(), Some("aaa.com"));
//! ```

use crate::error::DomainSweepError;
use crate::types::{ScanConfig, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::utils::normalize_tlds;
use rand::Rng;
use std::iter::FusedIterator;

const ALPHABET_SIZE: usize = 26;

/// The ordered search space of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    length: usize,
    tlds: Vec<String>,
    per_tld: usize,
}

impl CandidateSet {
    /// Create the candidate set for `length` letters over `tlds`.
    ///
    /// The length is checked here, before any candidate is produced. TLDs are
    /// normalized and de-duplicated.
    pub fn new(length: usize, tlds: &[String]) -> Result<Self, DomainSweepError> {
        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
            return Err(DomainSweepError::InvalidLength {
                length,
                min: MIN_NAME_LENGTH,
                max: MAX_NAME_LENGTH,
            });
        }

        let per_tld = ALPHABET_SIZE
            .checked_pow(length as u32)
            .ok_or_else(|| DomainSweepError::internal("candidate space overflows usize"))?;

        Ok(Self {
            length,
            tlds: normalize_tlds(tlds)?,
            per_tld,
        })
    }

    /// Candidate set described by a scan configuration.
    pub fn from_config(config: &ScanConfig) -> Result<Self, DomainSweepError> {
        Self::new(config.length, &config.tlds)
    }

    /// Total number of candidates: `26^length × tlds`.
    pub fn len(&self) -> usize {
        self.per_tld * self.tlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn tlds(&self) -> &[String] {
        &self.tlds
    }

    /// Candidates per TLD: `26^length`.
    pub fn per_tld(&self) -> usize {
        self.per_tld
    }

    /// Candidate at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<String> {
        (index < self.len()).then(|| self.decode(index))
    }

    /// Lazy iterator over all candidates, in order.
    pub fn iter(&self) -> Candidates<'_> {
        Candidates {
            set: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Draw `amount` distinct candidates uniformly at random.
    ///
    /// Used to build the benchmark sample; the draw is independent of the
    /// iteration order. Returns every candidate when `amount` exceeds the set.
    pub fn random_sample<R: Rng + ?Sized>(&self, amount: usize, rng: &mut R) -> Vec<String> {
        let amount = amount.min(self.len());
        rand::seq::index::sample(rng, self.len(), amount)
            .into_iter()
            .map(|index| self.decode(index))
            .collect()
    }

    fn decode(&self, index: usize) -> String {
        let tld = &self.tlds[index / self.per_tld];
        let mut combo = index % self.per_tld;

        let mut letters = vec![b'a'; self.length];
        for slot in letters.iter_mut().rev() {
            *slot = b'a' + (combo % ALPHABET_SIZE) as u8;
            combo /= ALPHABET_SIZE;
        }

        let mut name = String::with_capacity(self.length + 1 + tld.len());
        name.extend(letters.into_iter().map(char::from));
        name.push('.');
        name.push_str(tld);
        name
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = String;
    type IntoIter = Candidates<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`CandidateSet`]. Restartable via [`CandidateSet::iter`]
/// and cheap to slice with `skip`/`take`.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    set: &'a CandidateSet,
    front: usize,
    back: usize,
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.front >= self.back {
            return None;
        }
        let name = self.set.decode(self.front);
        self.front += 1;
        Some(name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<String> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for Candidates<'_> {
    fn next_back(&mut self) -> Option<String> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.set.decode(self.back))
    }
}

impl ExactSizeIterator for Candidates<'_> {}

impl FusedIterator for Candidates<'_> {}
