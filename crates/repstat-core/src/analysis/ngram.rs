//! Contiguous n-gram extraction.

use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Number of consecutive tokens in an n-gram. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct NgramOrder(NonZeroUsize);

impl NgramOrder {
    /// Unigrams.
    pub const UNIGRAM: Self = Self(NonZeroUsize::MIN);

    /// Validate a raw order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNgramOrder`] when `order` is zero.
    pub fn new(order: usize) -> ConfigResult<Self> {
        NonZeroUsize::new(order)
            .map(Self)
            .ok_or(ConfigError::InvalidNgramOrder { order })
    }

    /// The order as a plain integer.
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for NgramOrder {
    fn default() -> Self {
        Self::UNIGRAM
    }
}

impl TryFrom<usize> for NgramOrder {
    type Error = ConfigError;

    fn try_from(order: usize) -> ConfigResult<Self> {
        Self::new(order)
    }
}

impl From<NgramOrder> for usize {
    fn from(order: NgramOrder) -> Self {
        order.get()
    }
}

impl fmt::Display for NgramOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Iterate over every window of `order` consecutive tokens, left to right.
///
/// Duplicates are preserved. A sentence shorter than `order` yields nothing.
pub fn ngrams<T>(sentence: &[T], order: NgramOrder) -> std::slice::Windows<'_, T> {
    sentence.windows(order.get())
}

/// Number of n-grams a sentence of `len` tokens produces.
pub const fn ngram_count(len: usize, order: NgramOrder) -> usize {
    len.saturating_sub(order.get() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(n: usize) -> NgramOrder {
        NgramOrder::new(n).unwrap()
    }

    #[test]
    fn zero_order_is_rejected() {
        let err = NgramOrder::new(0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNgramOrder { order: 0 }));
    }

    #[test]
    fn unigrams_are_the_tokens() {
        let sentence = ["a", "b", "a"];
        let grams: Vec<_> = ngrams(&sentence, order(1)).collect();
        assert_eq!(grams, vec![&["a"][..], &["b"][..], &["a"][..]]);
    }

    #[test]
    fn bigrams_keep_order_and_duplicates() {
        let sentence = ["is", "a", "is", "a"];
        let grams: Vec<_> = ngrams(&sentence, order(2)).collect();
        assert_eq!(
            grams,
            vec![&["is", "a"][..], &["a", "is"][..], &["is", "a"][..]]
        );
    }

    #[test]
    fn short_sentence_has_no_ngrams() {
        let sentence = ["only", "two"];
        assert_eq!(ngrams(&sentence, order(3)).count(), 0);
        assert_eq!(ngram_count(sentence.len(), order(3)), 0);
    }

    #[test]
    fn empty_sentence_has_no_ngrams() {
        let sentence: [&str; 0] = [];
        assert_eq!(ngrams(&sentence, order(1)).count(), 0);
    }

    #[test]
    fn count_matches_iterator_length() {
        let sentence = ["w"; 7];
        for n in 1..=9 {
            assert_eq!(
                ngrams(&sentence, order(n)).count(),
                ngram_count(sentence.len(), order(n))
            );
        }
    }

    #[test]
    fn extraction_is_restartable() {
        let sentence = ["x", "y", "z"];
        let first: Vec<_> = ngrams(&sentence, order(2)).collect();
        let second: Vec<_> = ngrams(&sentence, order(2)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn order_deserializes_from_integer() {
        let parsed: NgramOrder = serde_json::from_str("3").unwrap();
        assert_eq!(parsed.get(), 3);
        assert!(serde_json::from_str::<NgramOrder>("0").is_err());
    }
}
