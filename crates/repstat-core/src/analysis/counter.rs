//! Per-sentence repetition counting.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::ngram::{NgramOrder, ngram_count, ngrams};

/// Which repetitions count against a sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RepetitionMode {
    /// An n-gram recurring within the last `order` n-grams (local echo).
    #[default]
    Adjacent,
    /// Every extra occurrence of an n-gram anywhere in the sentence.
    Global,
}

impl RepetitionMode {
    /// Returns the mode as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adjacent => "adjacent",
            Self::Global => "global",
        }
    }
}

impl fmt::Display for RepetitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count repeated n-grams of `order` in one sentence.
///
/// The result is never negative and an empty sentence has zero repetitions.
pub fn count_repetitions<T: Eq + Hash>(
    sentence: &[T],
    mode: RepetitionMode,
    order: NgramOrder,
) -> usize {
    match mode {
        RepetitionMode::Adjacent => count_adjacent(sentence, order),
        RepetitionMode::Global => count_global(sentence, order),
    }
}

/// Lookback holds at most `order` n-grams; the oldest is evicted first.
fn count_adjacent<T: Eq>(sentence: &[T], order: NgramOrder) -> usize {
    let capacity = order.get();
    let mut lookback: VecDeque<&[T]> = VecDeque::with_capacity(capacity);
    let mut repetitions = 0;

    for gram in ngrams(sentence, order) {
        if lookback.contains(&gram) {
            repetitions += 1;
        }
        if lookback.len() == capacity {
            lookback.pop_front();
        }
        lookback.push_back(gram);
    }

    repetitions
}

fn count_global<T: Eq + Hash>(sentence: &[T], order: NgramOrder) -> usize {
    let mut counts: HashMap<&[T], usize> =
        HashMap::with_capacity(ngram_count(sentence.len(), order));
    for gram in ngrams(sentence, order) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts.values().map(|&v| v - 1).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<&str> {
        s.split(' ').collect()
    }

    fn order(n: usize) -> NgramOrder {
        NgramOrder::new(n).unwrap()
    }

    #[test]
    fn unigram_no_repetitions() {
        let sentence = tokens("This is a test !");
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Adjacent, order(1)),
            0
        );
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Global, order(1)),
            0
        );
    }

    #[test]
    fn unigram_adjacent_repetitions() {
        let sentence = tokens("This is a a a test !");
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Adjacent, order(1)),
            2
        );
    }

    #[test]
    fn distant_repeats_differ_between_modes() {
        let sentence = tokens("a This is a test ! a");
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Adjacent, order(1)),
            0
        );
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Global, order(1)),
            2
        );
    }

    #[test]
    fn bigram_repeat_inside_lookback() {
        let sentence = tokens("This is a is a test !");
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Adjacent, order(2)),
            1
        );
    }

    #[test]
    fn lookback_reaches_back_order_ngrams() {
        // ("x","y") recurs two bigrams later: inside an order-2 window.
        let sentence = tokens("x y x y");
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Adjacent, order(2)),
            1
        );
        // Three bigrams later falls outside the window.
        let sentence = tokens("x y z w x y");
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Adjacent, order(2)),
            0
        );
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Global, order(2)),
            1
        );
    }

    #[test]
    fn global_counts_excess_occurrences() {
        let sentence = tokens("the cat the dog the cat");
        // "the" x3 -> 2, "cat" x2 -> 1
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Global, order(1)),
            3
        );
    }

    #[test]
    fn empty_sentence_is_zero() {
        let sentence: Vec<&str> = Vec::new();
        for mode in [RepetitionMode::Adjacent, RepetitionMode::Global] {
            assert_eq!(count_repetitions(&sentence, mode, order(1)), 0);
            assert_eq!(count_repetitions(&sentence, mode, order(4)), 0);
        }
    }

    #[test]
    fn order_longer_than_sentence_is_zero() {
        let sentence = tokens("a a");
        assert_eq!(
            count_repetitions(&sentence, RepetitionMode::Global, order(3)),
            0
        );
    }

    #[test]
    fn works_over_character_tokens() {
        let chars: Vec<char> = "aab".chars().collect();
        assert_eq!(
            count_repetitions(&chars, RepetitionMode::Adjacent, order(1)),
            1
        );
    }

    #[test]
    fn repeated_calls_agree() {
        let sentence = tokens("so so so very very good");
        let first = count_repetitions(&sentence, RepetitionMode::Adjacent, order(1));
        let second = count_repetitions(&sentence, RepetitionMode::Adjacent, order(1));
        assert_eq!(first, second);
        assert_eq!(first, 3);
    }

    #[test]
    fn mode_labels() {
        assert_eq!(RepetitionMode::Adjacent.as_str(), "adjacent");
        assert_eq!(RepetitionMode::Global.to_string(), "global");
        assert_eq!(RepetitionMode::default(), RepetitionMode::Adjacent);
    }
}
