use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::NGramEntry;

pub const NGRAM_RANGE: RangeInclusive<usize> = 1..=5;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Counts word n-grams (1 to 5 words) over the whole corpus.
/// See [`count_ngrams`].
pub fn freq_ngrams<S: AsRef<str>>(texts: &[S]) -> Vec<NGramEntry> {
    count_ngrams(texts, NGRAM_RANGE)
}

/// Counts every contiguous n-gram of each text for `n` in `range`, summed over all texts.
///
/// N-grams never cross text boundaries. Words are lowercased.
/// Sorted by count, descending; equal counts by n-gram text, descending.
pub fn count_ngrams<S: AsRef<str>>(texts: &[S], range: RangeInclusive<usize>) -> Vec<NGramEntry> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for text in texts {
        let lowered = text.as_ref().to_lowercase();
        let words: Vec<&str> = WORD_RE.find_iter(&lowered).map(|m| m.as_str()).collect();

        for n in range.clone() {
            if n == 0 {
                continue;
            }
            if n > words.len() {
                break;
            }
            for window in words.windows(n) {
                *counts.entry(window.join(" ")).or_default() += 1;
            }
        }
    }

    let mut ngrams: Vec<NGramEntry> = counts
        .into_iter()
        .map(|(ngram, count)| NGramEntry { count, ngram })
        .collect();
    ngrams.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| b.ngram.cmp(&a.ngram)));
    ngrams
}
