use std::collections::BTreeMap;

/// Running totals for every word of one length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByLength {
    pub total_questions: u64,
    pub num_words: u64,
}

impl ByLength {
    pub fn average(&self) -> Option<f64> {
        (self.num_words > 0).then(|| self.total_questions as f64 / self.num_words as f64)
    }
}

/// Per-length buckets for one strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measures {
    by_length: BTreeMap<usize, ByLength>,
}

impl Measures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, word_length: usize, questions: usize) {
        let bucket = self.by_length.entry(word_length).or_default();
        bucket.num_words += 1;
        bucket.total_questions += questions as u64;
    }

    pub fn bucket(&self, word_length: usize) -> Option<&ByLength> {
        self.by_length.get(&word_length)
    }

    /// Average questions for words of `word_length`, or `None` without data.
    pub fn average(&self, word_length: usize) -> Option<f64> {
        self.bucket(word_length).and_then(ByLength::average)
    }

    pub fn max_length(&self) -> Option<usize> {
        self.by_length.keys().next_back().copied()
    }

    /// Folds another set of buckets into this one by addition.
    pub fn merge(&mut self, other: &Measures) {
        for (&length, theirs) in &other.by_length {
            let ours = self.by_length.entry(length).or_default();
            ours.total_questions += theirs.total_questions;
            ours.num_words += theirs.num_words;
        }
    }
}
