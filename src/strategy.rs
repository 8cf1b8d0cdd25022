use std::thread;

use crate::alphabet::{ALPHABET_SIZE, Symbol, Word};
use crate::huffman::MergeTree;
use crate::measure::Measures;

/// Letters ordered from most to least frequent in English word lists.
pub const FREQUENCY_RANKING: &str = "eiaonsrtlcupdmhgybfvkwxzqj";

pub type CostFn<'a> = Box<dyn Fn(&[Symbol]) -> usize + Send + Sync + 'a>;

/// A named way of guessing words, with its own per-length measurements.
pub struct Strategy<'a> {
    name: String,
    cost: CostFn<'a>,
    measures: Measures,
}

impl<'a> Strategy<'a> {
    pub fn new<F>(name: impl Into<String>, cost: F) -> Self
    where
        F: Fn(&[Symbol]) -> usize + Send + Sync + 'a,
    {
        Self {
            name: name.into(),
            cost: Box::new(cost),
            measures: Measures::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self, word: &Word) -> usize {
        (self.cost)(word.symbols())
    }

    pub fn measures(&self) -> &Measures {
        &self.measures
    }
}

impl std::fmt::Debug for Strategy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("name", &self.name)
            .field("measures", &self.measures)
            .finish_non_exhaustive()
    }
}

/// Ordered set of strategies scored against the same corpus.
#[derive(Debug, Default)]
pub struct StrategyRegistry<'a> {
    strategies: Vec<Strategy<'a>>,
}

impl<'a> StrategyRegistry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock comparison: five closed-form strategies followed by the merge tree.
    pub fn with_builtins(tree: &'a MergeTree) -> Self {
        let mut registry = Self::new();
        registry
            .register("alphabet_scan", alphabet_scan)
            .register("alphabet_scan_eow", alphabet_scan_eow)
            .register("frequency_scan", frequency_scan)
            .register("fixed_width", fixed_width)
            .register("vowel_split", vowel_split)
            .register("merge_tree", move |word: &[Symbol]| tree.questions(word));
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, cost: F) -> &mut Self
    where
        F: Fn(&[Symbol]) -> usize + Send + Sync + 'a,
    {
        self.strategies.push(Strategy::new(name, cost));
        self
    }

    pub fn strategies(&self) -> &[Strategy<'a>] {
        &self.strategies
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.iter().map(Strategy::name)
    }

    /// Scores every word with every strategy.
    pub fn measure<'w>(&mut self, words: impl IntoIterator<Item = &'w Word>) {
        let mut count = 0usize;
        for word in words {
            for strategy in &mut self.strategies {
                let questions = (strategy.cost)(word.symbols());
                strategy.measures.record(word.len(), questions);
            }
            count += 1;
        }
        tracing::debug!(words = count, strategies = self.strategies.len(), "measured corpus");
    }

    /// Same result as [`measure`](Self::measure), with the corpus split across
    /// `shards` scoped threads. Each shard fills its own buckets; they are added
    /// into the registry once every shard has finished.
    pub fn measure_sharded(&mut self, words: &[Word], shards: usize) {
        if shards <= 1 || words.len() < 2 {
            self.measure(words);
            return;
        }

        let chunk = words.len().div_ceil(shards);
        let strategies = &self.strategies;
        let partials: Vec<Vec<Measures>> = thread::scope(|scope| {
            let handles: Vec<_> = words
                .chunks(chunk)
                .map(|shard| {
                    scope.spawn(move || {
                        let mut local = vec![Measures::new(); strategies.len()];
                        for word in shard {
                            for (strategy, measures) in strategies.iter().zip(&mut local) {
                                measures.record(word.len(), (strategy.cost)(word.symbols()));
                            }
                        }
                        local
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        tracing::debug!(words = words.len(), shards = partials.len(), "measured corpus in shards");
        for partial in &partials {
            for (strategy, measures) in self.strategies.iter_mut().zip(partial) {
                strategy.measures.merge(measures);
            }
        }
    }

    /// Longest word length recorded by any strategy.
    pub fn max_length(&self) -> Option<usize> {
        self.strategies
            .iter()
            .filter_map(|s| s.measures.max_length())
            .max()
    }
}

/// Walks the alphabet in order for every letter, then spends one question per
/// remaining letter of the alphabet to detect the end of the word.
pub fn alphabet_scan(word: &[Symbol]) -> usize {
    word.iter().map(|s| s.index() + 1).sum::<usize>() + ALPHABET_SIZE
}

/// Walks the alphabet in order for every letter and asks after each one
/// whether the word is over.
pub fn alphabet_scan_eow(word: &[Symbol]) -> usize {
    word.iter().map(|s| s.index() + 1 + 1).sum()
}

/// Like [`alphabet_scan_eow`] but walks letters from most to least frequent.
pub fn frequency_scan(word: &[Symbol]) -> usize {
    word.iter().map(|&s| ranking_questions(s) + 1).sum()
}

/// Five yes/no questions pin down any of 26 letters, plus the end check.
pub fn fixed_width(word: &[Symbol]) -> usize {
    (5 + 1) * word.len()
}

/// A hand-made two-level split: `e` and `i` are found in two questions,
/// everything else in six.
pub fn vowel_split(word: &[Symbol]) -> usize {
    word.iter()
        .map(|s| match s.as_char() {
            'e' | 'i' => 2 + 1,
            _ => 6 + 1,
        })
        .sum()
}

fn ranking_questions(symbol: Symbol) -> usize {
    FREQUENCY_RANKING
        .chars()
        .position(|c| c == symbol.as_char())
        .map_or(FREQUENCY_RANKING.len(), |rank| rank + 1)
}
