use std::io::Write;

use crate::alphabet::{ALPHABET_SIZE, Symbol, Word};

/// Letter counts observed across a corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    total: u64,
}

impl FrequencyTable {
    pub fn build<'a>(words: impl IntoIterator<Item = &'a Word>) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        let mut total = 0;
        for word in words {
            for symbol in word.symbols() {
                counts[symbol.index()] += 1;
                total += 1;
            }
        }

        Self { counts, total }
    }

    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts[symbol.index()]
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Relative frequency of `symbol`; zero when the corpus had no letters.
    pub fn probability(&self, symbol: Symbol) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(symbol) as f64 / self.total as f64
    }

    pub fn probabilities(&self) -> [f64; ALPHABET_SIZE] {
        let mut probabilities = [0.0; ALPHABET_SIZE];
        for symbol in Symbol::all() {
            probabilities[symbol.index()] = self.probability(symbol);
        }
        probabilities
    }

    /// Writes `letter,frequency` rows for the whole alphabet.
    pub fn write_csv<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "letter,frequency")?;
        for symbol in Symbol::all() {
            writeln!(out, "{},{:.5}", symbol, self.probability(symbol))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::parse(w).unwrap()).collect()
    }

    fn sym(c: char) -> Symbol {
        Symbol::try_from(c).unwrap()
    }

    #[test]
    fn counts_every_position() {
        let table = FrequencyTable::build(&words(&["banana", "ab"]));
        assert_eq!(table.total(), 8);
        assert_eq!(table.count(sym('a')), 4);
        assert_eq!(table.count(sym('b')), 2);
        assert_eq!(table.count(sym('n')), 2);
        assert_eq!(table.count(sym('z')), 0);
        assert_eq!(table.probability(sym('a')), 0.5);
    }

    #[test]
    fn empty_corpus_has_zero_probabilities() {
        let table = FrequencyTable::build(&Vec::<Word>::new());
        assert_eq!(table.total(), 0);
        assert!(table.probabilities().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn csv_lists_alphabet() {
        let table = FrequencyTable::build(&words(&["ab", "a", "a"]));
        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), ALPHABET_SIZE + 1);
        assert_eq!(lines[0], "letter,frequency");
        assert_eq!(lines[1], "a,0.75000");
        assert_eq!(lines[2], "b,0.25000");
        assert_eq!(lines[26], "z,0.00000");
    }
}
