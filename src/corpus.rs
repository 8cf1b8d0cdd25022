use std::fs;
use std::path::Path;

use crate::alphabet::Word;
use crate::error::{GuessError, Result};

/// Word list read from a line-delimited file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    words: Vec<Word>,
}

impl Corpus {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| GuessError::CorpusUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::parse(&text)?;
        tracing::info!(path = %path.display(), words = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    /// One word per line. Lines are trimmed and blank lines skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Word::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { words })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<Word> for Corpus {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
