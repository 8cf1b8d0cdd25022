//! The fixed 26-letter alphabet and decoding of text into symbols.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GuessError, Result};

pub const ALPHABET_SIZE: usize = 26;

const BASE: u8 = b'a';

/// One lowercase letter `a`..=`z`, stored as its alphabet index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSymbol", into = "char")]
pub struct Symbol(u8);

impl Symbol {
    pub fn from_index(index: usize) -> Option<Self> {
        (index < ALPHABET_SIZE).then(|| Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        (BASE + self.0) as char
    }

    /// Every symbol in alphabet order.
    pub fn all() -> impl Iterator<Item = Symbol> {
        (0..ALPHABET_SIZE as u8).map(Symbol)
    }

    fn decode(c: char, word: &str) -> Result<Self> {
        if c.is_ascii_lowercase() {
            Ok(Self(c as u8 - BASE))
        } else {
            Err(GuessError::OutOfAlphabetSymbol {
                symbol: c,
                word: word.to_string(),
            })
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = GuessError;

    fn try_from(c: char) -> Result<Self> {
        Self::decode(c, c.encode_utf8(&mut [0; 4]))
    }
}

impl From<Symbol> for char {
    fn from(symbol: Symbol) -> char {
        symbol.as_char()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Letters as found in tree files: either a one-character string or a
/// Unicode code point.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSymbol {
    Char(char),
    CodePoint(u32),
}

impl TryFrom<RawSymbol> for Symbol {
    type Error = GuessError;

    fn try_from(raw: RawSymbol) -> Result<Self> {
        match raw {
            RawSymbol::Char(c) => Symbol::try_from(c),
            RawSymbol::CodePoint(code) => match char::from_u32(code) {
                Some(c) => Symbol::try_from(c),
                None => Err(GuessError::OutOfAlphabetSymbol {
                    symbol: char::REPLACEMENT_CHARACTER,
                    word: format!("U+{code:X}"),
                }),
            },
        }
    }
}

/// A decoded word. Its length is the number of symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    symbols: Vec<Symbol>,
}

impl Word {
    pub fn parse(text: &str) -> Result<Self> {
        let symbols = text
            .chars()
            .map(|c| Symbol::decode(c, text))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { symbols })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromStr for Word {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|s| write!(f, "{s}"))
    }
}
