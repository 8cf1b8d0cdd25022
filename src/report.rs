//! CSV rendering of per-length averages.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::strategy::StrategyRegistry;

pub const DEFAULT_WINDOW: usize = 20;

/// Which word lengths get a row in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Lengths `1..=n`, whether or not any word had that length.
    Fixed(usize),
    /// Lengths `1..=` the longest measured word.
    Observed,
}

impl Default for Window {
    fn default() -> Self {
        Window::Fixed(DEFAULT_WINDOW)
    }
}

impl Window {
    fn last(self, registry: &StrategyRegistry<'_>) -> usize {
        match self {
            Window::Fixed(n) => n,
            Window::Observed => registry.max_length().unwrap_or(0),
        }
    }
}

impl FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Window::Observed);
        }
        match s.parse::<usize>() {
            Ok(0) => Err("window must cover at least one length".to_string()),
            Ok(n) => Ok(Window::Fixed(n)),
            Err(_) => Err(format!("expected a word length or `auto`, got {s:?}")),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::Fixed(n) => write!(f, "{n}"),
            Window::Observed => f.write_str("auto"),
        }
    }
}

/// Writes the header `word_length,<strategy>,...` and one row per length in
/// the window. Lengths without data print `0`.
pub fn write_csv<W: Write>(registry: &StrategyRegistry<'_>, window: Window, mut out: W) -> io::Result<()> {
    let mut header = vec!["word_length"];
    header.extend(registry.names());
    writeln!(out, "{}", header.join(","))?;

    for length in 1..=window.last(registry) {
        write!(out, "{length}")?;
        for strategy in registry.strategies() {
            match strategy.measures().average(length) {
                Some(average) => write!(out, ",{average:.2}")?,
                None => write!(out, ",0")?,
            }
        }
        writeln!(out)?;
    }

    Ok(())
}
