//! Counts the yes/no questions different letter-guessing strategies need to
//! identify the words of a corpus, comparing naive scans against a decision
//! tree built from observed letter frequencies.

pub mod alphabet;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod measure;
pub mod report;
pub mod store;
pub mod strategy;

pub use alphabet::{ALPHABET_SIZE, Symbol, Word};
pub use corpus::Corpus;
pub use error::{GuessError, Result};
pub use frequency::FrequencyTable;
pub use huffman::{DecisionNode, MergeTree};
pub use measure::{ByLength, Measures};
pub use report::Window;
pub use strategy::{Strategy, StrategyRegistry};
