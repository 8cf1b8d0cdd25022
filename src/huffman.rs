use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::alphabet::{ALPHABET_SIZE, Symbol};
use crate::error::{GuessError, Result};
use crate::frequency::FrequencyTable;

const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// A set of letters that can still be told apart below this point of the tree.
///
/// Leaves cover exactly one letter. Internal nodes own exactly two children and
/// cover the concatenation of their letters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionNode {
    #[serde(rename = "letters")]
    symbols: Vec<Symbol>,
    #[serde(alias = "probabilty")]
    probability: f64,
    #[serde(default, deserialize_with = "children_or_null")]
    children: Vec<DecisionNode>,
}

impl DecisionNode {
    fn new_leaf(symbol: Symbol, probability: f64) -> Self {
        DecisionNode {
            symbols: vec![symbol],
            probability,
            children: Vec::new(),
        }
    }

    fn new_internal(left: DecisionNode, right: DecisionNode) -> Self {
        let mut symbols = left.symbols.clone();
        symbols.extend_from_slice(&right.symbols);
        DecisionNode {
            symbols,
            probability: left.probability + right.probability,
            children: vec![left, right],
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn children(&self) -> &[DecisionNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    fn letters(&self) -> String {
        self.symbols.iter().map(|s| s.as_char()).collect()
    }

    fn count(&self) -> (usize, usize) {
        if self.is_leaf() {
            return (1, 0);
        }
        self.children.iter().fold((0, 1), |(leaves, internal), child| {
            let (l, i) = child.count();
            (leaves + l, internal + i)
        })
    }
}

impl fmt::Display for DecisionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:.2}%)", self.letters(), self.probability * 100.0)
    }
}

// Trees written by older tooling store `null` instead of an empty list for leaves.
fn children_or_null<'de, D>(deserializer: D) -> std::result::Result<Vec<DecisionNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DecisionNode>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Binary decision tree over the alphabet, built by repeatedly merging the two
/// least probable groups of letters.
///
/// Once built or loaded the tree is immutable; it is passed by reference to
/// whatever needs to evaluate words against it.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeTree {
    root: DecisionNode,
}

impl MergeTree {
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        Self::from_probabilities(&table.probabilities())
    }

    /// Greedy merge over one leaf per letter.
    ///
    /// Each round stable-sorts the nodes by ascending probability, merges the
    /// first two and puts the merged node at the front of the list. Equal
    /// probabilities therefore keep their current order, and a fresh merge
    /// sorts ahead of older nodes it ties with.
    pub fn from_probabilities(probabilities: &[f64; ALPHABET_SIZE]) -> Result<Self> {
        let mut nodes = Vec::with_capacity(ALPHABET_SIZE);
        for symbol in Symbol::all() {
            let probability = probabilities[symbol.index()];
            if !probability.is_finite() || probability < 0.0 {
                return Err(GuessError::InvalidProbability {
                    symbol: symbol.as_char(),
                    value: probability,
                });
            }
            nodes.push(DecisionNode::new_leaf(symbol, probability));
        }

        let non_zero = nodes.iter().filter(|n| n.probability > 0.0).count();
        if non_zero < 2 {
            return Err(GuessError::DegenerateAlphabet { non_zero });
        }

        while nodes.len() > 1 {
            nodes.sort_by(|a, b| a.probability.total_cmp(&b.probability));
            let l = nodes.remove(0);
            let r = nodes.remove(0);
            let merged = DecisionNode::new_internal(l, r);
            tracing::trace!(letters = %merged.letters(), probability = merged.probability, "merged nodes");
            nodes.insert(0, merged);
        }

        let root = nodes.remove(0);
        tracing::debug!(probability = root.probability, "built merge tree");
        Ok(Self { root })
    }

    /// Wraps a root node read from elsewhere, checking every node invariant.
    pub fn from_root(root: DecisionNode) -> Result<Self> {
        validate(&root)?;

        let mut seen = [false; ALPHABET_SIZE];
        for &symbol in &root.symbols {
            if std::mem::replace(&mut seen[symbol.index()], true) {
                return Err(GuessError::InvalidTree(format!(
                    "letter {:?} appears more than once",
                    symbol.as_char()
                )));
            }
        }
        if let Some(missing) = Symbol::all().find(|s| !seen[s.index()]) {
            return Err(GuessError::InvalidTree(format!(
                "letter {:?} is missing",
                missing.as_char()
            )));
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &DecisionNode {
        &self.root
    }

    pub fn into_root(self) -> DecisionNode {
        self.root
    }

    /// Number of descents from the root to the leaf holding `symbol`.
    pub fn depth(&self, symbol: Symbol) -> usize {
        let mut node = &self.root;
        let mut descents = 0;
        while !node.is_leaf() {
            let Some(child) = node.children.iter().find(|c| c.contains(symbol)) else {
                // Every tree is validated to cover the whole alphabet.
                break;
            };
            node = child;
            descents += 1;
        }
        descents
    }

    /// Questions needed to guess `word`: one per descent to each letter, plus one
    /// per letter asking whether the word is over.
    pub fn questions(&self, word: &[Symbol]) -> usize {
        word.iter().map(|&symbol| self.depth(symbol) + 1).sum()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.count().0
    }

    pub fn internal_count(&self) -> usize {
        self.root.count().1
    }
}

fn validate(node: &DecisionNode) -> Result<()> {
    if !node.probability.is_finite() || node.probability < 0.0 {
        return Err(GuessError::InvalidTree(format!(
            "node {:?} has probability {}",
            node.letters(),
            node.probability
        )));
    }

    match node.children.as_slice() {
        [] if node.symbols.len() == 1 => Ok(()),
        [] => Err(GuessError::InvalidTree(format!(
            "leaf {:?} must cover exactly one letter",
            node.letters()
        ))),
        [l, r] => {
            validate(l)?;
            validate(r)?;
            let concatenated = l.symbols.iter().chain(&r.symbols);
            if !node.symbols.iter().eq(concatenated) {
                return Err(GuessError::InvalidTree(format!(
                    "node {:?} is not the union of {:?} and {:?}",
                    node.letters(),
                    l.letters(),
                    r.letters()
                )));
            }
            if (node.probability - (l.probability + r.probability)).abs() > PROBABILITY_TOLERANCE {
                return Err(GuessError::InvalidTree(format!(
                    "node {:?} probability {} differs from its children's sum",
                    node.letters(),
                    node.probability
                )));
            }
            Ok(())
        }
        children => Err(GuessError::InvalidTree(format!(
            "node {:?} has {} children",
            node.letters(),
            children.len()
        ))),
    }
}

/// Indented dump, one node per line.
impl fmt::Display for MergeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.root)?;
        write_children(f, &self.root, "")
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, node: &DecisionNode, prefix: &str) -> fmt::Result {
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, indent) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        writeln!(f, "{prefix}{branch}{child}")?;
        write_children(f, child, &format!("{prefix}{indent}"))?;
    }
    Ok(())
}
