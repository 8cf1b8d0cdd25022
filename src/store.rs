//! JSON persistence for merge trees.
//!
//! A tree is stored as its nested root node:
//! `{"letters": [...], "probability": 0.5, "children": [...]}`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::huffman::{DecisionNode, MergeTree};

impl MergeTree {
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self.root())?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a tree and validates it before handing it out.
    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        let root: DecisionNode = serde_json::from_reader(reader)?;
        Self::from_root(root)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_json(BufWriter::new(file))?;
        tracing::info!(path = %path.display(), "saved merge tree");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let tree = Self::read_json(BufReader::new(file))?;
        tracing::info!(path = %path.display(), "loaded merge tree");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{ALPHABET_SIZE, Symbol};
    use crate::error::GuessError;

    fn tree() -> MergeTree {
        let mut probabilities = [0.01; ALPHABET_SIZE];
        probabilities[4] = 0.4;
        probabilities[8] = 0.36;
        MergeTree::from_probabilities(&probabilities).unwrap()
    }

    #[test]
    fn json_round_trip_preserves_tree() {
        let tree = tree();
        let mut buf = Vec::new();
        tree.write_json(&mut buf).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.contains("\"letters\""));
        assert!(text.contains("\"probability\""));

        let loaded = MergeTree::read_json(buf.as_slice()).unwrap();
        assert_eq!(loaded, tree);
    }

    #[test]
    fn reads_trees_in_legacy_layout() {
        // Code points for letters, `null` leaf children and the old `probabilty` key.
        let mut leaves = Vec::new();
        let mut letters = Vec::new();
        for symbol in Symbol::all() {
            let code = symbol.as_char() as u32;
            letters.push(code.to_string());
            leaves.push(format!(
                r#"{{"letters":[{code}],"probabilty":{},"children":null}}"#,
                1.0 / 26.0
            ));
        }

        // Chain the leaves left to right so the root covers the alphabet in order.
        let mut node = leaves.remove(0);
        let mut covered = vec![letters[0].clone()];
        for (i, leaf) in leaves.into_iter().enumerate() {
            covered.push(letters[i + 1].clone());
            node = format!(
                r#"{{"letters":[{}],"probabilty":{},"children":[{node},{leaf}]}}"#,
                covered.join(","),
                (i + 2) as f64 / 26.0
            );
        }

        let tree = MergeTree::read_json(node.as_bytes()).unwrap();
        assert_eq!(tree.leaf_count(), 26);
        assert_eq!(tree.depth(Symbol::try_from('z').unwrap()), 1);
        assert_eq!(tree.depth(Symbol::try_from('a').unwrap()), 25);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = MergeTree::read_json(&b"{\"letters\": "[..]).unwrap_err();
        assert!(matches!(err, GuessError::TreeFormat(_)));
    }

    #[test]
    fn rejects_out_of_alphabet_letters() {
        let json = r#"{"letters":["A"],"probability":1.0,"children":[]}"#;
        assert!(matches!(
            MergeTree::read_json(json.as_bytes()),
            Err(GuessError::TreeFormat(_))
        ));
    }

    #[test]
    fn save_and_load_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        let tree = tree();

        tree.save(&path).unwrap();
        assert_eq!(MergeTree::load(&path).unwrap(), tree);
    }
}
