use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use guesstree::report::{self, Window};
use guesstree::{Corpus, FrequencyTable, MergeTree, StrategyRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "guesstree")]
#[command(about = "Count the yes/no questions letter-guessing strategies need per word")]
#[command(version)]
struct Cli {
    /// Log filter, e.g. `info` or `guesstree=debug`
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print average questions per word length for every strategy as CSV
    Measure {
        #[arg(short, long, default_value = "words.txt")]
        words: PathBuf,

        /// Use a saved tree instead of building one from the corpus
        #[arg(short, long)]
        tree: Option<PathBuf>,

        /// Last word length reported, or `auto` for the longest word seen
        #[arg(long, default_value_t = Window::default())]
        window: Window,

        /// Threads used to score the corpus
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,
    },
    /// Build the decision tree from letter frequencies and save it as JSON
    Build {
        #[arg(short, long, default_value = "words.txt")]
        words: PathBuf,

        #[arg(short, long, default_value = "huffman.json")]
        out: PathBuf,

        /// Also print the tree
        #[arg(long)]
        show: bool,
    },
    /// Print the relative frequency of every letter as CSV
    Frequencies {
        #[arg(short, long, default_value = "words.txt")]
        words: PathBuf,
    },
    /// Print a saved tree
    Show {
        #[arg(short, long, default_value = "huffman.json")]
        tree: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(io::stderr)
        .init();

    // Output is rendered in memory first so a failing run prints nothing.
    let output = match cli.command {
        Command::Measure {
            words,
            tree,
            window,
            jobs,
        } => measure(&words, tree.as_deref(), window, jobs)?,
        Command::Build { words, out, show } => build(&words, &out, show)?,
        Command::Frequencies { words } => {
            let corpus = load_corpus(&words)?;
            let mut buf = Vec::new();
            FrequencyTable::build(&corpus).write_csv(&mut buf)?;
            buf
        }
        Command::Show { tree } => {
            let tree = MergeTree::load(&tree)
                .with_context(|| format!("load tree {}", tree.display()))?;
            tree.to_string().into_bytes()
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(&output).context("write output")?;
    stdout.flush()?;

    Ok(())
}

fn load_corpus(path: &Path) -> Result<Corpus> {
    let corpus = Corpus::load(path).context("read word list")?;
    if corpus.is_empty() {
        tracing::warn!(path = %path.display(), "word list is empty");
    }
    Ok(corpus)
}

fn measure(words: &Path, tree: Option<&Path>, window: Window, jobs: usize) -> Result<Vec<u8>> {
    ensure!(jobs > 0, "--jobs must be at least 1");

    let corpus = load_corpus(words)?;
    let tree = match tree {
        Some(path) => {
            MergeTree::load(path).with_context(|| format!("load tree {}", path.display()))?
        }
        None => MergeTree::build(&FrequencyTable::build(&corpus))
            .context("build tree from corpus letter frequencies")?,
    };

    let mut registry = StrategyRegistry::with_builtins(&tree);
    registry.measure_sharded(corpus.words(), jobs);
    tracing::info!(words = corpus.len(), %window, "measured strategies");

    let mut buf = Vec::new();
    report::write_csv(&registry, window, &mut buf)?;
    Ok(buf)
}

fn build(words: &Path, out: &Path, show: bool) -> Result<Vec<u8>> {
    let corpus = load_corpus(words)?;
    let table = FrequencyTable::build(&corpus);
    let tree = MergeTree::build(&table).context("build tree from corpus letter frequencies")?;
    tree.save(out)
        .with_context(|| format!("save tree to {}", out.display()))?;

    let mut buf = Vec::new();
    if show {
        write!(buf, "{tree}")?;
    }
    writeln!(buf, "serialized to {}", out.display())?;
    Ok(buf)
}
