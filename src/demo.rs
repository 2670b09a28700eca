//! Times word lookups in a plain `Vec` against a [`Tree`] built in sorted order, the same tree
//! built in shuffled order, and that tree once rebalanced.
//!
//! All randomness comes from a [`StdRng`] seeded by [`Config::seed`] so two runs with the same
//! configuration sample and shuffle the same way.
//!
//! # Examples
//!
//! ```no_run
//! use linkedbst::demo::{self, Config};
//!
//! let report = demo::run(&Config::new("words.txt")).unwrap();
//! print!("{}", report);
//! ```

use std::fmt;
use std::fs;
use std::hint::black_box;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, ValueHint};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::linked::Tree;

/// Words kept from the top of the word list by default.
pub const DEFAULT_WORDS: usize = 30_000;
/// Lookups made in each scenario by default.
pub const DEFAULT_QUERIES: usize = 10_000;
/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Failures of a demo run.
#[derive(Error, Debug)]
pub enum DemoError {
    /// The word list couldn't be read.
    #[error("failed to read word list {}: {source}", path.display())]
    ReadWords {
        /// The word list that was asked for.
        path: PathBuf,
        /// What went wrong reading it.
        source: io::Error,
    },

    /// Any other I/O failure, such as writing the sampled queries.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The word list had nothing to search for.
    #[error("no words in {}", .0.display())]
    EmptyWordList(PathBuf),
}

/// What to load and how many lookups to make.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Newline-delimited word list
    #[arg(value_hint = ValueHint::FilePath)]
    pub path: PathBuf,

    /// Number of words kept from the top of the word list
    #[arg(short, long, default_value_t = DEFAULT_WORDS)]
    pub words: usize,

    /// Number of random lookups made in each scenario
    #[arg(short, long, default_value_t = DEFAULT_QUERIES)]
    pub queries: usize,

    /// Seed for sampling the lookups and shuffling the words
    #[arg(short, long, env = "WORD_SEARCH_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Write the sampled lookups to this file, one per line
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub dump_queries: Option<PathBuf>,
}

impl Config {
    /// A configuration for the given word list with every other setting at its default.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            words: DEFAULT_WORDS,
            queries: DEFAULT_QUERIES,
            seed: DEFAULT_SEED,
            dump_queries: None,
        }
    }
}

/// One timed batch of lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// What was searched.
    pub name: &'static str,
    /// Time spent on all the lookups.
    pub elapsed: Duration,
    /// How many lookups found their word.
    pub hits: usize,
    /// Height of the searched tree; `None` for the `Vec`.
    pub height: Option<usize>,
}

/// The outcome of [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Words that were loaded.
    pub words: usize,
    /// Lookups made per scenario.
    pub queries: usize,
    /// The scenarios in the order they ran.
    pub scenarios: Vec<Scenario>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} lookups among {} words", self.queries, self.words)?;
        for scenario in &self.scenarios {
            write!(f, "{:<24} {:>12.6} s", scenario.name, scenario.elapsed.as_secs_f64())?;
            match scenario.height {
                Some(height) => writeln!(f, "  (height {})", height)?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

/// Loads the word list, samples lookups and times them against each structure.
///
/// # Errors
///
/// If the word list can't be read or holds no words, or the sampled lookups can't be written to
/// [`Config::dump_queries`].
#[instrument(level = "debug", skip_all, fields(path = %config.path.display()))]
pub fn run(config: &Config) -> Result<Report, DemoError> {
    let mut words = read_words(&config.path, config.words)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let queries = sample(&words, config.queries, &mut rng);
    info!(words = words.len(), queries = queries.len(), "loaded word list");

    if let Some(path) = &config.dump_queries {
        fs::write(path, queries.join("\n"))?;
        debug!(path = %path.display(), "wrote sampled queries");
    }

    let mut scenarios = Vec::with_capacity(4);
    scenarios.push(time_lookups("list", None, &queries, |q| {
        words.iter().any(|w| w == q)
    }));

    let mut tree: Tree<String> = words.iter().cloned().collect();
    scenarios.push(time_tree("tree, file order", &tree, &queries));

    tree.clear();
    words.shuffle(&mut rng);
    tree.extend(words.iter().cloned());
    scenarios.push(time_tree("tree, shuffled order", &tree, &queries));

    tree.rebalance();
    scenarios.push(time_tree("tree, rebalanced", &tree, &queries));

    Ok(Report {
        words: words.len(),
        queries: queries.len(),
        scenarios,
    })
}

/// The first `limit` lines of the file at `path`, trimmed.
fn read_words(path: &Path, limit: usize) -> Result<Vec<String>, DemoError> {
    let contents = fs::read_to_string(path).map_err(|source| DemoError::ReadWords {
        path: path.to_path_buf(),
        source,
    })?;
    let words: Vec<String> = contents
        .lines()
        .map(str::trim)
        .take(limit)
        .map(String::from)
        .collect();

    if words.is_empty() {
        return Err(DemoError::EmptyWordList(path.to_path_buf()));
    }
    Ok(words)
}

/// `count` words picked uniformly, with replacement.
fn sample(words: &[String], count: usize, rng: &mut StdRng) -> Vec<String> {
    (0..count)
        .filter_map(|_| words.choose(rng).cloned())
        .collect()
}

fn time_tree(name: &'static str, tree: &Tree<String>, queries: &[String]) -> Scenario {
    time_lookups(name, tree.height(), queries, |q| tree.find(q).is_some())
}

fn time_lookups(
    name: &'static str,
    height: Option<usize>,
    queries: &[String],
    lookup: impl Fn(&String) -> bool,
) -> Scenario {
    let start = Instant::now();
    let hits = queries.iter().filter(|&q| black_box(lookup(q))).count();
    let elapsed = start.elapsed();
    debug!(scenario = name, ?elapsed, hits, ?height, "timed lookups");

    Scenario {
        name,
        elapsed,
        hits,
        height,
    }
}
