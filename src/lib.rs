use std::io;
use std::path::{Path, PathBuf};

use log::{debug, trace};
#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};
use smartstring::alias::String;

mod candidates;
mod overlap;
mod path;
pub mod tables;

#[cfg(feature = "test-cases")]
pub mod test_cases;
#[cfg(feature = "__test_data")]
pub mod test_data;

use candidates::{Candidate, Position, PrefixIndex};
use path::{Cover, PathTable};

/// Central data structure used to find and score dictionary words
///
/// The tables are never modified after construction, so a single `Segmenter` can be shared
/// between threads. Each thread needs its own [`Search`].
#[cfg_attr(feature = "with-serde", derive(Deserialize, Serialize))]
pub struct Segmenter {
    prefixes: PrefixIndex,
    unigrams: HashMap<String, f64>,
    bigrams: HashMap<(String, String), f64>,
    min_length: usize,
    total: f64,
    backoff: f64,
    gap_penalty: f64,
}

impl Segmenter {
    /// Create `Segmenter` from the given iterators
    ///
    /// Candidate words are drawn from `vocabulary`, which is indexed by the first
    /// `min_length` characters of each word; its counts are not used. Words are scored with
    /// `unigrams` and pairs of adjacent words with `bigrams`.
    ///
    /// Note: the `String` types used in this API are defined in the `smartstring` crate. Any
    /// `&str` or `String` can be converted into the `String` used here by calling `into()` on it.
    pub fn from_iters<V, U, B>(
        min_length: usize,
        vocabulary: V,
        unigrams: U,
        bigrams: B,
    ) -> Result<Self>
    where
        V: Iterator<Item = (String, f64)>,
        U: Iterator<Item = (String, f64)>,
        B: Iterator<Item = ((String, String), f64)>,
    {
        Self::from_maps(
            min_length,
            vocabulary.collect(),
            unigrams.collect(),
            bigrams.collect(),
        )
    }

    /// Create `Segmenter` from the given hashmaps (using ahash)
    ///
    /// The `HashMap` type here refers to `std::collections::HashMap` parametrized with the
    /// `ahash::RandomState`.
    pub fn from_maps(
        min_length: usize,
        vocabulary: HashMap<String, f64>,
        unigrams: HashMap<String, f64>,
        bigrams: HashMap<(String, String), f64>,
    ) -> Result<Self> {
        if min_length == 0 {
            return Err(Error::InvalidLength);
        }

        let prefixes = PrefixIndex::new(min_length, vocabulary.keys());
        debug!(
            "indexed {} words under {} prefixes of length {}",
            vocabulary.len(),
            prefixes.len(),
            min_length
        );

        Ok(Self {
            prefixes,
            unigrams,
            bigrams,
            min_length,
            total: DEFAULT_TOTAL,
            backoff: DEFAULT_BACKOFF,
            gap_penalty: DEFAULT_GAP_PENALTY,
        })
    }

    /// Load the frequency tables from `dir`
    ///
    /// Expects `unigrams.txt` (the vocabulary), `unigrams-full.txt` (scoring counts) and
    /// `bigrams.txt`, each optionally compressed with zstd (`.zst` suffix). See
    /// [`tables`] for the file format. Every table must contain at least one entry.
    pub fn from_dir(min_length: usize, dir: &Path) -> Result<Self> {
        if min_length == 0 {
            return Err(Error::InvalidLength);
        }

        let vocabulary = tables::load_unigrams(&tables::locate(dir, VOCABULARY_TABLE))?;
        let unigrams = tables::load_unigrams(&tables::locate(dir, UNIGRAM_TABLE))?;
        let bigrams = tables::load_bigrams(&tables::locate(dir, BIGRAM_TABLE))?;
        Self::from_maps(min_length, vocabulary, unigrams, bigrams)
    }

    /// Segment the text in `input`
    ///
    /// The input is normalized first (see [`normalize()`]). Returns the dictionary words and
    /// the literal runs between them, in order; joined together they reproduce the
    /// normalized input. The `search` parameter holds buffers used during segmentation;
    /// passing it in allows the callers to reuse the allocations.
    pub fn segment<'a>(
        &self,
        input: &str,
        search: &'a mut Search,
    ) -> impl Iterator<Item = &'a str> + ExactSizeIterator {
        let text = normalize(input);
        SegmentState::new(&text, self, search).run();
        search.result.iter().map(|v| v.as_str())
    }

    /// Segment `input`, treating a missing input as empty text
    pub fn segment_opt<'a>(
        &self,
        input: Option<&str>,
        search: &'a mut Search,
    ) -> impl Iterator<Item = &'a str> + ExactSizeIterator {
        self.segment(input.unwrap_or_default(), search)
    }

    /// Log-scaled relative frequency of `word`
    ///
    /// Words not found in the unigrams are penalized according to their length.
    pub fn score(&self, word: &str) -> f64 {
        match self.unigrams.get(word) {
            Some(&count) if count > 0.0 => count.log10() - self.total.log10(),
            _ => 10f64.log10() - (self.total.log10() + word.chars().count() as f64),
        }
    }

    fn bigram(&self, prev: &str, word: &str) -> Option<f64> {
        self.bigrams
            .get(&(String::from(prev), String::from(word)))
            .copied()
    }

    /// The prefix length used to index the vocabulary
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Customize the relative score by setting the `total`
    pub fn set_total(&mut self, total: f64) {
        self.total = total;
    }

    /// Customize the factor applied to the previous word's score for unknown bigrams
    pub fn set_backoff(&mut self, backoff: f64) {
        self.backoff = backoff;
    }

    /// Customize the per-character cost of leaving text before the first word of a group
    pub fn set_gap_penalty(&mut self, gap_penalty: f64) {
        self.gap_penalty = gap_penalty;
    }
}

struct SegmentState<'a> {
    data: &'a Segmenter,
    text: &'a str,
    search: &'a mut Search,
}

impl<'a> SegmentState<'a> {
    fn new(text: &'a str, data: &'a Segmenter, search: &'a mut Search) -> Self {
        search.clear();
        Self { data, text, search }
    }

    fn run(self) {
        let Search {
            candidates,
            components,
            table,
            chosen,
            covers,
            result,
        } = self.search;

        candidates::generate(self.text, self.data, candidates);
        overlap::components(candidates, components);
        for range in components.iter() {
            let cover = table.solve(self.data, self.text, &mut candidates[range.clone()], chosen);
            covers.push(cover);
        }

        trace!(
            "{} candidates in {} groups for {:?}",
            candidates.len(),
            covers.len(),
            self.text
        );

        assemble(self.text, covers, chosen, result);
    }
}

/// Interleave the words chosen for each group with the uncovered text around them
///
/// `covers` must be sorted by start offset and disjoint, which holds because groups are
/// produced in text order and never overlap.
fn assemble(text: &str, covers: &[Cover], chosen: &[Position], out: &mut Vec<String>) {
    let mut cursor = 0;
    for cover in covers {
        debug_assert!(cursor <= cover.span.start);
        if cursor < cover.span.start {
            out.push(text[cursor..cover.span.start].into());
        }

        out.extend(chosen[cover.words.clone()].iter().map(|pos| pos.slice(text).into()));
        cursor = cover.span.end + 1;
    }

    if cursor < text.len() {
        out.push(text[cursor..].into());
    }
}

/// Buffers for a single segmentation, reusable across calls
///
/// Nothing computed for one input is consulted for the next; every buffer is cleared when
/// a new segmentation starts.
#[derive(Clone, Default)]
pub struct Search {
    candidates: Vec<Candidate>,
    components: Vec<std::ops::Range<usize>>,
    table: PathTable,
    chosen: Vec<Position>,
    covers: Vec<Cover>,
    result: Vec<String>,
}

impl Search {
    fn clear(&mut self) {
        self.candidates.clear();
        self.components.clear();
        self.chosen.clear();
        self.covers.clear();
        self.result.clear();
    }

    /// Total score of the groups solved by the last segmentation
    pub fn score(&self) -> f64 {
        self.covers.iter().map(|cover| cover.score).sum()
    }
}

/// Lowercase `input`, remove apostrophes and trim surrounding whitespace
///
/// All offsets used during segmentation refer to the returned string.
pub fn normalize(input: &str) -> std::string::String {
    input
        .to_lowercase()
        .replace('\'', "")
        .trim()
        .to_owned()
}

/// Errors raised while building a [`Segmenter`]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("minimum prefix length must be at least 1")]
    InvalidLength,
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: std::string::String,
    },
    #[error("no entries found in {}", .0.display())]
    EmptyTable(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type HashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

/// Number of tokens in the corpus the default tables were counted from
const DEFAULT_TOTAL: f64 = 1_024_908_267_229.0;
const DEFAULT_BACKOFF: f64 = 0.4;
const DEFAULT_GAP_PENALTY: f64 = -10.0;

const VOCABULARY_TABLE: &str = "unigrams.txt";
const UNIGRAM_TABLE: &str = "unigrams-full.txt";
const BIGRAM_TABLE: &str = "bigrams.txt";
