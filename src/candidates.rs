#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};
use smartstring::alias::String;

use crate::{HashMap, Segmenter};

/// Inclusive byte range `start..=end` into the normalized text
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Position {
    pub(crate) fn new(start: usize, len: usize) -> Self {
        debug_assert!(len > 0);
        Self {
            start,
            end: start + len - 1,
        }
    }

    pub(crate) fn overlaps(&self, other: &Position) -> bool {
        !(self.end < other.start || other.end < self.start)
    }

    /// Whether `self` ends on the byte right before `next` starts
    pub(crate) fn precedes(&self, next: &Position) -> bool {
        self.end + 1 == next.start
    }

    pub(crate) fn slice<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..=self.end]
    }
}

/// A dictionary word found at some position in the text, with its unigram score
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Candidate {
    pub(crate) pos: Position,
    pub(crate) score: f64,
}

/// A window of `min_length` characters together with the rest of the text
#[derive(Debug)]
struct Window<'t> {
    prefix: &'t str,
    start: usize,
    suffix: &'t str,
}

impl<'t> Window<'t> {
    /// The text from the start of the window to the end of the input
    fn rest(&self, text: &'t str) -> &'t str {
        &text[self.start..self.start + self.prefix.len() + self.suffix.len()]
    }
}

fn windows(text: &str, len: usize) -> impl Iterator<Item = Window<'_>> + '_ {
    let bounds = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(Some(text.len()))
        .collect::<Vec<_>>();

    (0..bounds.len().saturating_sub(len)).map(move |i| {
        let (start, end) = (bounds[i], bounds[i + len]);
        Window {
            prefix: &text[start..end],
            start,
            suffix: &text[end..],
        }
    })
}

/// Maps the first `min_length` characters of every dictionary word to the words starting with them
///
/// Words shorter than `min_length` are not indexed. Each list is kept sorted so that
/// candidate generation does not depend on the iteration order of the source table.
#[cfg_attr(feature = "with-serde", derive(Deserialize, Serialize))]
pub(crate) struct PrefixIndex {
    words: HashMap<String, Vec<String>>,
}

impl PrefixIndex {
    pub(crate) fn new<'w>(min_length: usize, vocabulary: impl Iterator<Item = &'w String>) -> Self {
        let mut words = HashMap::<String, Vec<String>>::default();
        for word in vocabulary {
            let cut = match word.char_indices().nth(min_length) {
                Some((i, _)) => i,
                None if word.chars().count() == min_length => word.len(),
                None => continue,
            };

            words.entry(word[..cut].into()).or_default().push(word.clone());
        }

        for list in words.values_mut() {
            list.sort_unstable();
        }

        Self { words }
    }

    pub(crate) fn get(&self, prefix: &str) -> Option<&[String]> {
        self.words.get(prefix).map(|list| list.as_slice())
    }

    pub(crate) fn len(&self) -> usize {
        self.words.len()
    }
}

/// Fill `out` with every dictionary word that matches `text`, sorted by start offset
///
/// For each window whose prefix is indexed, every indexed word that the text continues
/// with is a candidate. A window starting with `a` also yields the single-letter word
/// "a", which is usually missing from the index because it is shorter than `min_length`.
pub(crate) fn generate(text: &str, data: &Segmenter, out: &mut Vec<Candidate>) {
    out.clear();
    for window in windows(text, data.min_length) {
        let words = match data.prefixes.get(window.prefix) {
            Some(words) => words,
            None => continue,
        };

        if window.prefix.starts_with('a') {
            out.push(Candidate {
                pos: Position::new(window.start, 1),
                score: data.score("a"),
            });
        }

        let rest = window.rest(text);
        for word in words {
            if rest.starts_with(word.as_str()) {
                out.push(Candidate {
                    pos: Position::new(window.start, word.len()),
                    score: data.score(word),
                });
            }
        }
    }

    out.sort_by(|a, b| {
        a.pos
            .start
            .cmp(&b.pos.start)
            .then(a.pos.end.cmp(&b.pos.end))
    });
    out.dedup();
}
