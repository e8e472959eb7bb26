use std::ops::Range;

use crate::candidates::{Candidate, Position};
use crate::Segmenter;

/// Predecessors of a candidate within its end-sorted component
///
/// Indices are 1-based; `first == 0` means the candidate starts a path and pays the gap
/// penalty. Only candidates ending right before this one starts are predecessors, and only
/// the two with the highest indices are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Adjacency {
    first: usize,
    second: Option<usize>,
}

/// Result of solving a single component
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Cover {
    /// From the first chosen word to the end of the component
    pub(crate) span: Position,
    /// The chosen words, as a range into the shared output positions
    pub(crate) words: Range<usize>,
    pub(crate) score: f64,
}

/// Scratch tables for the dynamic program, reused across components and calls
#[derive(Clone, Default)]
pub(crate) struct PathTable {
    adjacency: Vec<Adjacency>,
    memo: Vec<f64>,
    path: Vec<usize>,
}

impl PathTable {
    /// Choose the best scoring chain of contiguous candidates covering `component`
    ///
    /// The component is re-sorted by end offset in place. Positions of the chosen words are
    /// appended to `chosen` in text order.
    pub(crate) fn solve(
        &mut self,
        data: &Segmenter,
        text: &str,
        component: &mut [Candidate],
        chosen: &mut Vec<Position>,
    ) -> Cover {
        debug_assert!(!component.is_empty());
        component.sort_by(|a, b| {
            a.pos
                .end
                .cmp(&b.pos.end)
                .then(a.pos.start.cmp(&b.pos.start))
        });

        self.link(component);
        self.fill(data, text, component);
        self.trace(component);

        let start = chosen.len();
        chosen.extend(self.path.iter().rev().map(|&i| component[i - 1].pos));
        let n = component.len();
        Cover {
            span: Position {
                start: chosen[start].start,
                end: component[n - 1].pos.end,
            },
            words: start..chosen.len(),
            score: self.memo[n],
        }
    }

    fn link(&mut self, component: &[Candidate]) {
        self.adjacency.clear();
        for next in component {
            let mut adjacency = Adjacency::default();
            for (k, prev) in component.iter().enumerate().rev() {
                if prev.pos.overlaps(&next.pos) || !prev.pos.precedes(&next.pos) {
                    continue;
                }

                match adjacency.first {
                    0 => adjacency.first = k + 1,
                    _ => {
                        adjacency.second = Some(k + 1);
                        break;
                    }
                }
            }
            self.adjacency.push(adjacency);
        }
    }

    /// Bottom-up fill of `memo[j]`, the best score of a path ending in one of the candidates
    /// `1..=j` that end where candidate `j` ends
    fn fill(&mut self, data: &Segmenter, text: &str, component: &[Candidate]) {
        self.memo.clear();
        self.memo.push(0.0);
        for j in 1..=component.len() {
            let next = &component[j - 1];
            let p = self.adjacency[j - 1].first;
            let mut best = self.memo[p] + next.score + penalty(data, text, component, j, p);

            // Skip `j` in favor of an earlier candidate ending at the same offset
            if j > 1 && component[j - 2].pos.end == next.pos.end {
                best = best.max(self.memo[j - 1]);
            }

            self.memo.push(best);
        }
    }

    /// Walk back from the last memo entry holding the optimal score, collecting 1-based
    /// indices of the chosen candidates in reverse text order
    ///
    /// Ties are not broken by optimality. An equal memo entry for the previous candidate
    /// with the same end offset is preferred to taking `j`, and `first` is followed unless
    /// `second` scores strictly higher.
    fn trace(&mut self, component: &[Candidate]) {
        self.path.clear();
        let best = self.memo[component.len()];
        let mut j = self
            .memo
            .iter()
            .rposition(|&score| score == best)
            .unwrap_or(component.len());

        while j > 0 {
            let skipped = j > 1
                && component[j - 2].pos.end == component[j - 1].pos.end
                && self.memo[j] == self.memo[j - 1];
            if skipped {
                j -= 1;
                continue;
            }

            self.path.push(j);
            let Adjacency { first, second } = self.adjacency[j - 1];
            j = match second {
                Some(second) if self.memo[second] > self.memo[first] => second,
                _ => first,
            };
        }
    }
}

/// Adjustment for choosing candidate `j` after candidate `p` (or first, if `p == 0`)
///
/// A path that starts inside the text pays `gap_penalty` per character before it.
/// Contiguous words get a stupid backoff reward: the relative bigram frequency when the
/// pair is known, a discounted score of the previous word otherwise. A previous word
/// scoring exactly zero always backs off.
fn penalty(data: &Segmenter, text: &str, component: &[Candidate], j: usize, p: usize) -> f64 {
    let next = &component[j - 1];
    if p == 0 {
        return data.gap_penalty * text[..next.pos.start].chars().count() as f64;
    }

    let prev = &component[p - 1];
    if !prev.pos.precedes(&next.pos) {
        return 0.0;
    }

    match data.bigram(prev.pos.slice(text), next.pos.slice(text)) {
        Some(count) if prev.score != 0.0 => (count / data.total) / prev.score,
        _ => prev.score * data.backoff,
    }
}
