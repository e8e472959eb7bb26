use std::ops::Range;

use crate::candidates::Candidate;

/// Split candidates sorted by start offset into groups of transitively overlapping words
///
/// Each group is returned as a range into `candidates`. Since the input is sorted by start
/// offset, a candidate joins the current group exactly when it starts at or before the
/// furthest end offset seen in that group; otherwise no later candidate can reach back into
/// the group either.
pub(crate) fn components(candidates: &[Candidate], out: &mut Vec<Range<usize>>) {
    out.clear();
    let mut iter = candidates.iter().enumerate();
    let (mut start, mut reach) = match iter.next() {
        Some((_, first)) => (0, first.pos.end),
        None => return,
    };

    for (i, candidate) in iter {
        debug_assert!(candidates[i - 1].pos.start <= candidate.pos.start);
        if candidate.pos.start > reach {
            out.push(start..i);
            start = i;
        }
        reach = reach.max(candidate.pos.end);
    }

    out.push(start..candidates.len());
}
