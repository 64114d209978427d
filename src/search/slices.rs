//! Match highlighting
//!
//! Maps the inclusive character ranges a matching engine reports back onto
//! the display string as ordered, non-overlapping slices that alternate
//! between unmatched and matched text.
//!
//! When the string is longer than `max_length`, matches are always kept whole
//! and the remaining budget goes to the unmatched text next to them. If
//! everything from the first to the last match fits, one contiguous window is
//! kept and the spare budget is split between the text before and after it.
//! Otherwise every unmatched gap (leading, between matches, trailing) gets an
//! equal share of context, taken next to the matches, and the rest of the gap
//! is dropped. Slices keep their offsets into the full string, so a dropped
//! run shows up as a jump between consecutive slices. Output exceeds
//! `max_length` only when the matched characters alone do.

use tracing::debug;

use crate::core::error::SliceError;
use crate::core::model::{Entry, EntryMatch, MatchRange, StringSlice};

/// Slice `text` around `matches`, keeping at most `max_length` characters
pub fn string_slices(
    text: &str,
    matches: &[MatchRange],
    max_length: usize,
) -> Result<Vec<StringSlice>, SliceError> {
    // Byte offset of every char, plus the end of the string
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let len = offsets.len() - 1;

    for range in matches {
        validate_range(range, len)?;
    }

    let merged = merge_ranges(matches);
    let context = context_runs(len, &merged, max_length);
    if len > max_length {
        debug!(
            len,
            max_length,
            matches = merged.len(),
            runs = context.len(),
            "windowed highlight text"
        );
    }

    let mut runs: Vec<(usize, usize, bool)> = merged
        .iter()
        .map(|r| (r.start, r.end + 1, true))
        .chain(context.into_iter().map(|(start, end)| (start, end, false)))
        .filter(|&(start, end, _)| start < end)
        .collect();
    runs.sort_unstable_by_key(|&(start, _, _)| start);

    Ok(runs
        .into_iter()
        .map(|(start, end, is_match)| {
            StringSlice::new(start, end, is_match, &text[offsets[start]..offsets[end]])
        })
        .collect())
}

/// Slice the field of `entry` an engine matched
pub fn highlight_match(
    entry: &Entry,
    entry_match: &EntryMatch,
    max_length: usize,
) -> Result<Vec<StringSlice>, SliceError> {
    let text = entry
        .field(entry_match.key)
        .ok_or(SliceError::MissingField(entry_match.key))?;
    string_slices(text, &entry_match.indices, max_length)
}

fn validate_range(range: &MatchRange, len: usize) -> Result<(), SliceError> {
    if range.start > range.end {
        return Err(SliceError::InvertedRange {
            start: range.start,
            end: range.end,
        });
    }
    if range.end >= len {
        return Err(SliceError::OutOfBounds {
            start: range.start,
            end: range.end,
            len,
        });
    }
    Ok(())
}

/// Sort by start and merge overlapping or touching ranges
pub fn merge_ranges(ranges: &[MatchRange]) -> Vec<MatchRange> {
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<MatchRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(current) if range.start <= current.end + 1 => {
                current.end = current.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }

    merged
}

/// Unmatched `[start, end)` runs of a `len`-char string to keep around `merged`
fn context_runs(len: usize, merged: &[MatchRange], max_length: usize) -> Vec<(usize, usize)> {
    let (Some(first), Some(last)) = (merged.first(), merged.last()) else {
        return vec![(0, len.min(max_length))];
    };

    let matched: usize = merged.iter().map(MatchRange::len).sum();
    let budget = max_length.saturating_sub(matched);

    // Gap capacities: leading, one per pair of neighbouring matches, trailing
    let mut capacities = vec![first.start];
    capacities.extend(merged.windows(2).map(|pair| pair[1].start - pair[0].end - 1));
    capacities.push(len - last.end - 1);

    let last_gap = capacities.len() - 1;
    let interior: usize = capacities[1..last_gap].iter().sum();

    let taken = if interior <= budget {
        let edges = share_budget(&[capacities[0], capacities[last_gap]], budget - interior);
        let mut taken = capacities.clone();
        taken[0] = edges[0];
        taken[last_gap] = edges[1];
        taken
    } else {
        share_budget(&capacities, budget)
    };

    let mut runs = Vec::with_capacity(capacities.len() + merged.len());
    runs.push((first.start - taken[0], first.start));

    for (i, pair) in merged.windows(2).enumerate() {
        let (gap_start, gap_end) = (pair[0].end + 1, pair[1].start);
        let (kept, capacity) = (taken[i + 1], capacities[i + 1]);
        if kept == capacity {
            runs.push((gap_start, gap_end));
        } else {
            let after = kept.div_ceil(2);
            runs.push((gap_start, gap_start + after));
            runs.push((gap_end - (kept - after), gap_end));
        }
    }

    runs.push((last.end + 1, last.end + 1 + taken[last_gap]));
    runs
}

/// Split `budget` evenly across gaps, handing what a full gap cannot use to
/// the others. Leftover single characters go to the earliest open gaps.
fn share_budget(capacities: &[usize], mut budget: usize) -> Vec<usize> {
    let mut taken = vec![0; capacities.len()];

    loop {
        let open: Vec<usize> = (0..capacities.len())
            .filter(|&i| taken[i] < capacities[i])
            .collect();
        if open.is_empty() || budget == 0 {
            break;
        }

        let share = budget / open.len();
        if share == 0 {
            for &i in open.iter().take(budget) {
                taken[i] += 1;
            }
            break;
        }

        for &i in &open {
            let grant = share.min(capacities[i] - taken[i]);
            taken[i] += grant;
            budget -= grant;
        }
    }

    taken
}
