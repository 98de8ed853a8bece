/*!
 * Timing transfer from source words onto aligned target words.
 *
 * Matched and substituted words keep the exact interval of their source word.
 * Inserted words borrow the interval of the nearest following anchor (a match or
 * substitute), else the nearest preceding one, else a fixed fallback interval.
 * A run of adjacent inserted words borrowing from the same anchor shares that
 * anchor's interval by splitting it into equal consecutive pieces.
 */

use crate::errors::AlignmentError;
use super::{AlignedWord, Operation, OperationKind, TimingInterval};

/// Interval given to inserted words when the alignment has no anchor at all
pub const FALLBACK_INTERVAL: TimingInterval = TimingInterval { start: 0.0, end: 0.1 };

/// Where a resolved word got its interval from
#[derive(Debug, Clone, Copy, PartialEq)]
enum TimingOrigin {
    /// Copied from the word's own source counterpart
    Own,
    /// Borrowed from the anchor at this source index
    Borrowed(usize),
    /// No anchor existed anywhere in the alignment
    Fallback,
}

/// Resolves target word timings from an alignment
#[derive(Debug, Clone)]
pub struct TimingResolver {
    fallback: TimingInterval,
}

impl Default for TimingResolver {
    fn default() -> Self {
        Self {
            fallback: FALLBACK_INTERVAL,
        }
    }
}

impl TimingResolver {
    /// Create a resolver with a custom fallback interval
    pub fn with_fallback(fallback: TimingInterval) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> TimingInterval {
        self.fallback
    }

    /// Resolve one interval per non-deleted target word, in target order
    pub fn resolve<S: AsRef<str>>(
        &self,
        operations: &[Operation],
        source_timings: &[TimingInterval],
        target_words: &[S],
    ) -> Result<Vec<AlignedWord>, AlignmentError> {
        for op in operations {
            check_bounds(op, source_timings.len(), target_words.len())?;
        }

        let lookahead = nearest_anchors(operations.iter().enumerate().rev(), operations.len());
        let lookback = nearest_anchors(operations.iter().enumerate(), operations.len());

        let mut resolved: Vec<(AlignedWord, TimingOrigin)> = Vec::with_capacity(operations.len());

        for (position, op) in operations.iter().enumerate() {
            let (Some(target_index), kind) = (op.target_index, op.kind) else {
                continue;
            };
            let text = target_words[target_index].as_ref();

            let (interval, origin) = match kind {
                OperationKind::Match | OperationKind::Substitute => {
                    let source_index = op.source_index.unwrap_or_default();
                    (source_timings[source_index], TimingOrigin::Own)
                }
                OperationKind::Insert => match lookahead[position].or(lookback[position]) {
                    Some(anchor) => (source_timings[anchor], TimingOrigin::Borrowed(anchor)),
                    None => (self.fallback, TimingOrigin::Fallback),
                },
                OperationKind::Delete => continue,
            };

            resolved.push((AlignedWord::new(text, interval), origin));
        }

        spread_borrowed_runs(&mut resolved);

        Ok(resolved.into_iter().map(|(word, _)| word).collect())
    }
}

/// Resolve timings with the default fallback interval
pub fn resolve_timing<S: AsRef<str>>(
    operations: &[Operation],
    source_timings: &[TimingInterval],
    target_words: &[S],
) -> Result<Vec<AlignedWord>, AlignmentError> {
    TimingResolver::default().resolve(operations, source_timings, target_words)
}

fn check_bounds(op: &Operation, source_len: usize, target_len: usize) -> Result<(), AlignmentError> {
    let source_ok = match op.source_index {
        Some(index) => index < source_len,
        None => op.kind == OperationKind::Insert,
    };
    let target_ok = match op.target_index {
        Some(index) => index < target_len,
        None => op.kind == OperationKind::Delete,
    };

    if source_ok && target_ok {
        Ok(())
    } else {
        Err(AlignmentError::OperationOutOfRange {
            operation: *op,
            source_len,
            target_len,
        })
    }
}

/// For every operation position, the source index of the closest anchor strictly
/// before it in the walking direction of `walk`.
fn nearest_anchors<'a, I>(walk: I, len: usize) -> Vec<Option<usize>>
where
    I: Iterator<Item = (usize, &'a Operation)>,
{
    let mut nearest = vec![None; len];
    let mut last_seen = None;

    for (position, op) in walk {
        nearest[position] = last_seen;
        if op.kind.is_anchor() {
            last_seen = op.source_index;
        }
    }

    nearest
}

/// Split the borrowed interval of each run of adjacent words borrowing from the same anchor
fn spread_borrowed_runs(resolved: &mut [(AlignedWord, TimingOrigin)]) {
    let mut start = 0;

    while start < resolved.len() {
        let TimingOrigin::Borrowed(anchor) = resolved[start].1 else {
            start += 1;
            continue;
        };

        let mut end = start + 1;
        while end < resolved.len() && resolved[end].1 == TimingOrigin::Borrowed(anchor) {
            end += 1;
        }

        let run = &mut resolved[start..end];
        let pieces = run[0].0.interval().subdivide(run.len());
        for ((word, _), piece) in run.iter_mut().zip(pieces) {
            word.start = piece.start;
            word.end = piece.end;
        }

        start = end;
    }
}
