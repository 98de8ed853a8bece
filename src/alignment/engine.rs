/*!
 * Minimum edit distance alignment between two word sequences.
 *
 * The engine fills a full (N+1)×(M+1) cost table and backtracks from the bottom-right
 * corner. Backtracking always prefers, in this order: match, substitute, delete,
 * insert. That rule decides which of several equally cheap alignments is returned.
 */

use log::debug;

use crate::errors::AlignmentError;
use super::normalize::normalize_all;
use super::{AlignmentStats, Operation};

/// Default ceiling on the number of words in either sequence
pub const DEFAULT_MAX_WORDS: usize = 5000;

/// Dense cost table stored row-major
struct CostTable {
    cols: usize,
    cells: Vec<u32>,
}

impl CostTable {
    fn build(source: &[String], target: &[String]) -> Self {
        let rows = source.len() + 1;
        let cols = target.len() + 1;
        let mut cells = vec![0u32; rows * cols];

        for (j, cell) in cells.iter_mut().take(cols).enumerate() {
            *cell = j as u32;
        }
        for i in 0..rows {
            cells[i * cols] = i as u32;
        }

        for i in 1..rows {
            for j in 1..cols {
                let diagonal = cells[(i - 1) * cols + (j - 1)];
                cells[i * cols + j] = if source[i - 1] == target[j - 1] {
                    diagonal
                } else {
                    let up = cells[(i - 1) * cols + j];
                    let left = cells[i * cols + (j - 1)];
                    1 + diagonal.min(up).min(left)
                };
            }
        }

        Self { cols, cells }
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }
}

/// Align `source_words` to `target_words`, returning operations in forward order.
///
/// This function has no size ceiling. Its memory use grows with the product of the
/// two lengths; use [`AlignmentEngine`] to refuse oversized inputs up front.
pub fn align<S: AsRef<str>, T: AsRef<str>>(source_words: &[S], target_words: &[T]) -> Vec<Operation> {
    let source = normalize_all(source_words);
    let target = normalize_all(target_words);
    let table = CostTable::build(&source, &target);

    let mut operations = Vec::with_capacity(source.len().max(target.len()));
    let (mut i, mut j) = (source.len(), target.len());

    while i > 0 || j > 0 {
        let current = table.get(i, j);

        if i > 0 && j > 0 && source[i - 1] == target[j - 1] && current == table.get(i - 1, j - 1) {
            operations.push(Operation::matched(i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && current == table.get(i - 1, j - 1) + 1 {
            operations.push(Operation::substitute(i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if i > 0 && current == table.get(i - 1, j) + 1 {
            operations.push(Operation::delete(i - 1));
            i -= 1;
        } else {
            operations.push(Operation::insert(j - 1));
            j -= 1;
        }
    }

    operations.reverse();
    operations
}

/// Minimum word-level edit distance between two sequences.
///
/// Uses the same normalized comparison as [`align`] but keeps only two rows of the table.
pub fn edit_distance<S: AsRef<str>, T: AsRef<str>>(source_words: &[S], target_words: &[T]) -> usize {
    let source = normalize_all(source_words);
    let target = normalize_all(target_words);

    if source.is_empty() {
        return target.len();
    }
    if target.is_empty() {
        return source.len();
    }

    let mut prev_row: Vec<usize> = (0..=target.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; target.len() + 1];

    for i in 1..=source.len() {
        curr_row[0] = i;

        for j in 1..=target.len() {
            curr_row[j] = if source[i - 1] == target[j - 1] {
                prev_row[j - 1]
            } else {
                1 + prev_row[j - 1]                // substitution
                    .min(prev_row[j])              // deletion
                    .min(curr_row[j - 1])          // insertion
            };
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[target.len()]
}

/// Alignment engine with an optional per-sequence size ceiling
#[derive(Debug, Clone)]
pub struct AlignmentEngine {
    max_words: Option<usize>,
}

impl Default for AlignmentEngine {
    fn default() -> Self {
        Self {
            max_words: Some(DEFAULT_MAX_WORDS),
        }
    }
}

impl AlignmentEngine {
    /// Create an engine refusing sequences longer than `max_words` (`None` disables the check)
    pub fn new(max_words: Option<usize>) -> Self {
        Self { max_words }
    }

    /// Create an engine without a size ceiling
    pub fn unbounded() -> Self {
        Self { max_words: None }
    }

    pub fn max_words(&self) -> Option<usize> {
        self.max_words
    }

    /// Fail fast if either sequence exceeds the ceiling
    pub fn check_capacity(&self, source_len: usize, target_len: usize) -> Result<(), AlignmentError> {
        match self.max_words {
            Some(limit) if source_len > limit || target_len > limit => {
                Err(AlignmentError::CapacityExceeded {
                    source_words: source_len,
                    target_words: target_len,
                    limit,
                })
            }
            _ => Ok(()),
        }
    }

    /// Align two word sequences, enforcing the configured ceiling
    pub fn align<S: AsRef<str>, T: AsRef<str>>(
        &self,
        source_words: &[S],
        target_words: &[T],
    ) -> Result<Vec<Operation>, AlignmentError> {
        self.check_capacity(source_words.len(), target_words.len())?;

        let operations = align(source_words, target_words);

        if log::max_level() >= log::LevelFilter::Debug {
            debug!(
                "Aligned {} source to {} target words: {}",
                source_words.len(),
                target_words.len(),
                AlignmentStats::from_operations(&operations)
            );
        }

        Ok(operations)
    }
}
