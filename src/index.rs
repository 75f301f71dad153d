//! Interval index for overlap filtering during traversal.

use crate::interval::Interval;
use rustc_hash::FxHashMap;

/// Requested intervals organized by contig.
///
/// Intervals are sorted and overlapping or adjacent ones are merged when
/// the index is built, so each contig holds disjoint spans with strictly
/// increasing ends and a single binary search answers an overlap query.
///
/// An index built from no intervals at all places no restriction; one built
/// from intervals that are all empty restricts to nothing.
#[derive(Debug, Default)]
pub struct IntervalIndex {
    spans_by_contig: FxHashMap<String, Vec<(u64, u64)>>,
    span_count: usize,
    restricted: bool,
}

impl IntervalIndex {
    /// Create an unrestricted index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a collection of intervals.
    pub fn from_intervals(intervals: Vec<Interval>) -> Self {
        let restricted = !intervals.is_empty();
        let mut by_contig: FxHashMap<String, Vec<(u64, u64)>> = FxHashMap::default();

        for interval in intervals {
            if interval.is_empty() {
                continue;
            }
            by_contig
                .entry(interval.chrom)
                .or_default()
                .push((interval.start, interval.end));
        }

        let mut span_count = 0;
        for spans in by_contig.values_mut() {
            spans.sort_unstable();
            let mut merged: Vec<(u64, u64)> = Vec::with_capacity(spans.len());
            for &(start, end) in spans.iter() {
                match merged.last_mut() {
                    Some(last) if start <= last.1 => last.1 = last.1.max(end),
                    _ => merged.push((start, end)),
                }
            }
            span_count += merged.len();
            *spans = merged;
        }

        Self {
            spans_by_contig: by_contig,
            span_count,
            restricted,
        }
    }

    /// Whether traversal must consult the index at all.
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// Check if any indexed interval overlaps `[start, end)` on `contig`.
    #[inline]
    pub fn has_overlap(&self, contig: &str, start: u64, end: u64) -> bool {
        let Some(spans) = self.spans_by_contig.get(contig) else {
            return false;
        };

        // First span that ends after the query start.
        let idx = spans.partition_point(|&(_, span_end)| span_end <= start);
        spans
            .get(idx)
            .is_some_and(|&(span_start, span_end)| span_start < end && start < span_end)
    }

    /// Number of disjoint spans after merging.
    pub fn len(&self) -> usize {
        self.span_count
    }

    pub fn is_empty(&self) -> bool {
        self.span_count == 0
    }
}
