//! Merging of overlapping source blocks.
//!
//! A region that maps to duplicated loci, or that is covered by overlapping
//! alignment chains, yields projection records whose source blocks overlap.
//! The merger rewrites them into non-overlapping source blocks, ordered by
//! source start, each carrying every target block that covers it.

use std::collections::BTreeMap;

use crate::libs::block::{Interval, MergedBlock, ProjectionRecord};

/// Groups records by target sequence and merges each group.
///
/// Blocks on different target sequences never merge with each other.
pub fn merge_blocks(records: Vec<ProjectionRecord>) -> BTreeMap<String, Vec<MergedBlock>> {
    let mut groups: BTreeMap<String, Vec<ProjectionRecord>> = BTreeMap::new();
    for rec in records {
        groups.entry(rec.target_name.clone()).or_default().push(rec);
    }

    groups
        .into_iter()
        .map(|(name, recs)| (name, merge_sorted(recs)))
        .collect()
}

/// Sorts records of one target sequence by source start and merges them.
///
/// ```
/// # use cgr::libs::block::{Interval, ProjectionRecord, Strand};
/// # use cgr::libs::merge::merge_sorted;
/// let a = ProjectionRecord::from_block("chrA", 1000, 0, 100, 50, Strand::Forward).unwrap();
/// let b = ProjectionRecord::from_block("chrA", 1000, 40, 200, 50, Strand::Forward).unwrap();
/// let merged = merge_sorted(vec![b, a]);
///
/// assert_eq!(merged.len(), 3);
/// assert_eq!(merged[0].source, Interval::forward(0, 40));
/// assert_eq!(merged[0].targets, vec![Interval::forward(100, 140)]);
/// assert_eq!(merged[1].source, Interval::forward(40, 50));
/// assert_eq!(
///     merged[1].targets,
///     vec![Interval::forward(140, 150), Interval::forward(200, 210)]
/// );
/// assert_eq!(merged[2].source, Interval::forward(50, 90));
/// assert_eq!(merged[2].targets, vec![Interval::forward(210, 250)]);
/// ```
pub fn merge_sorted(mut records: Vec<ProjectionRecord>) -> Vec<MergedBlock> {
    // stable, so ties keep the oracle's order
    records.sort_by_key(|r| (r.source.start, r.source.end));

    let mut merged: Vec<MergedBlock> = Vec::with_capacity(records.len());
    for rec in &records {
        let prev = match merged.last() {
            Some(prev) => prev.clone(),
            None => {
                merged.push(MergedBlock::from(rec));
                continue;
            }
        };

        let (q, t) = (rec.source, rec.target);
        if q.start >= prev.source.end {
            merged.push(MergedBlock::from(rec));
            continue;
        }

        // After a split the last entry may start past this record. The part
        // in front of it is already covered by earlier entries and does not
        // get this record's target as a candidate.
        let (q, t) = if q.start < prev.source.start {
            if q.end <= prev.source.start {
                continue;
            }
            let skip = prev.source.start - q.start;
            (
                Interval::new(prev.source.start, q.end, q.strand),
                t.take_last(t.len() - skip),
            )
        } else {
            (q, t)
        };

        merged.pop();
        merged.extend(split_overlap(&prev, q, t));
    }

    merged
}

/// Splits an overlapping pair into pre-overlap, overlap and post-overlap
/// entries. `q.start` lies in `[prev.start, prev.end)`.
fn split_overlap(prev: &MergedBlock, q: Interval, t: Interval) -> Vec<MergedBlock> {
    let p = prev.source;
    let pre = q.start - p.start;
    let overlap = q.end.min(p.end) - q.start;
    let post = (q.end - p.end).abs();

    let mut out = Vec::with_capacity(3);

    // equal starts supersede the previous entry instead of leaving an empty one
    if pre > 0 {
        out.push(MergedBlock::new(
            Interval::new(p.start, q.start, p.strand),
            prev.targets.iter().map(|x| x.take_first(pre)).collect(),
        ));
    }

    if q.end > p.end {
        let mut targets: Vec<Interval> = prev.targets.iter().map(|x| x.take_last(overlap)).collect();
        targets.push(t.take_first(overlap));
        out.push(MergedBlock::new(
            Interval::new(q.start, p.end, q.strand),
            targets,
        ));
        out.push(MergedBlock::new(
            Interval::new(p.end, q.end, q.strand),
            vec![t.take_last(post)],
        ));
    } else {
        let mut targets: Vec<Interval> = prev
            .targets
            .iter()
            .map(|x| x.take_first(pre + overlap).take_last(overlap))
            .collect();
        targets.push(t);
        out.push(MergedBlock::new(
            Interval::new(q.start, q.end, q.strand),
            targets,
        ));
        if q.end < p.end {
            out.push(MergedBlock::new(
                Interval::new(q.end, p.end, p.strand),
                prev.targets.iter().map(|x| x.take_last(post)).collect(),
            ));
        }
    }

    out
}
