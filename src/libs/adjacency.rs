use std::collections::BTreeMap;

use itertools::Itertools;

use crate::libs::block::{Interval, MergedBlock, Strand};
use crate::libs::config::ContigOpt;

/// Outcome of the contiguity check for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verdict {
    pub contiguous: bool,
    pub adjacencies: u64,
}

impl Verdict {
    pub fn new(contiguous: bool, adjacencies: u64) -> Self {
        Self {
            contiguous,
            adjacencies,
        }
    }
}

/// Whether target block `y` follows `x` on the same strand with a gap in
/// `[0, max_gap)`.
///
/// ```
/// # use cgr::libs::block::Interval;
/// # use cgr::libs::adjacency::is_adjacent;
/// assert!(is_adjacent(&Interval::forward(0, 10), &Interval::forward(10, 20), 100));
/// assert!(!is_adjacent(&Interval::forward(0, 10), &Interval::forward(110, 120), 100));
/// assert!(is_adjacent(&Interval::reverse(50, 60), &Interval::reverse(20, 40), 100));
/// assert!(!is_adjacent(&Interval::forward(0, 10), &Interval::reverse(10, 20), 100));
/// ```
pub fn is_adjacent(x: &Interval, y: &Interval, max_gap: i64) -> bool {
    if x.strand != y.strand {
        return false;
    }
    let gap = match x.strand {
        Strand::Forward => y.start - x.end,
        Strand::Reverse => x.start - y.end,
    };
    (0..max_gap).contains(&gap)
}

/// Whether any pairing of the candidate targets of `a` and `b` is adjacent.
/// `a` must not start after `b` in source coordinates.
pub fn is_preserved(a: &MergedBlock, b: &MergedBlock, max_gap: i64) -> bool {
    a.targets
        .iter()
        .cartesian_product(b.targets.iter())
        .any(|(x, y)| is_adjacent(x, y, max_gap))
}

/// Aggregates per-target-sequence checks into a region verdict.
///
/// `region_len` is the number of source bases of the region. A target
/// sequence makes the region contiguous only if it covers at least
/// `required_map_fraction` of them and all of its pairs of consecutive blocks
/// are preserved. Every sequence adds the adjacencies inside its blocks and
/// each preserved pair to the count. When no sequence reaches the threshold
/// the verdict is `(false, 0)`.
pub fn evaluate(
    blocks_of: &BTreeMap<String, Vec<MergedBlock>>,
    region_len: i64,
    opt: &ContigOpt,
) -> Verdict {
    let mut verdict = Verdict::default();
    if blocks_of.is_empty() || region_len <= 0 {
        return verdict;
    }

    let mut any_mapped = false;
    for (seq, blocks) in blocks_of {
        let mapped: i64 = blocks.iter().map(|b| b.source.len()).sum();
        let fraction = mapped as f64 / region_len as f64;
        let enough = fraction >= opt.required_map_fraction;
        if !enough {
            log::debug!(
                "{}: mapped fraction {:.4} below {}",
                seq,
                fraction,
                opt.required_map_fraction
            );
        }
        any_mapped |= enough;

        // positions inside a block are adjacent by construction
        verdict.adjacencies += (mapped - blocks.len() as i64).max(0) as u64;

        let mut all_preserved = enough;
        for (a, b) in blocks.iter().tuple_windows() {
            if is_preserved(a, b, opt.max_gap) {
                verdict.adjacencies += 1;
            } else {
                all_preserved = false;
            }
        }
        if all_preserved {
            verdict.contiguous = true;
        }
    }

    if !any_mapped {
        return Verdict::default();
    }
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(q: (i64, i64), targets: &[Interval]) -> MergedBlock {
        MergedBlock::new(Interval::forward(q.0, q.1), targets.to_vec())
    }

    fn single(seq: &str, blocks: Vec<MergedBlock>) -> BTreeMap<String, Vec<MergedBlock>> {
        let mut map = BTreeMap::new();
        map.insert(seq.to_string(), blocks);
        map
    }

    #[test]
    fn test_forward_gap_bounds() {
        let a = Interval::forward(0, 10);
        assert!(is_adjacent(&a, &Interval::forward(10, 20), 100));
        assert!(is_adjacent(&a, &Interval::forward(109, 119), 100));
        assert!(!is_adjacent(&a, &Interval::forward(110, 120), 100));
        // overlap in target is a negative gap
        assert!(!is_adjacent(&a, &Interval::forward(5, 15), 100));
        // out of order
        assert!(!is_adjacent(&Interval::forward(20, 30), &a, 100));
    }

    #[test]
    fn test_reverse_gap_bounds() {
        let a = Interval::reverse(200, 210);
        assert!(is_adjacent(&a, &Interval::reverse(190, 200), 100));
        assert!(is_adjacent(&a, &Interval::reverse(90, 101), 100));
        assert!(!is_adjacent(&a, &Interval::reverse(90, 100), 100));
        assert!(!is_adjacent(&a, &Interval::reverse(210, 220), 100));
    }

    #[test]
    fn test_max_gap_configurable() {
        let a = Interval::forward(0, 10);
        let b = Interval::forward(15, 20);
        assert!(is_adjacent(&a, &b, 6));
        assert!(!is_adjacent(&a, &b, 5));
        assert!(!is_adjacent(&a, &Interval::forward(10, 20), 0));
    }

    #[test]
    fn test_any_candidate_pair() {
        let a = block((0, 10), &[Interval::forward(500, 510), Interval::forward(100, 110)]);
        let b = block((10, 20), &[Interval::forward(900, 910), Interval::forward(150, 160)]);
        assert!(is_preserved(&a, &b, 100));

        let c = block((10, 20), &[Interval::forward(900, 910)]);
        assert!(!is_preserved(&a, &c, 100));
    }

    #[test]
    fn test_single_block() {
        let map = single("chrA", vec![block((0, 50), &[Interval::forward(100, 150)])]);
        let verdict = evaluate(&map, 50, &ContigOpt::default());
        assert_eq!(verdict, Verdict::new(true, 49));
    }

    #[test]
    fn test_empty() {
        let verdict = evaluate(&BTreeMap::new(), 50, &ContigOpt::default());
        assert_eq!(verdict, Verdict::new(false, 0));
    }

    #[test]
    fn test_below_required_fraction() {
        let map = single("chrA", vec![block((0, 20), &[Interval::forward(100, 120)])]);
        let opt = ContigOpt {
            required_map_fraction: 0.5,
            ..Default::default()
        };
        assert_eq!(evaluate(&map, 50, &opt), Verdict::new(false, 0));

        // exactly at the threshold passes
        let opt = ContigOpt {
            required_map_fraction: 0.4,
            ..Default::default()
        };
        assert_eq!(evaluate(&map, 50, &opt), Verdict::new(true, 19));
    }

    #[test]
    fn test_sequence_below_fraction_still_counts() {
        // chrA carries the region, chrB only a short duplicate of its tail
        let mut map = single("chrA", vec![block((0, 90), &[Interval::forward(100, 190)])]);
        map.insert(
            "chrB".to_string(),
            vec![block((90, 100), &[Interval::forward(700, 710)])],
        );
        let opt = ContigOpt {
            required_map_fraction: 0.5,
            ..Default::default()
        };
        assert_eq!(evaluate(&map, 100, &opt), Verdict::new(true, 89 + 9));

        // no sequence reaches the threshold
        let opt = ContigOpt {
            required_map_fraction: 0.95,
            ..Default::default()
        };
        assert_eq!(evaluate(&map, 100, &opt), Verdict::new(false, 0));
    }

    #[test]
    fn test_partial_credit() {
        // pairs: ok, broken, ok
        let map = single(
            "chrA",
            vec![
                block((0, 10), &[Interval::forward(100, 110)]),
                block((10, 20), &[Interval::forward(110, 120)]),
                block((20, 30), &[Interval::forward(5000, 5010)]),
                block((30, 40), &[Interval::forward(5010, 5020)]),
            ],
        );
        let verdict = evaluate(&map, 40, &ContigOpt::default());
        // 4 * (10 - 1) inside blocks, 2 preserved pairs
        assert_eq!(verdict, Verdict::new(false, 38));
    }

    #[test]
    fn test_any_sequence_wins() {
        let mut map = single(
            "chrA",
            vec![
                block((0, 10), &[Interval::forward(100, 110)]),
                block((10, 20), &[Interval::reverse(110, 120)]),
            ],
        );
        map.insert(
            "chrB".to_string(),
            vec![
                block((0, 10), &[Interval::reverse(300, 310)]),
                block((10, 20), &[Interval::reverse(290, 300)]),
            ],
        );
        let verdict = evaluate(&map, 20, &ContigOpt::default());
        // chrA: 18 inside, strand flip breaks the pair; chrB: 18 + 1
        assert_eq!(verdict, Verdict::new(true, 37));
    }
}
