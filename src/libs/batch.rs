//! Slicing of the region list and parallel evaluation of slices.

use std::ops::Range;

use rayon::prelude::*;

use crate::libs::bed::{is_record, Region};
use crate::libs::error::ContigError;
use crate::libs::liftover::Liftover;
use crate::libs::region::RegionEvaluator;

/// Cuts `n` items into `count` contiguous slices. The last slice takes the
/// remainder; `count` is clamped to `[1, n]`.
///
/// ```
/// # use cgr::libs::batch::slices;
/// assert_eq!(slices(10, 3), vec![0..3, 3..6, 6..10]);
/// assert_eq!(slices(2, 5), vec![0..1, 1..2]);
/// assert_eq!(slices(7, 0), vec![0..7]);
/// assert!(slices(0, 4).is_empty());
/// ```
pub fn slices(n: usize, count: usize) -> Vec<Range<usize>> {
    if n == 0 {
        return vec![];
    }
    let count = count.clamp(1, n);
    let step = n / count;

    let mut ranges: Vec<Range<usize>> = (0..count).map(|i| i * step..(i + 1) * step).collect();
    if let Some(last) = ranges.last_mut() {
        last.end = n;
    }
    ranges
}

/// Evaluates one slice of `(line number, record)` pairs and returns the
/// output lines of the passing regions.
pub fn run_slice<L: Liftover>(
    records: &[(usize, &str)],
    evaluator: &RegionEvaluator<L>,
) -> Result<Vec<String>, ContigError> {
    let mut out = vec![];
    for &(line_no, line) in records {
        let region = Region::parse(line, line_no)?;
        let verdict = evaluator.evaluate(&region)?;
        if verdict.contiguous {
            if evaluator.opt().print_adjacencies {
                out.push(verdict.adjacencies.to_string());
            } else {
                out.push(region.line().to_string());
            }
        }
    }
    Ok(out)
}

/// Evaluates all regions of `lines`, slices in parallel on the current rayon
/// pool, and concatenates the outputs in input order.
///
/// Header, comment and blank lines are skipped. The first failing slice
/// fails the whole batch.
pub fn run_batch<L: Liftover + Sync>(
    lines: &[String],
    evaluator: &RegionEvaluator<L>,
) -> Result<Vec<String>, ContigError> {
    let records: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_record(line))
        .map(|(i, line)| (i + 1, line.as_str()))
        .collect();

    let ranges = slices(records.len(), evaluator.opt().slices_for(records.len()));
    log::info!(
        "{} regions in {} slices on {} threads",
        records.len(),
        ranges.len(),
        rayon::current_num_threads()
    );

    let outputs: Vec<Vec<String>> = ranges
        .into_par_iter()
        .map(|range| {
            let (first, last) = (range.start, range.end);
            let out = run_slice(&records[range], evaluator);
            match &out {
                Ok(lines) => log::info!(
                    "slice {}..{}: {} regions passed",
                    first,
                    last,
                    lines.len()
                ),
                Err(e) => log::error!("slice {}..{} failed: {}", first, last, e),
            }
            out
        })
        .collect::<Result<_, _>>()?;

    Ok(outputs.concat())
}
