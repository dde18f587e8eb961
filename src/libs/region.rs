use crate::libs::adjacency::{self, Verdict};
use crate::libs::bed::Region;
use crate::libs::block::ProjectionRecord;
use crate::libs::config::ContigOpt;
use crate::libs::error::ContigError;
use crate::libs::liftover::Liftover;
use crate::libs::merge::merge_blocks;

/// Evaluates regions one at a time against a liftover oracle.
///
/// Only the projected blocks are checked. `max_intron_diff` and
/// `deletion_gaps` are carried in the options but intron lengths and source
/// deletions are not re-validated.
pub struct RegionEvaluator<L> {
    liftover: L,
    opt: ContigOpt,
}

impl<L: Liftover> RegionEvaluator<L> {
    pub fn new(liftover: L, opt: ContigOpt) -> Self {
        Self { liftover, opt }
    }

    pub fn opt(&self) -> &ContigOpt {
        &self.opt
    }

    pub fn evaluate(&self, region: &Region) -> Result<Verdict, ContigError> {
        let psls = self.liftover.liftover(region)?;

        let mut records: Vec<ProjectionRecord> = vec![];
        for psl in &psls {
            records.extend(psl.projections()?);
        }

        let introns = region.introns();
        if !introns.is_empty() {
            log::debug!(
                "{}:{}: {} introns not checked (max_intron_diff {}, deletion_gaps {})",
                region.chrom(),
                region.envelope(),
                introns.len(),
                self.opt.max_intron_diff,
                self.opt.deletion_gaps
            );
        }

        let blocks_of = merge_blocks(records);
        let verdict = adjacency::evaluate(&blocks_of, region.length(), &self.opt);
        log::debug!(
            "{}:{}: {} target sequences, contiguous {}, adjacencies {}",
            region.chrom(),
            region.envelope(),
            blocks_of.len(),
            verdict.contiguous,
            verdict.adjacencies
        );

        Ok(verdict)
    }
}
