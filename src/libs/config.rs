/// Options of the contiguity check.
#[derive(Debug, Clone, PartialEq)]
pub struct ContigOpt {
    /// Largest accepted gap between adjacent target blocks, exclusive
    pub max_gap: i64,
    /// Fraction of region bases a target sequence must cover to count
    pub required_map_fraction: f64,
    /// Accepted but not enforced, see `RegionEvaluator`
    pub max_intron_diff: i64,
    /// Accepted but not enforced, see `RegionEvaluator`
    pub deletion_gaps: bool,
    /// Number of slices; `None` picks one per `REGIONS_PER_SLICE` regions
    pub slice_count: Option<usize>,
    /// Print adjacency counts instead of the passing records
    pub print_adjacencies: bool,
}

pub const REGIONS_PER_SLICE: usize = 1000;

impl Default for ContigOpt {
    fn default() -> Self {
        Self {
            max_gap: 100,
            required_map_fraction: 0.0,
            max_intron_diff: 10000,
            deletion_gaps: false,
            slice_count: None,
            print_adjacencies: false,
        }
    }
}

impl ContigOpt {
    /// Slice count for `n` regions.
    ///
    /// ```
    /// # use cgr::libs::config::ContigOpt;
    /// let opt = ContigOpt::default();
    /// assert_eq!(opt.slices_for(10), 1);
    /// assert_eq!(opt.slices_for(2500), 2);
    ///
    /// let opt = ContigOpt { slice_count: Some(4), ..Default::default() };
    /// assert_eq!(opt.slices_for(10), 4);
    /// ```
    pub fn slices_for(&self, n: usize) -> usize {
        match self.slice_count {
            Some(count) => count.max(1),
            None => (n / REGIONS_PER_SLICE).max(1),
        }
    }
}
