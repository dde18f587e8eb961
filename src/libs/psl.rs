use std::io::BufRead;

use crate::libs::block::{ProjectionRecord, Strand};
use crate::libs::error::ContigError;

/// A PSL record as written by `halLiftover --outPSL`.
#[derive(Debug, Clone, Default)]
pub struct Psl {
    pub match_count: u32,
    pub mismatch_count: u32,
    pub rep_match: u32,
    pub n_count: u32,
    pub q_num_insert: u32,
    pub q_base_insert: i32,
    pub t_num_insert: u32,
    pub t_base_insert: i32,
    pub strand: String, // "+", "++", "+-"
    pub q_name: String,
    pub q_size: u32,
    pub q_start: i32,
    pub q_end: i32,
    pub t_name: String,
    pub t_size: u32,
    pub t_start: i32,
    pub t_end: i32,
    pub block_count: u32,
    pub block_sizes: Vec<u32>,
    pub q_starts: Vec<u32>,
    pub t_starts: Vec<u32>,
}

impl Psl {
    pub fn new() -> Self {
        Default::default()
    }

    /// Query strand, the first char of the strand column.
    pub fn q_strand(&self) -> Option<Strand> {
        self.strand.chars().next().and_then(Strand::from_char)
    }

    /// Target strand, the second char of the strand column; `+` when absent.
    pub fn t_strand(&self) -> Option<Strand> {
        match self.strand.chars().nth(1) {
            Some(c) => Strand::from_char(c),
            None => Some(Strand::Forward),
        }
    }

    /// Splits the record into one ProjectionRecord per aligned block.
    ///
    /// Only `+` query strands are supported.
    ///
    /// ```
    /// # use cgr::libs::block::Interval;
    /// # use cgr::libs::psl::Psl;
    /// let line = "50\t0\t0\t0\t0\t0\t0\t0\t+-\tchr1\t1000\t0\t50\tchrA\t500\t350\t400\t1\t50,\t0,\t100,";
    /// let psl: Psl = line.parse().unwrap();
    /// let recs = psl.projections().unwrap();
    /// assert_eq!(recs.len(), 1);
    /// assert_eq!(recs[0].source, Interval::forward(0, 50));
    /// assert_eq!(recs[0].target, Interval::reverse(350, 400));
    /// ```
    pub fn projections(&self) -> Result<Vec<ProjectionRecord>, ContigError> {
        match self.q_strand() {
            Some(Strand::Forward) => {}
            _ => {
                return Err(ContigError::MalformedProjection(format!(
                    "unsupported query strand '{}' for {}",
                    self.strand, self.q_name
                )))
            }
        }
        let t_strand = self.t_strand().ok_or_else(|| {
            ContigError::MalformedProjection(format!(
                "unknown target strand '{}' for {}",
                self.strand, self.t_name
            ))
        })?;

        let n = self.block_sizes.len();
        if self.q_starts.len() != n || self.t_starts.len() != n || self.block_count as usize != n
        {
            return Err(ContigError::MalformedProjection(format!(
                "block count {} disagrees with sizes/qStarts/tStarts ({}/{}/{}) for {}",
                self.block_count,
                n,
                self.q_starts.len(),
                self.t_starts.len(),
                self.q_name
            )));
        }

        self.block_sizes
            .iter()
            .zip(&self.q_starts)
            .zip(&self.t_starts)
            .map(|((&len, &q_start), &t_start)| {
                ProjectionRecord::from_block(
                    &self.t_name,
                    self.t_size as i64,
                    q_start as i64,
                    t_start as i64,
                    len as i64,
                    t_strand,
                )
            })
            .collect()
    }
}

impl std::str::FromStr for Psl {
    type Err = ContigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() < 21 {
            return Err(ContigError::MalformedProjection(format!(
                "fewer than 21 columns: {}",
                s
            )));
        }

        let bad = |what: &str, v: &str| {
            ContigError::MalformedProjection(format!("invalid {}: {}", what, v))
        };
        let parse_u32 = |s: &str| s.parse::<u32>().map_err(|_| bad("u32", s));
        let parse_i32 = |s: &str| s.parse::<i32>().map_err(|_| bad("i32", s));
        let parse_vec = |s: &str| -> Result<Vec<u32>, ContigError> {
            s.split(',')
                .filter(|v| !v.is_empty())
                .map(|v| v.parse::<u32>().map_err(|_| bad("array value", v)))
                .collect()
        };

        Ok(Psl {
            match_count: parse_u32(fields[0])?,
            mismatch_count: parse_u32(fields[1])?,
            rep_match: parse_u32(fields[2])?,
            n_count: parse_u32(fields[3])?,
            q_num_insert: parse_u32(fields[4])?,
            q_base_insert: parse_i32(fields[5])?,
            t_num_insert: parse_u32(fields[6])?,
            t_base_insert: parse_i32(fields[7])?,
            strand: fields[8].to_string(),
            q_name: fields[9].to_string(),
            q_size: parse_u32(fields[10])?,
            q_start: parse_i32(fields[11])?,
            q_end: parse_i32(fields[12])?,
            t_name: fields[13].to_string(),
            t_size: parse_u32(fields[14])?,
            t_start: parse_i32(fields[15])?,
            t_end: parse_i32(fields[16])?,
            block_count: parse_u32(fields[17])?,
            block_sizes: parse_vec(fields[18])?,
            q_starts: parse_vec(fields[19])?,
            t_starts: parse_vec(fields[20])?,
        })
    }
}

/// Reads every PSL record from `reader`, skipping blank lines, comments and
/// the `psLayout` header block.
pub fn read_psl<R: BufRead>(reader: R) -> Result<Vec<Psl>, ContigError> {
    let mut psls = vec![];
    let mut in_header = false;
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.starts_with("psLayout") {
            in_header = true;
            continue;
        }
        if in_header {
            // header ends with a dashed rule
            if trimmed.starts_with("---") {
                in_header = false;
            }
            continue;
        }
        psls.push(trimmed.parse()?);
    }

    Ok(psls)
}
