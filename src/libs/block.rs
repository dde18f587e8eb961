use std::fmt;

use crate::libs::error::ContigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Forward),
            '-' => Some(Strand::Reverse),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

//----------------------------
// Interval
//----------------------------
/// Half-open range `[start, end)` with a strand.
///
/// Reverse-strand intervals are already expressed in forward coordinates, so
/// `start < end` holds for both strands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
    pub strand: Strand,
}

impl Interval {
    /// ```
    /// # use cgr::libs::block::{Interval, Strand};
    /// let iv = Interval::new(100, 150, Strand::Forward);
    /// assert_eq!(iv.len(), 50);
    /// ```
    pub fn new(start: i64, end: i64, strand: Strand) -> Self {
        debug_assert!(0 <= start && start <= end, "bad interval {}-{}", start, end);
        Self { start, end, strand }
    }

    pub fn forward(start: i64, end: i64) -> Self {
        Self::new(start, end, Strand::Forward)
    }

    pub fn reverse(start: i64, end: i64) -> Self {
        Self::new(start, end, Strand::Reverse)
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The first `len` bases in the direction of the strand.
    ///
    /// ```
    /// # use cgr::libs::block::Interval;
    /// assert_eq!(Interval::forward(100, 150).take_first(10), Interval::forward(100, 110));
    /// assert_eq!(Interval::reverse(100, 150).take_first(10), Interval::reverse(140, 150));
    /// ```
    pub fn take_first(&self, len: i64) -> Self {
        match self.strand {
            Strand::Forward => Self::new(self.start, self.start + len, self.strand),
            Strand::Reverse => Self::new(self.end - len, self.end, self.strand),
        }
    }

    /// The last `len` bases in the direction of the strand.
    ///
    /// ```
    /// # use cgr::libs::block::Interval;
    /// assert_eq!(Interval::forward(100, 150).take_last(10), Interval::forward(140, 150));
    /// assert_eq!(Interval::reverse(100, 150).take_last(10), Interval::reverse(100, 110));
    /// ```
    pub fn take_last(&self, len: i64) -> Self {
        match self.strand {
            Strand::Forward => Self::new(self.end - len, self.end, self.strand),
            Strand::Reverse => Self::new(self.start, self.start + len, self.strand),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}({})", self.start, self.end, self.strand)
    }
}

//----------------------------
// ProjectionRecord
//----------------------------
/// One source block and the target block it projects onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionRecord {
    pub source: Interval,
    pub target_name: String,
    pub target_size: i64,
    pub target: Interval,
}

impl ProjectionRecord {
    /// Builds a record from PSL-style coordinates. A reverse target start is
    /// counted from the end of the target sequence and is flipped here.
    ///
    /// ```
    /// # use cgr::libs::block::{Interval, ProjectionRecord, Strand};
    /// let rec = ProjectionRecord::from_block("chr1", 1000, 10, 200, 50, Strand::Reverse).unwrap();
    /// assert_eq!(rec.source, Interval::forward(10, 60));
    /// assert_eq!(rec.target, Interval::reverse(750, 800));
    /// ```
    pub fn from_block(
        target_name: &str,
        target_size: i64,
        q_start: i64,
        t_start: i64,
        len: i64,
        t_strand: Strand,
    ) -> Result<Self, ContigError> {
        if len <= 0 {
            return Err(ContigError::MalformedProjection(format!(
                "empty block at {}:{}",
                target_name, t_start
            )));
        }
        let target = match t_strand {
            Strand::Forward => Interval::forward(t_start, t_start + len),
            Strand::Reverse => {
                if t_start + len > target_size {
                    return Err(ContigError::MalformedProjection(format!(
                        "block {}+{} exceeds size {} of {}",
                        t_start, len, target_size, target_name
                    )));
                }
                Interval::reverse(target_size - t_start - len, target_size - t_start)
            }
        };

        Ok(Self {
            source: Interval::forward(q_start, q_start + len),
            target_name: target_name.to_string(),
            target_size,
            target,
        })
    }
}

//----------------------------
// MergedBlock
//----------------------------
/// A source block with every candidate target block that survived merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedBlock {
    pub source: Interval,
    pub targets: Vec<Interval>,
}

impl MergedBlock {
    pub fn new(source: Interval, targets: Vec<Interval>) -> Self {
        Self { source, targets }
    }
}

impl From<&ProjectionRecord> for MergedBlock {
    fn from(rec: &ProjectionRecord) -> Self {
        Self::new(rec.source, vec![rec.target])
    }
}

impl fmt::Display for MergedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets = self
            .targets
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{}\t{}\t{}", self.source.start, self.source.end, targets)
    }
}
