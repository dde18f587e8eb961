use crate::libs::block::Interval;
use crate::libs::error::ContigError;

//----------------------------
// Region
//----------------------------
/// A BED record in source coordinates.
///
/// BED3 to BED11 records have a single block spanning `[start, end)`; BED12
/// records carry their own sub-blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    chrom: String,
    start: i64,
    end: i64,
    name: Option<String>,
    blocks: Vec<(i64, i64)>,
    line: String,
}

impl Region {
    // Immutable accessors
    pub fn chrom(&self) -> &str {
        &self.chrom
    }
    pub fn start(&self) -> i64 {
        self.start
    }
    pub fn end(&self) -> i64 {
        self.end
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn blocks(&self) -> &[(i64, i64)] {
        &self.blocks
    }
    /// The record as it was read, without the line terminator
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Parses one BED line. `line_no` is only used in error messages.
    ///
    /// ```
    /// # use cgr::libs::bed::Region;
    /// let region = Region::parse("chr1\t100\t200\tgene1", 1).unwrap();
    /// assert_eq!(region.chrom(), "chr1");
    /// assert_eq!(region.name(), Some("gene1"));
    /// assert_eq!(region.blocks(), &[(100, 200)]);
    /// assert_eq!(region.length(), 100);
    ///
    /// let line = "chr1\t100\t400\ttx\t0\t+\t100\t400\t0\t2\t50,100,\t0,200,";
    /// let region = Region::parse(line, 2).unwrap();
    /// assert_eq!(region.blocks(), &[(100, 150), (300, 400)]);
    /// assert_eq!(region.introns(), vec![(150, 300)]);
    /// assert_eq!(region.length(), 150);
    /// ```
    pub fn parse(line: &str, line_no: usize) -> Result<Self, ContigError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(ContigError::region(line_no, "fewer than 3 columns"));
        }

        let parse_i64 = |what: &str, s: &str| {
            s.parse::<i64>()
                .map_err(|_| ContigError::region(line_no, format!("invalid {}: {}", what, s)))
        };
        let parse_list = |what: &str, s: &str| -> Result<Vec<i64>, ContigError> {
            s.split(',')
                .filter(|v| !v.is_empty())
                .map(|v| parse_i64(what, v))
                .collect()
        };

        let chrom = fields[0].to_string();
        let start = parse_i64("start", fields[1])?;
        let end = parse_i64("end", fields[2])?;
        if start < 0 || start >= end {
            return Err(ContigError::region(
                line_no,
                format!("empty or negative range {}-{}", start, end),
            ));
        }
        let name = fields.get(3).map(|s| s.to_string());

        let blocks = if fields.len() >= 12 {
            let count = parse_i64("blockCount", fields[9])?;
            let sizes = parse_list("blockSizes", fields[10])?;
            let starts = parse_list("blockStarts", fields[11])?;
            if sizes.len() != starts.len() || sizes.len() as i64 != count {
                return Err(ContigError::region(
                    line_no,
                    format!(
                        "blockCount {} disagrees with {} sizes and {} starts",
                        count,
                        sizes.len(),
                        starts.len()
                    ),
                ));
            }

            let mut blocks: Vec<(i64, i64)> = Vec::with_capacity(sizes.len());
            for (&size, &rel) in sizes.iter().zip(&starts) {
                if size <= 0 || rel < 0 {
                    return Err(ContigError::region(
                        line_no,
                        format!("bad block {},{}", rel, size),
                    ));
                }
                let block = (start + rel, start + rel + size);
                if block.1 > end {
                    return Err(ContigError::region(
                        line_no,
                        format!("block {}-{} beyond end {}", block.0, block.1, end),
                    ));
                }
                if let Some(prev) = blocks.last() {
                    if block.0 <= prev.0 || block.0 < prev.1 {
                        return Err(ContigError::region(
                            line_no,
                            format!("block at {} overlaps or precedes {}-{}", block.0, prev.0, prev.1),
                        ));
                    }
                }
                blocks.push(block);
            }
            if blocks.is_empty() {
                return Err(ContigError::region(line_no, "no blocks"));
            }
            blocks
        } else {
            vec![(start, end)]
        };

        Ok(Self {
            chrom,
            start,
            end,
            name,
            blocks,
            line: line.to_string(),
        })
    }

    /// Number of source bases, the sum of the block lengths
    pub fn length(&self) -> i64 {
        self.blocks.iter().map(|(s, e)| e - s).sum()
    }

    /// Gaps between consecutive blocks
    pub fn introns(&self) -> Vec<(i64, i64)> {
        self.blocks
            .windows(2)
            .map(|w| (w[0].1, w[1].0))
            .collect()
    }

    /// The `[start, end)` envelope of the record
    pub fn envelope(&self) -> Interval {
        Interval::forward(self.start, self.end)
    }
}

/// Skips lines that carry no record.
pub fn is_record(line: &str) -> bool {
    let trimmed = line.trim();
    !(trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("track")
        || trimmed.starts_with("browser"))
}
