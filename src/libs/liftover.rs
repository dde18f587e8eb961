use std::io::Write;
use std::path::PathBuf;

use cmd_lib::run_cmd;

use crate::libs::bed::Region;
use crate::libs::error::ContigError;
use crate::libs::psl::{read_psl, Psl};

/// Projects a source region onto the target genome.
pub trait Liftover {
    fn liftover(&self, region: &Region) -> Result<Vec<Psl>, ContigError>;
}

impl<F> Liftover for F
where
    F: Fn(&Region) -> Result<Vec<Psl>, ContigError>,
{
    fn liftover(&self, region: &Region) -> Result<Vec<Psl>, ContigError> {
        self(region)
    }
}

//----------------------------
// HalLiftover
//----------------------------
/// Runs `halLiftover --outPSL` once per region.
#[derive(Debug, Clone)]
pub struct HalLiftover {
    bin: PathBuf,
    alignment: String,
    src_genome: String,
    dest_genome: String,
}

impl HalLiftover {
    /// `bin` is looked up in `PATH` unless it is a path.
    pub fn new(
        bin: &str,
        alignment: &str,
        src_genome: &str,
        dest_genome: &str,
    ) -> Result<Self, ContigError> {
        let bin = which::which(bin)
            .map_err(|e| ContigError::OracleInvocation(format!("{}: {}", bin, e)))?;
        log::info!("Using liftover binary {}", bin.display());

        Ok(Self {
            bin,
            alignment: alignment.to_string(),
            src_genome: src_genome.to_string(),
            dest_genome: dest_genome.to_string(),
        })
    }
}

impl Liftover for HalLiftover {
    fn liftover(&self, region: &Region) -> Result<Vec<Psl>, ContigError> {
        // removed when dropped, on every return path
        let scratch = tempfile::Builder::new().prefix("cgr.").tempdir()?;
        let bed_path = scratch.path().join("region.bed");
        let psl_path = scratch.path().join("region.psl");

        {
            let mut bed = std::fs::File::create(&bed_path)?;
            writeln!(bed, "{}", region.line())?;
        }

        let bin = self.bin.display().to_string();
        let alignment = &self.alignment;
        let src = &self.src_genome;
        let dest = &self.dest_genome;
        let bed_file = bed_path.display().to_string();
        let psl_file = psl_path.display().to_string();

        run_cmd!(${bin} --outPSL ${alignment} ${src} ${bed_file} ${dest} ${psl_file}).map_err(
            |e| {
                ContigError::OracleInvocation(format!(
                    "{} on {}:{}-{}: {}",
                    bin,
                    region.chrom(),
                    region.start(),
                    region.end(),
                    e
                ))
            },
        )?;

        let reader = crate::reader(&psl_file).map_err(|e| {
            ContigError::OracleInvocation(format!("{} wrote no output: {}", bin, e))
        })?;
        read_psl(reader)
    }
}
