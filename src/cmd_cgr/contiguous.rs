use anyhow::Context;
use cgr::libs::batch::run_batch;
use cgr::libs::config::ContigOpt;
use cgr::libs::liftover::HalLiftover;
use cgr::libs::region::RegionEvaluator;
use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("contiguous")
        .about("Keep regions that map contiguously to another genome")
        .after_help(
            r###"
Lifts each BED region from <src_genome> to <dest_genome> with `halLiftover --outPSL`
and keeps the regions whose projected blocks stay adjacent in the target.

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* Overlapping projections (duplications, overlapping chains) are split into
  non-overlapping blocks; every candidate locus is kept for the adjacency check
* Two consecutive blocks are adjacent when they share the strand and the
  gap between them in the target is in [0, --max-gap)
* A region passes if, on any target sequence covering at least
  --required-map-fraction of its bases, all consecutive blocks are adjacent
* BED12 records are lifted block by block; --max-intron-diff and
  --deletion-gaps are accepted, but intron lengths are not re-checked
* The query strand of the liftover must be '+'
* Regions are processed in --slices slices on --parallel threads;
  the output keeps the input order

Examples:
1. Keep contiguous regions:
   cgr contiguous aln.hal human genes.bed mouse -o genes.contiguous.bed

2. Print the number of preserved adjacencies of each passing region:
   cgr contiguous aln.hal human genes.bed mouse --print-adjacencies

3. Tolerate larger gaps, require 80% of bases on one target sequence:
   cgr contiguous aln.hal human genes.bed mouse --max-gap 500 --required-map-fraction 0.8

4. Run in parallel with 8 threads and 64 slices:
   cgr contiguous aln.hal human genes.bed mouse --parallel 8 --slices 64

"###,
        )
        .arg(
            Arg::new("alignment")
                .required(true)
                .index(1)
                .help("HAL alignment file"),
        )
        .arg(
            Arg::new("src_genome")
                .required(true)
                .index(2)
                .help("Genome the regions are in"),
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(3)
                .help("BED file of regions in <src_genome> coordinates. [stdin] for standard input"),
        )
        .arg(
            Arg::new("dest_genome")
                .required(true)
                .index(4)
                .help("Genome to check contiguity in"),
        )
        .arg(
            Arg::new("max_gap")
                .long("max-gap")
                .num_args(1)
                .default_value("100")
                .value_parser(value_parser!(i64))
                .help("Maximum gap between adjacent target blocks, exclusive"),
        )
        .arg(
            Arg::new("required_map_fraction")
                .long("required-map-fraction")
                .num_args(1)
                .default_value("0.0")
                .value_parser(value_parser!(f64))
                .help("Fraction of region bases that must map to one target sequence"),
        )
        .arg(
            Arg::new("max_intron_diff")
                .long("max-intron-diff")
                .num_args(1)
                .default_value("10000")
                .value_parser(value_parser!(i64))
                .help("Maximum change of intron lengths (not enforced)"),
        )
        .arg(
            Arg::new("deletion_gaps")
                .long("deletion-gaps")
                .action(ArgAction::SetTrue)
                .help("Count deletion gaps against contiguity (not enforced)"),
        )
        .arg(
            Arg::new("slices")
                .long("slices")
                .num_args(1)
                .value_parser(value_parser!(usize))
                .help("Number of slices. Default: one per 1000 regions"),
        )
        .arg(
            Arg::new("print_adjacencies")
                .long("print-adjacencies")
                .action(ArgAction::SetTrue)
                .help("Print the number of preserved adjacencies instead of the records"),
        )
        .arg(
            Arg::new("liftover_bin")
                .long("liftover-bin")
                .num_args(1)
                .default_value("halLiftover")
                .help("The halLiftover executable"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads for parallel processing"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let alignment = args.get_one::<String>("alignment").unwrap();
    let src_genome = args.get_one::<String>("src_genome").unwrap();
    let infile = args.get_one::<String>("infile").unwrap();
    let dest_genome = args.get_one::<String>("dest_genome").unwrap();
    let liftover_bin = args.get_one::<String>("liftover_bin").unwrap();

    let opt = ContigOpt {
        max_gap: *args.get_one::<i64>("max_gap").unwrap(),
        required_map_fraction: *args.get_one::<f64>("required_map_fraction").unwrap(),
        max_intron_diff: *args.get_one::<i64>("max_intron_diff").unwrap(),
        deletion_gaps: args.get_flag("deletion_gaps"),
        slice_count: args.get_one::<usize>("slices").copied(),
        print_adjacencies: args.get_flag("print_adjacencies"),
    };
    if !(0.0..=1.0).contains(&opt.required_map_fraction) {
        anyhow::bail!(
            "--required-map-fraction must be in [0, 1], got {}",
            opt.required_map_fraction
        );
    }
    if opt.max_gap < 0 {
        anyhow::bail!("--max-gap must not be negative, got {}", opt.max_gap);
    }

    // Set the number of threads for rayon
    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();
    rayon::ThreadPoolBuilder::new()
        .num_threads(opt_parallel)
        .build_global()?;

    //----------------------------
    // Operating
    //----------------------------
    let lines =
        cgr::read_lines(infile).with_context(|| format!("Failed to read regions: {}", infile))?;

    let liftover = HalLiftover::new(liftover_bin, alignment, src_genome, dest_genome)?;
    let evaluator = RegionEvaluator::new(liftover, opt);
    let passed = run_batch(&lines, &evaluator)?;

    //----------------------------
    // Output
    //----------------------------
    let outfile = args.get_one::<String>("outfile").unwrap();
    let mut writer = cgr::writer(outfile)
        .with_context(|| format!("Failed to create output: {}", outfile))?;
    for line in &passed {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;

    Ok(())
}
