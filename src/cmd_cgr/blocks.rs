use cgr::libs::merge::merge_blocks;
use cgr::libs::psl::read_psl;
use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("blocks")
        .about("Merge the blocks of a liftover PSL and print them")
        .after_help(
            r###"
Reads the PSL written by `halLiftover --outPSL` for one region and prints the merged
blocks, one per line:

    target_name <TAB> source_start <TAB> source_end <TAB> targets

`targets` lists every candidate target block as start-end(strand), comma-separated.
Reverse-strand target blocks are reported in forward coordinates.

Notes:
* Overlapping source blocks are split; the overlapping part carries the target
  blocks of both records
* Target sequences are printed in name order, blocks in source order
* The query strand must be '+'

Examples:
1. Inspect the merged blocks of a liftover:
   cgr blocks region.psl

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input PSL file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let psls = read_psl(cgr::reader(infile)?)?;

    let mut records = vec![];
    for psl in &psls {
        records.extend(psl.projections()?);
    }
    let blocks_of = merge_blocks(records);

    let mut writer = cgr::writer(args.get_one::<String>("outfile").unwrap())?;
    for (seq, blocks) in &blocks_of {
        for block in blocks {
            writeln!(writer, "{}\t{}", seq, block)?;
        }
    }
    writer.flush()?;

    Ok(())
}
