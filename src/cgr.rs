extern crate clap;
use clap::*;

mod cmd_cgr;

fn main() -> anyhow::Result<()> {
    let app = Command::new("cgr")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`cgr` - Contiguous Genomic Regions")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase logging verbosity (-v info, -vv debug)"),
        )
        .subcommand(cmd_cgr::contiguous::make_subcommand())
        .subcommand(cmd_cgr::blocks::make_subcommand())
        .after_help(
            r###"Subcommands:

* contiguous - Keep regions that stay contiguous after liftover
* blocks     - Merge the blocks of a liftover PSL and print them

"###,
        );

    let matches = app.get_matches();

    let level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("contiguous", sub_matches)) => cmd_cgr::contiguous::execute(sub_matches),
        Some(("blocks", sub_matches)) => cmd_cgr::blocks::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
