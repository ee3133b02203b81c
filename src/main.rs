use clap::Parser;
use log::{debug, warn, LevelFilter};
use snafu::ErrorCompat;

mod args;
mod dip;

use crate::args::{Args, Command};
use crate::dip::DipResult;

fn run(args: &Args) -> DipResult<()> {
    match &args.command {
        Command::Pick {
            sources,
            pool,
            count,
            seed,
        } => {
            dip::run_pick(&args.config, sources, pool, *count, *seed)?;
        }
        Command::Stats {
            sources,
            out,
            reference,
        } => {
            dip::run_stats(&args.config, sources, out, reference)?;
        }
        Command::List { sources, user } => {
            dip::run_list(&args.config, sources, user)?;
        }
        Command::Add { sources, entry } => {
            dip::run_save(&args.config, sources, entry, None)?;
        }
        Command::Edit { id, sources, entry } => {
            dip::run_save(&args.config, sources, entry, Some(id.as_str()))?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
    debug!("args: {:?}", args);

    if let Err(e) = run(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(s) = source {
            eprintln!("  caused by: {}", s);
            source = s.source();
        }
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
