use gps_labeler::{annotate::resolve_font, args::ProgramArgs, batch, labels::load_labels};

use std::fs::metadata;

use anyhow::{bail, Context, Result};
use clap::Parser;

fn main() {
    let args = ProgramArgs::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &ProgramArgs) -> Result<()> {
    if !metadata(&args.input)
        .with_context(|| format!("couldn't inspect the input path {:?}", args.input))?
        .is_dir()
    {
        bail!("the input path must be a folder, not a file");
    }

    let points = load_labels(&args.labels)?;

    if args.verbose {
        println!(
            "Loaded {} reference points from {:?}.",
            points.len(),
            args.labels
        );
    }

    let font = resolve_font(args.font.as_deref(), args.verbose)?;

    let summary = batch::label_folder(args, &points, &font)?;

    println!(
        "Done: {} labeled, {} unmatched, {} without a position, {} failed.",
        summary.labeled, summary.unmatched, summary.no_coordinate, summary.failed
    );

    Ok(())
}
