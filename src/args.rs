use clap::Parser;
use std::path::PathBuf;

use crate::labels::DEFAULT_THRESHOLD_METERS;

/// This program labels geotagged pictures with the nearest known
/// reference point, drawing the label onto each picture and writing
/// it into the Exif metadata of the saved copy.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct ProgramArgs {
    /// The folder containing the input pictures
    #[clap(short, long, value_parser)]
    pub input: PathBuf,

    /// The CSV file of labeled reference points
    #[clap(short, long, value_parser)]
    pub labels: PathBuf,

    /// The folder the labeled pictures are written to
    #[clap(short, long, value_parser)]
    pub output: PathBuf,

    /// The maximum distance, in meters, at which a reference point
    /// still matches a picture
    #[clap(short, long, value_parser, default_value_t = DEFAULT_THRESHOLD_METERS)]
    pub threshold: f64,

    /// A TrueType font file used to draw the labels
    #[clap(long, value_parser)]
    pub font: Option<PathBuf>,

    /// Use verbose output
    #[clap(short, long, value_parser)]
    pub verbose: bool,
}
