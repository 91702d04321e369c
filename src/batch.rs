use std::fs::{create_dir_all, read_dir};
use std::path::Path;

use ab_glyph::FontVec;
use anyhow::{Context, Result};
use geoutils::Distance;

use crate::annotate::annotate;
use crate::args::ProgramArgs;
use crate::geotag::{read_location, GeotagError};
use crate::labels::{nearest_label, LabeledPoint};

/// How processing one picture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The picture matched a reference point and its labeled copy
    /// was written.
    Labeled(String),
    /// The picture is geotagged, but no reference point lies within
    /// the threshold.
    NoMatch,
    /// The picture carries no usable GPS position.
    NoCoordinate,
    /// The labeled copy couldn't be produced.
    WriteFailed,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub labeled: usize,
    pub unmatched: usize,
    pub no_coordinate: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Labeled(_) => self.labeled += 1,
            Outcome::NoMatch => self.unmatched += 1,
            Outcome::NoCoordinate => self.no_coordinate += 1,
            Outcome::WriteFailed => self.failed += 1,
        }
    }
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}

/// Runs a single picture through the extract -> match -> annotate
/// pipeline. Soft-fails: every error is reported and folded into the
/// returned outcome.
pub fn label_file(
    path: &Path,
    points: &[LabeledPoint],
    font: &FontVec,
    args: &ProgramArgs,
) -> Outcome {
    let position = match read_location(path) {
        Ok(position) => position,
        Err(GeotagError::MissingGps) => return Outcome::NoCoordinate,
        Err(e) => {
            eprintln!("Warning: couldn't read a geotag from {:?}: {}.", path, e);
            return Outcome::NoCoordinate;
        }
    };

    if args.verbose {
        println!(
            "Found position for {:?}: ({}, {})",
            path,
            position.latitude(),
            position.longitude()
        );
    }

    match nearest_label(&position, points, Distance::from_meters(args.threshold)) {
        Some(label) => match annotate(path, label, &args.output, font) {
            Ok(_) => Outcome::Labeled(label.to_string()),
            Err(e) => {
                eprintln!("Error: couldn't label {:?}: {:#}.", path, e);
                Outcome::WriteFailed
            }
        },
        None => Outcome::NoMatch,
    }
}

/// Labels every picture of the input folder, one at a time, in
/// whatever order the directory listing yields. One picture's
/// failure never aborts the batch.
pub fn label_folder(
    args: &ProgramArgs,
    points: &[LabeledPoint],
    font: &FontVec,
) -> Result<BatchSummary> {
    create_dir_all(&args.output)
        .with_context(|| format!("couldn't create the output folder {:?}", args.output))?;

    let mut summary = BatchSummary::default();

    for entry in read_dir(&args.input)
        .with_context(|| format!("couldn't list the input folder {:?}", args.input))?
    {
        let path = entry
            .with_context(|| format!("couldn't list the input folder {:?}", args.input))?
            .path();

        if !path.is_file() || !is_jpeg(&path) {
            continue;
        }

        let outcome = label_file(&path, points, font, args);
        report(&path, &outcome, args.threshold);
        summary.record(&outcome);
    }

    Ok(summary)
}

fn report(path: &Path, outcome: &Outcome, threshold: f64) {
    let name = path.file_name().unwrap_or(path.as_os_str());

    match outcome {
        Outcome::Labeled(label) => println!("Labeled {:?} with '{}'.", name, label),
        Outcome::NoMatch => println!("No reference point within {}m of {:?}.", threshold, name),
        Outcome::NoCoordinate => println!("No GPS position found for {:?}.", name),
        Outcome::WriteFailed => println!("Failed to write the labeled copy of {:?}.", name),
    }
}
