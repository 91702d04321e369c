use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{Exif, In, Reader, Tag, Value};
use geoutils::Location;
use thiserror::Error;

use crate::utils::{dms_to_dd, in_valid_range};

#[derive(Debug, Error)]
pub enum GeotagError {
    #[error("couldn't open the file: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse the Exif block: {0}")]
    Exif(#[from] exif::Error),
    #[error("no usable GPS fields")]
    MissingGps,
}

/// Reads the GPS position embedded in an image file.
///
/// A position is only returned when both coordinates are present,
/// well-formed and within range; everything else is an error the
/// caller treats as "no coordinate".
pub fn read_location(path: &Path) -> Result<Location, GeotagError> {
    let mut bufreader = BufReader::new(File::open(path)?);
    let exif = Reader::new().read_from_container(&mut bufreader)?;

    let latitude =
        gps_coord(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef).ok_or(GeotagError::MissingGps)?;
    let longitude = gps_coord(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef)
        .ok_or(GeotagError::MissingGps)?;

    if !in_valid_range(latitude, longitude) {
        return Err(GeotagError::MissingGps);
    }

    Ok(Location::new(latitude, longitude))
}

/// Folds a DMS rational triplet and its hemisphere reference into
/// signed decimal degrees.
fn gps_coord(exif: &Exif, coord_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let coord = exif.get_field(coord_tag, In::PRIMARY)?;
    let hemisphere = exif.get_field(ref_tag, In::PRIMARY)?;

    let dd = match &coord.value {
        Value::Rational(dms) if dms.len() == 3 => {
            dms_to_dd(dms[0].to_f64(), dms[1].to_f64(), dms[2].to_f64())
        }
        _ => return None,
    };

    match hemisphere.display_value().to_string().chars().next() {
        Some('N') | Some('E') => Some(dd),
        Some('S') | Some('W') => Some(-dd),
        _ => None,
    }
}
