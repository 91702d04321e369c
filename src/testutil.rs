use std::path::Path;

use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata;
use little_exif::rational::uR64;

/// Writes a small solid-color JPEG with no Exif block.
pub fn write_plain_jpeg(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]))
        .save(path)
        .unwrap();
}

/// Stamps GPS fields onto an existing JPEG. Coordinates are given in
/// DMS with centisecond precision.
pub fn tag_gps(
    path: &Path,
    lat: (u32, u32, f64),
    lat_ref: &str,
    lon: (u32, u32, f64),
    lon_ref: &str,
) {
    let mut metadata = Metadata::new();

    metadata.set_tag(ExifTag::GPSLatitudeRef(lat_ref.to_string()));
    metadata.set_tag(ExifTag::GPSLatitude(dms_rationals(lat)));
    metadata.set_tag(ExifTag::GPSLongitudeRef(lon_ref.to_string()));
    metadata.set_tag(ExifTag::GPSLongitude(dms_rationals(lon)));

    metadata.write_to_file(path).unwrap();
}

fn dms_rationals((deg, min, sec): (u32, u32, f64)) -> Vec<uR64> {
    vec![
        uR64 {
            nominator: deg,
            denominator: 1,
        },
        uR64 {
            nominator: min,
            denominator: 1,
        },
        uR64 {
            nominator: (sec * 100.0).round() as u32,
            denominator: 100,
        },
    ]
}
