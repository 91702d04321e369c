use std::path::Path;

use anyhow::{bail, Context, Result};
use geoutils::{Distance, Location};
use serde::Deserialize;

/// Default maximum distance, in meters, between a picture and the
/// reference point labeling it.
pub const DEFAULT_THRESHOLD_METERS: f64 = 10.0;

/// A single row of the reference table.
#[derive(Debug, Clone, Deserialize)]
pub struct LabeledPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl LabeledPoint {
    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }
}

/// Loads the reference table from a CSV file with `latitude`,
/// `longitude` and `label` columns, in any column order.
pub fn load_labels(path: &Path) -> Result<Vec<LabeledPoint>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("couldn't open the reference table {:?}", path))?;

    let mut points = Vec::new();

    for record in reader.deserialize() {
        let point: LabeledPoint = record.with_context(|| format!("malformed row in {:?}", path))?;
        points.push(point);
    }

    if points.is_empty() {
        bail!("the reference table {:?} contains no rows", path);
    }

    Ok(points)
}

/// Returns the label of the reference point closest to `query`, as
/// long as it lies within `threshold`.
///
/// Distances are geodesic meters on the ellipsoid. The scan is
/// linear and keeps the first of equally distant points.
pub fn nearest_label<'a>(
    query: &Location,
    points: &'a [LabeledPoint],
    threshold: Distance,
) -> Option<&'a str> {
    let mut nearest: Option<(&'a LabeledPoint, f64)> = None;

    for point in points {
        let meters = distance_meters(query, &point.location());

        match nearest {
            Some((_, best)) if meters >= best => {}
            _ => nearest = Some((point, meters)),
        }
    }

    nearest
        .filter(|(_, meters)| *meters <= threshold.meters())
        .map(|(point, _)| point.label.as_str())
}

// Vincenty's inverse formula may not converge for near-antipodal
// pairs; the haversine distance covers those.
fn distance_meters(from: &Location, to: &Location) -> f64 {
    match from.distance_to(to) {
        Ok(distance) => distance.meters(),
        Err(_) => from.haversine_distance_to(to).meters(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn table(rows: &[(f64, f64, &str)]) -> Vec<LabeledPoint> {
        rows.iter()
            .map(|(latitude, longitude, label)| LabeledPoint {
                latitude: *latitude,
                longitude: *longitude,
                label: label.to_string(),
            })
            .collect()
    }

    #[test]
    fn exact_position_matches() {
        let points = table(&[(10.0, 20.0, "A"), (11.0, 21.0, "B")]);
        let query = Location::new(10.0, 20.0);

        let label = nearest_label(&query, &points, Distance::from_meters(10.0));

        assert_eq!(label, Some("A"));
    }

    #[test]
    fn nearby_position_matches() {
        // Roughly 7.5 m away from the only reference point.
        let points = table(&[(10.0, 20.0, "A")]);
        let query = Location::new(10.00005, 20.00005);

        let label = nearest_label(&query, &points, Distance::from_meters(10.0));

        assert_eq!(label, Some("A"));
    }

    #[test]
    fn distant_position_does_not_match() {
        // Roughly 1.5 km away.
        let points = table(&[(10.0, 20.0, "A")]);
        let query = Location::new(10.01, 20.01);

        let label = nearest_label(&query, &points, Distance::from_meters(10.0));

        assert_eq!(label, None);
    }

    #[test]
    fn matching_is_deterministic() {
        let points = table(&[(10.0, 20.0, "A"), (10.001, 20.001, "B"), (9.999, 19.999, "C")]);
        let query = Location::new(10.0002, 20.0002);
        let threshold = Distance::from_meters(5_000.0);

        let first = nearest_label(&query, &points, threshold);

        for _ in 0..3 {
            assert_eq!(nearest_label(&query, &points, threshold), first);
        }
    }

    #[test]
    fn picks_the_global_minimum() {
        let points = table(&[(10.001, 20.0, "far"), (10.0, 20.0, "near"), (10.002, 20.0, "farther")]);
        let query = Location::new(10.00001, 20.0);

        let label = nearest_label(&query, &points, Distance::from_meters(5_000.0)).unwrap();

        assert_eq!(label, "near");

        let chosen = points.iter().find(|point| point.label == label).unwrap();
        let chosen_meters = distance_meters(&query, &chosen.location());
        for point in &points {
            assert!(chosen_meters <= distance_meters(&query, &point.location()));
        }
    }

    #[test]
    fn first_encountered_wins_ties() {
        let points = table(&[(10.0, 20.0, "first"), (10.0, 20.0, "second")]);
        let query = Location::new(10.0, 20.0);

        let label = nearest_label(&query, &points, Distance::from_meters(10.0));

        assert_eq!(label, Some("first"));
    }

    #[test]
    fn loads_columns_by_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.csv");
        std::fs::write(&path, "label,longitude,latitude\nA,20.0,10.0\nB,21.5,-11.25\n").unwrap();

        let points = load_labels(&path).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "A");
        assert_eq!(points[0].latitude, 10.0);
        assert_eq!(points[0].longitude, 20.0);
        assert_eq!(points[1].label, "B");
        assert_eq!(points[1].latitude, -11.25);
        assert_eq!(points[1].longitude, 21.5);
    }

    #[test]
    fn rejects_an_empty_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.csv");
        std::fs::write(&path, "latitude,longitude,label\n").unwrap();

        assert!(load_labels(&path).is_err());
    }

    #[test]
    fn rejects_malformed_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.csv");
        std::fs::write(&path, "latitude,longitude,label\nnot-a-number,20.0,A\n").unwrap();

        assert!(load_labels(&path).is_err());
    }

    #[test]
    fn rejects_a_missing_file() {
        let dir = tempdir().unwrap();

        assert!(load_labels(&dir.path().join("nope.csv")).is_err());
    }
}
