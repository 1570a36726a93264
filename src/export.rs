use std::path::Path;

use log::info;
use serde::Serialize;

use crate::detector::{count_by_minute, DDoSDetector};
use crate::error::{DDoSError, Result};
use crate::generator::RequestRecord;
use crate::presenter::FrequencyPoint;

#[derive(Debug, Serialize)]
struct MinuteRow<'a> {
    ip: &'a str,
    minute: i64,
    requests: usize,
    exceeds: bool,
}

fn write_rows<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<usize> {
    let opened = csv::Writer::from_path(path);
    let mut writer = opened.map_err(|e| DDoSError::export(path, e))?;
    let mut written = 0;
    for row in rows {
        writer.serialize(row).map_err(|e| DDoSError::export(path, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| DDoSError::export(path, e))?;
    Ok(written)
}

/// Writes every (identifier, minute) bucket with its count and whether it
/// exceeds the detector threshold.
pub fn write_minute_counts<P: AsRef<Path>>(
    path: P,
    requests: &[RequestRecord],
    detector: &DDoSDetector,
) -> Result<usize> {
    let path = path.as_ref();
    let groups = count_by_minute(requests);
    let rows = groups.iter().map(|group| MinuteRow {
        ip: &group.identifier,
        minute: group.bucket,
        requests: group.count,
        exceeds: detector.exceeds(group),
    });
    let written = write_rows(path, rows)?;
    info!("Wrote {} minute buckets to {}", written, path.display());
    Ok(written)
}

/// Writes the second-of-minute series as `second,requests` rows.
pub fn write_series<P: AsRef<Path>>(path: P, series: &[FrequencyPoint]) -> Result<usize> {
    let path = path.as_ref();
    let written = write_rows(path, series)?;
    info!("Wrote {} series points to {}", written, path.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst(identifier: &str, timestamp: f64, count: usize) -> Vec<RequestRecord> {
        (0..count)
            .map(|_| RequestRecord {
                identifier: identifier.to_string(),
                timestamp,
            })
            .collect()
    }

    #[test]
    fn test_minute_counts_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minutes.csv");
        let mut requests = burst("10.0.0.1", 60.0, 11);
        requests.extend(burst("10.0.0.1", 120.0, 2));

        let detector = DDoSDetector::new(10);
        let rows = write_minute_counts(&path, &requests, &detector).unwrap();
        assert_eq!(rows, 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ip,minute,requests,exceeds",
                "10.0.0.1,1,11,true",
                "10.0.0.1,2,2,false",
            ]
        );
    }

    #[test]
    fn test_series_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let series = vec![
            FrequencyPoint {
                second: 4,
                requests: 3,
            },
            FrequencyPoint {
                second: 9,
                requests: 1,
            },
        ];

        assert_eq!(write_series(&path, &series).unwrap(), 2);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "second,requests\n4,3\n9,1\n");
    }

    #[test]
    fn test_missing_directory_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("series.csv");
        let err = write_series(&path, &[]).unwrap_err();

        assert!(!err.is_config());
        let message = format!("{}", err);
        assert!(message.starts_with("IO error: could not export to"));
        assert!(message.contains("series.csv"));
    }
}
