use std::collections::BTreeMap;

use chrono::{DateTime, Local, Utc};
use log::{debug, warn};

use crate::generator::RequestRecord;

pub const DEFAULT_THRESHOLD: usize = 10;
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Requests seen from one identifier within one minute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketCount {
    pub identifier: String,
    /// `floor(timestamp / 60)`
    pub bucket: i64,
    pub count: usize,
}

impl BucketCount {
    /// Local wall-clock start of the minute, if representable.
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        let secs = self.bucket.checked_mul(60)?;
        let utc = DateTime::<Utc>::from_timestamp(secs, 0)?;
        Some(utc.with_timezone(&Local))
    }
}

pub fn minute_bucket(timestamp: f64) -> i64 {
    (timestamp / SECONDS_PER_MINUTE).floor() as i64
}

/// Groups records by (identifier, minute) and counts them.
/// Output is ordered by identifier, then by minute.
pub fn count_by_minute(requests: &[RequestRecord]) -> Vec<BucketCount> {
    let mut counts: BTreeMap<(&str, i64), usize> = BTreeMap::new();
    for request in requests {
        let key = (request.identifier.as_str(), minute_bucket(request.timestamp));
        *counts.entry(key).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((identifier, bucket), count)| BucketCount {
            identifier: identifier.to_string(),
            bucket,
            count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub threshold: usize,
    pub groups_examined: usize,
    /// Groups whose count strictly exceeds the threshold.
    pub offending: Vec<BucketCount>,
}

impl Detection {
    pub fn is_attack(&self) -> bool {
        !self.offending.is_empty()
    }
}

pub struct DDoSDetector {
    threshold: usize,
}

impl Default for DDoSDetector {
    fn default() -> Self {
        DDoSDetector::new(DEFAULT_THRESHOLD)
    }
}

impl DDoSDetector {
    pub fn new(threshold: usize) -> Self {
        DDoSDetector { threshold }
    }

    pub fn exceeds(&self, group: &BucketCount) -> bool {
        group.count > self.threshold
    }

    pub fn detect(&self, requests: &[RequestRecord]) -> Detection {
        let groups = count_by_minute(requests);
        let groups_examined = groups.len();
        let offending: Vec<BucketCount> = groups.into_iter().filter(|g| self.exceeds(g)).collect();

        debug!(
            "Examined {} minute buckets from {} requests, threshold {}",
            groups_examined,
            requests.len(),
            self.threshold
        );
        for group in &offending {
            warn!(
                "{} sent {} requests in minute {} (threshold {})",
                group.identifier, group.count, group.bucket, self.threshold
            );
        }

        Detection {
            threshold: self.threshold,
            groups_examined,
            offending,
        }
    }
}

/// Human-readable console report for a detection result.
pub fn render_report(detection: &Detection) -> String {
    if !detection.is_attack() {
        return "No DDoS attack detected.".to_string();
    }

    let mut report = format!(
        "\x1b[31mPossible DDoS attack detected!\x1b[0m\n\
        Threshold: {} requests per minute\n\
        {:<20} {:>12} {:<17} {:>8}",
        detection.threshold, "IP", "Minute", "Started", "Requests"
    );
    for group in &detection.offending {
        let started = group
            .started_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        report.push_str(&format!(
            "\n{:<20} {:>12} {:<17} {:>8}",
            group.identifier, group.bucket, started, group.count
        ));
    }
    report
}
