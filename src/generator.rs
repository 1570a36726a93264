//! Synthetic request logs for a single identifier.

use log::debug;

use crate::clock::Clock;
use crate::random::CountSource;

pub const DEFAULT_DURATION_SECS: u64 = 60;
pub const DEFAULT_MAX_PER_SECOND: u32 = 1;

/// One simulated request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    pub identifier: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

pub type RequestLog = Vec<RequestRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub duration_seconds: u64,
    pub max_per_second: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            duration_seconds: DEFAULT_DURATION_SECS,
            max_per_second: DEFAULT_MAX_PER_SECOND,
        }
    }
}

/// Simulates `duration_seconds` seconds of traffic from `identifier`.
///
/// The start time is read from `clock` once. For every second offset a count
/// in `[0, max_per_second]` is drawn from `counts`, and that many records are
/// stamped with `start + offset`. Records within one second share a timestamp.
pub fn generate_request_data(
    identifier: &str,
    duration_seconds: u64,
    max_per_second: u32,
    clock: &dyn Clock,
    counts: &mut dyn CountSource,
) -> RequestLog {
    let start = clock.now();
    let mut log = Vec::new();

    for second in 0..duration_seconds {
        let num_requests = counts.draw(max_per_second);
        let timestamp = start + second as f64;
        log.extend((0..num_requests).map(|_| RequestRecord {
            identifier: identifier.to_string(),
            timestamp,
        }));
    }

    debug!(
        "Generated {} requests for {} over {}s (max {}/s)",
        log.len(),
        identifier,
        duration_seconds,
        max_per_second
    );
    log
}

/// Same as [`generate_request_data`] with the parameters taken from `config`.
pub fn generate_with_config(
    identifier: &str,
    config: &GeneratorConfig,
    clock: &dyn Clock,
    counts: &mut dyn CountSource,
) -> RequestLog {
    generate_request_data(
        identifier,
        config.duration_seconds,
        config.max_per_second,
        clock,
        counts,
    )
}
