pub mod cli;
pub mod clock;
pub mod config;
pub mod detector;
pub mod error;
pub mod export;
pub mod generator;
pub mod presenter;
pub mod random;


pub use detector::{BucketCount, DDoSDetector, Detection};
pub use error::{DDoSError, Result};
pub use generator::{RequestLog, RequestRecord};
pub use presenter::FrequencyPoint;

use clock::Clock;
use config::ValidatedConfig;
use random::CountSource;

/// Everything produced by one generate -> detect -> present pass.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub log: RequestLog,
    pub detection: Detection,
    pub series: Vec<FrequencyPoint>,
}

pub fn run_simulation(
    config: &ValidatedConfig,
    clock: &dyn Clock,
    counts: &mut dyn CountSource,
) -> SimulationRun {
    let log = generator::generate_with_config(&config.identifier, &config.generator, clock, counts);
    let detection = DDoSDetector::new(config.threshold).detect(&log);
    let series = presenter::frequency_series(&log);
    SimulationRun {
        log,
        detection,
        series,
    }
}
