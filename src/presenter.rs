//! Second-of-minute request frequency and its terminal chart.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::generator::RequestRecord;

pub const SECONDS_IN_MINUTE: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyPoint {
    pub second: u32,
    pub requests: usize,
}

/// `floor(timestamp) mod 60`, always in `[0, 60)`.
pub fn second_of_minute(timestamp: f64) -> u32 {
    (timestamp.floor() as i64).rem_euclid(SECONDS_IN_MINUTE as i64) as u32
}

/// Counts requests per second-of-minute, ascending by second.
/// Seconds without requests are absent.
pub fn frequency_series(requests: &[RequestRecord]) -> Vec<FrequencyPoint> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for request in requests {
        let second = second_of_minute(request.timestamp);
        *counts.entry(second).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(second, requests)| FrequencyPoint { second, requests })
        .collect()
}

/// Expands a series to all 60 seconds, filling gaps with zero.
pub fn zero_filled(series: &[FrequencyPoint]) -> Vec<FrequencyPoint> {
    let mut filled = vec![0usize; SECONDS_IN_MINUTE as usize];
    for point in series {
        if let Some(slot) = filled.get_mut(point.second as usize) {
            *slot += point.requests;
        }
    }
    filled
        .into_iter()
        .zip(0..SECONDS_IN_MINUTE)
        .map(|(requests, second)| FrequencyPoint { second, requests })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: String,
    /// Rows above the x axis.
    pub height: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "IP Request Frequency Over Time".to_string(),
            x_label: "Time (Seconds)".to_string(),
            y_label: "Request Count".to_string(),
            legend: "Request Frequency".to_string(),
            height: 10,
        }
    }
}

const MARKER: char = 'o';
const LINE: char = '-';
const GRID: char = ':';
const LABEL_WIDTH: usize = 7;
const CHART_WIDTH: usize = SECONDS_IN_MINUTE as usize + LABEL_WIDTH + 1;

fn row_for(requests: f64, max: usize, height: usize) -> usize {
    let row = (requests / max as f64) * height as f64;
    (row.round() as usize).min(height)
}

/// Renders the series as a gridded line chart, one column per second.
pub fn render_chart(series: &[FrequencyPoint], options: &ChartOptions) -> String {
    let width = SECONDS_IN_MINUTE as usize;
    let height = options.height.max(1);
    let max = series.iter().map(|p| p.requests).max().unwrap_or(0).max(1);

    // grid[0] is the bottom row
    let mut grid = vec![vec![' '; width]; height + 1];
    for row in grid.iter_mut() {
        for x in (0..width).step_by(10) {
            row[x] = GRID;
        }
    }

    for pair in series.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b.second <= a.second || b.second as usize > width {
            continue;
        }
        let span = (b.second - a.second) as f64;
        let rise = b.requests as f64 - a.requests as f64;
        for x in a.second + 1..b.second {
            let y = a.requests as f64 + rise * (x - a.second) as f64 / span;
            grid[row_for(y, max, height)][x as usize] = LINE;
        }
    }
    for point in series {
        if (point.second as usize) < width {
            let row = row_for(point.requests as f64, max, height);
            grid[row][point.second as usize] = MARKER;
        }
    }

    let mut lines = Vec::with_capacity(height + 8);
    lines.push(format!("{:^w$}", options.title, w = CHART_WIDTH));
    lines.push(format!(
        "{:>w$} {}{} {}",
        "",
        MARKER,
        LINE,
        options.legend,
        w = LABEL_WIDTH
    ));
    lines.push(options.y_label.clone());
    for (r, row) in grid.iter().enumerate().rev() {
        let value = max as f64 * r as f64 / height as f64;
        let cells: String = row.iter().collect();
        lines.push(format!("{:>w$.1} |{}", value, cells, w = LABEL_WIDTH - 1));
    }
    lines.push(format!("{:>w$}+{}", "", "-".repeat(width), w = LABEL_WIDTH));

    let mut ticks = " ".repeat(width);
    for x in (0..width).step_by(10) {
        let label = x.to_string();
        ticks.replace_range(x..x + label.len(), &label);
    }
    lines.push(format!("{:>w$} {}", "", ticks.trim_end(), w = LABEL_WIDTH));
    lines.push(format!("{:^w$}", options.x_label, w = CHART_WIDTH));

    if series.is_empty() {
        lines.push(format!("{:^w$}", "(no requests)", w = CHART_WIDTH));
    }

    lines
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of markers drawn inside the plot area of a rendered chart.
#[cfg(test)]
pub(crate) fn plotted_points(chart: &str) -> usize {
    chart
        .lines()
        .filter_map(|l| l.split_once('|').map(|(_, cells)| cells))
        .map(|cells| cells.matches(MARKER).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst(timestamp: f64, count: usize) -> Vec<RequestRecord> {
        (0..count)
            .map(|_| RequestRecord {
                identifier: "10.0.0.1".to_string(),
                timestamp,
            })
            .collect()
    }

    fn point(second: u32, requests: usize) -> FrequencyPoint {
        FrequencyPoint { second, requests }
    }

    #[test]
    fn test_second_of_minute() {
        assert_eq!(second_of_minute(0.0), 0);
        assert_eq!(second_of_minute(59.9), 59);
        assert_eq!(second_of_minute(60.0), 0);
        assert_eq!(second_of_minute(1_700_000_007.75), 27);
    }

    #[test]
    fn test_second_of_minute_before_epoch() {
        assert_eq!(second_of_minute(-1e-20), 59);
        assert_eq!(second_of_minute(-0.5), 59);
        assert_eq!(second_of_minute(-60.0), 0);
        assert_eq!(second_of_minute(-61.0), 59);
    }

    #[test]
    fn test_tiny_negative_timestamp_stays_plotted() {
        let series = frequency_series(&burst(-1e-20, 1));
        assert_eq!(series, vec![point(59, 1)]);

        let filled = zero_filled(&series);
        assert_eq!(filled.iter().map(|p| p.requests).sum::<usize>(), 1);
        assert_eq!(filled[59].requests, 1);
    }

    #[test]
    fn test_series_groups_by_second_across_minutes() {
        let mut requests = burst(65.0, 2);
        requests.extend(burst(125.5, 3));
        requests.extend(burst(70.0, 1));

        let series = frequency_series(&requests);
        assert_eq!(series, vec![point(5, 5), point(10, 1)]);
    }

    #[test]
    fn test_empty_log_empty_series() {
        assert!(frequency_series(&[]).is_empty());
    }

    #[test]
    fn test_zero_fill() {
        let filled = zero_filled(&[point(3, 4)]);
        assert_eq!(filled.len(), 60);
        assert_eq!(filled[3].requests, 4);
        assert_eq!(filled.iter().map(|p| p.requests).sum::<usize>(), 4);
        assert!(filled.windows(2).all(|w| w[0].second + 1 == w[1].second));
    }

    #[test]
    fn test_chart_has_labels_and_markers() {
        let series = vec![point(0, 1), point(15, 5), point(59, 3)];
        let chart = render_chart(&series, &ChartOptions::default());
        assert!(chart.contains("IP Request Frequency Over Time"));
        assert!(chart.contains("Time (Seconds)"));
        assert!(chart.contains("Request Count"));
        assert!(chart.contains("Request Frequency"));
        assert_eq!(plotted_points(&chart), 3);
    }

    #[test]
    fn test_peak_is_on_top_row() {
        let series = vec![point(2, 1), point(30, 8)];
        let chart = render_chart(&series, &ChartOptions::default());
        let top = chart.lines().find(|l| l.contains("8.0 |")).unwrap_or("");
        let column = top.split_once('|').and_then(|(_, c)| c.find(MARKER));
        assert_eq!(column, Some(30));
    }

    #[test]
    fn test_empty_chart_renders_frame() {
        let chart = render_chart(&[], &ChartOptions::default());
        assert!(chart.contains("(no requests)"));
        assert_eq!(plotted_points(&chart), 0);
    }
}
