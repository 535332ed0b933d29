//! Validation utilities for loaded market data.
//!
//! Nothing here rejects data: the transforms tolerate malformed candles, so
//! loaders only report what they find.

use std::collections::HashMap;

use charter_core::Candle;

/// Validate a candle has reasonable values.
pub fn validate_candle(candle: &Candle) -> bool {
    candle.open.is_finite()
        && candle.high.is_finite()
        && candle.low.is_finite()
        && candle.close.is_finite()
        && candle.low <= candle.body_bottom()
        && candle.high >= candle.body_top()
}

/// Summary of gaps in a time series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapReport {
    /// Most common spacing between consecutive points, in seconds.
    pub expected_interval: i64,
    /// Number of gaps wider than the expected interval.
    pub gaps: usize,
    /// Points missing inside those gaps.
    pub missing_points: i64,
    /// Widest gap and the time it starts at.
    pub largest_gap: Option<(i64, i64)>,
    /// Consecutive points sharing a timestamp.
    pub duplicates: usize,
}

/// Analyze timestamps (ascending) for gaps and duplicates.
pub fn analyze_time_gaps(times: &[i64]) -> GapReport {
    if times.len() < 2 {
        return GapReport::default();
    }

    // Detect the interval as the most common positive spacing
    let mut intervals: HashMap<i64, usize> = HashMap::new();
    for window in times.windows(2) {
        let diff = window[1] - window[0];
        if diff > 0 {
            *intervals.entry(diff).or_insert(0) += 1;
        }
    }

    let Some(expected_interval) = intervals
        .iter()
        .max_by_key(|(interval, count)| (**count, std::cmp::Reverse(**interval)))
        .map(|(interval, _)| *interval)
    else {
        return GapReport {
            duplicates: times.len() - 1,
            ..Default::default()
        };
    };

    let mut report = GapReport {
        expected_interval,
        ..Default::default()
    };

    for window in times.windows(2) {
        let diff = window[1] - window[0];
        if diff == 0 {
            report.duplicates += 1;
        } else if diff > expected_interval {
            report.gaps += 1;
            report.missing_points += diff / expected_interval - 1;
            if report.largest_gap.map_or(true, |(widest, _)| diff > widest) {
                report.largest_gap = Some((diff, window[0]));
            }
        }
    }

    report
}

/// Log problems found in freshly loaded candles.
pub(crate) fn report_candles(candles: &[Candle]) {
    let invalid = candles.iter().filter(|c| !validate_candle(c)).count();
    if invalid > 0 {
        log::warn!("{} of {} candles have inconsistent OHLC values", invalid, candles.len());
    }

    let times: Vec<i64> = candles.iter().map(|c| c.time).collect();
    let report = analyze_time_gaps(&times);
    log::debug!(
        "Loaded {} candles: interval {}s, {} gaps ({} missing points), {} duplicate times",
        candles.len(),
        report.expected_interval,
        report.gaps,
        report.missing_points,
        report.duplicates
    );
    if let Some((width, start)) = report.largest_gap {
        log::debug!("Largest gap: {} seconds at timestamp {}", width, start);
    }
}
