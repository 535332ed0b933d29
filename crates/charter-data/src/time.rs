//! Timestamp parsing for data files.

/// Timestamps above this are taken to be milliseconds.
const MILLIS_THRESHOLD: f64 = 1e12;

/// Normalize a numeric timestamp to unix seconds.
pub fn normalize_timestamp(ts: f64) -> i64 {
    if ts.abs() > MILLIS_THRESHOLD {
        (ts / 1000.0).floor() as i64
    } else {
        ts.floor() as i64
    }
}

/// Parse a unix timestamp (seconds or milliseconds) or a
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SSZ` UTC datetime.
pub fn parse_time(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(ts) = s.parse::<f64>() {
        return ts.is_finite().then(|| normalize_timestamp(ts));
    }

    let parts: Vec<&str> = s
        .trim_end_matches('Z')
        .split(['-', ' ', ':', 'T'])
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 3 {
        return None;
    }
    let year: i64 = parts[0].parse().ok()?;
    let month: usize = parts[1].parse().ok()?;
    let day: i64 = parts[2].parse().ok()?;
    let hour: i64 = parts.get(3).map_or(Some(0), |p| p.parse().ok())?;
    let min: i64 = parts.get(4).map_or(Some(0), |p| p.parse().ok())?;
    let sec: i64 = parts.get(5).map_or(Some(0), |p| p.split('.').next()?.parse().ok())?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || year < 1970 {
        return None;
    }

    let is_leap = |y: i64| y % 4 == 0 && (y % 100 != 0 || y % 400 == 0);

    // Days since Unix epoch (1970-01-01)
    let mut days: i64 = (1970..year).map(|y| if is_leap(y) { 366 } else { 365 }).sum();
    let month_days = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    days += month_days[month - 1];
    if month > 2 && is_leap(year) {
        days += 1;
    }
    days += day - 1;

    Some(days * 86400 + hour * 3600 + min * 60 + sec)
}
