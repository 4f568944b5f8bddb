//! Human-readable distance and duration strings for status panels.

/// `"850m"` below one kilometre, `"1.2km"` above.  Non-finite or negative
/// input renders as `"--"`.
pub fn format_distance(meters: f64) -> String {
    if !meters.is_finite() || meters < 0.0 {
        return "--".to_owned();
    }
    if meters < 1_000.0 {
        format!("{}m", meters.round() as u64)
    } else {
        format!("{:.1}km", meters / 1_000.0)
    }
}

/// `"45s"` under a minute, `"7min"` under an hour, `"1h 05min"` beyond.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--".to_owned();
    }
    let secs = seconds.round() as u64;
    if secs < 60 {
        return format!("{secs}s");
    }
    let minutes = (secs + 30) / 60; // nearest minute
    if minutes < 60 {
        format!("{minutes}min")
    } else {
        format!("{}h {:02}min", minutes / 60, minutes % 60)
    }
}
