// Human duration strings such as `25m`, `1h30m` or `1.5h`.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("duration is empty")]
    Empty,
    #[error("missing unit after {0:?}")]
    MissingUnit(String),
    #[error("unknown unit {0:?}")]
    UnknownUnit(String),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<f64> {
    let nanos = match unit {
        "ns" => 1.0,
        "us" | "µs" => 1_000.0,
        "ms" => 1_000_000.0,
        "s" => 1_000_000_000.0,
        "m" => 60.0 * 1_000_000_000.0,
        "h" => 3_600.0 * 1_000_000_000.0,
        _ => return None,
    };
    Some(nanos)
}

/// Parse a sequence of `<number><unit>` pairs, e.g. `25m`, `1h15m`, `90s`.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DurationError::Empty);
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    if s.is_empty() {
        return Err(DurationError::InvalidNumber(input.trim().to_string()));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total_nanos = 0.0_f64;
    let mut rest = s;

    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (num, tail) = rest.split_at(num_len);
        if num.is_empty() {
            return Err(DurationError::InvalidNumber(rest.to_string()));
        }
        let value: f64 = num
            .parse()
            .map_err(|_| DurationError::InvalidNumber(num.to_string()))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(num.to_string()));
        }
        let scale =
            unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        total_nanos += value * scale;
        rest = next;
    }

    let total_nanos = total_nanos.round();
    if !total_nanos.is_finite() || total_nanos >= u64::MAX as f64 {
        return Err(DurationError::Overflow(input.trim().to_string()));
    }
    Ok(Duration::from_nanos(total_nanos as u64))
}

/// Parse `input`, substituting `fallback` when it is malformed or zero.
pub fn parse_or(input: &str, fallback: Duration) -> Duration {
    match parse_duration(input) {
        Ok(d) if !d.is_zero() => d,
        Ok(_) => {
            tracing::warn!(input, ?fallback, "zero duration, using fallback");
            fallback
        }
        Err(err) => {
            tracing::warn!(input, %err, ?fallback, "unparseable duration, using fallback");
            fallback
        }
    }
}

/// Render a countdown as `MM:SS`, or `H:MM:SS` once it reaches an hour.
/// Partial seconds round up so the clock never shows `00:00` early.
pub fn format_clock(d: Duration) -> String {
    let mut secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs += 1;
    }
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Short human form used in logs and the config file, e.g. `25m`, `1h5m`, `1.5s`.
pub fn format_short(d: Duration) -> String {
    if d.subsec_nanos() != 0 {
        if d.as_secs() == 0 {
            return format!("{}ms", d.as_millis());
        }
        return format!("{}s", d.as_secs_f64());
    }
    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    let mut out = String::new();
    if h > 0 {
        out.push_str(&format!("{h}h"));
    }
    if m > 0 {
        out.push_str(&format!("{m}m"));
    }
    if s > 0 || out.is_empty() {
        out.push_str(&format!("{s}s"));
    }
    out
}
