//! Duration literal parsing for the `Before`/`After` predicates: a signed number followed by a
//! unit suffix (`ns`, `us`, `ms`, `s`, `m`, `h`).
//!
//! Grounded on `src/utils/time.rs::parse_time_offset`'s regex-based approach, simplified to this
//! spec's single `number+unit` literal (no compound `1h30m` offsets). Parsing only happens once
//! per `Before`/`After` call at compile time, so the regex is built fresh rather than cached.

use chrono::Duration;
use regex::Regex;

use crate::errors::CompileErrorKind;

/// Parse a duration literal like `-24h`, `24h`, `500ms` into a [`chrono::Duration`].
pub fn parse_duration(literal: &str) -> Result<Duration, CompileErrorKind> {
    let trimmed = literal.trim();
    let re = Regex::new(r"^([+-]?)(\d+)(ns|us|ms|s|m|h)$").expect("duration pattern is valid");

    let caps = re
        .captures(trimmed)
        .ok_or_else(|| CompileErrorKind::InvalidDuration(literal.to_string()))?;

    let sign: i64 = if caps.get(1).map(|m| m.as_str()) == Some("-") {
        -1
    } else {
        1
    };

    let amount: i64 = caps
        .get(2)
        .unwrap()
        .as_str()
        .parse()
        .map_err(|_| CompileErrorKind::InvalidDuration(literal.to_string()))?;

    let unit = caps.get(3).unwrap().as_str();
    let magnitude = match unit {
        "ns" => Duration::nanoseconds(amount),
        "us" => Duration::microseconds(amount),
        "ms" => Duration::milliseconds(amount),
        "s" => Duration::seconds(amount),
        "m" => Duration::minutes(amount),
        "h" => Duration::hours(amount),
        _ => unreachable!("unit is constrained by the regex alternation"),
    };

    Ok(if sign < 0 { -magnitude } else { magnitude })
}
