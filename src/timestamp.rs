//! Labeled-substring extraction and time-code normalization for tool output.

use crate::error::ParseError;

/// Returns the text strictly between the first `left` marker and the next
/// `right` marker after it.
pub fn string_between<'a>(text: &'a str, left: &str, right: &str) -> Result<&'a str, ParseError> {
    let start = text.find(left).ok_or_else(|| missing(left))? + left.len();
    between_from(text, start, right)
}

/// Like [`string_between`], but anchored on the last occurrence of `left`.
///
/// Progress reports repeat their label, so the final value is the one that
/// describes the finished run.
pub fn last_string_between<'a>(
    text: &'a str,
    left: &str,
    right: &str,
) -> Result<&'a str, ParseError> {
    let start = text.rfind(left).ok_or_else(|| missing(left))? + left.len();
    between_from(text, start, right)
}

fn between_from<'a>(text: &'a str, start: usize, right: &str) -> Result<&'a str, ParseError> {
    let rest = &text[start..];
    let end = rest.find(right).ok_or_else(|| missing(right))?;
    Ok(&rest[..end])
}

fn missing(marker: &str) -> ParseError {
    ParseError::MissingMarker {
        marker: marker.to_string(),
    }
}

/// Parses either a plain second count (`45.2`) or a colon separated time code
/// (`SS`, `MM:SS`, `HH:MM:SS`, fields may be fractional) into seconds.
pub fn parse_time_to_seconds(raw: &str) -> Result<f64, ParseError> {
    let raw = raw.trim();
    if raw.contains(':') {
        return parse_hms_time(raw);
    }
    parse_component(raw, "seconds")
}

fn parse_hms_time(raw: &str) -> Result<f64, ParseError> {
    let parts: Vec<&str> = raw.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [s] => ("0", "0", *s),
        [m, s] => ("0", *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(ParseError::InvalidTimeCode(raw.to_string())),
    };

    let hours = parse_component(hours, "hours")?;
    let minutes = parse_component(minutes, "minutes")?;
    let seconds = parse_component(seconds, "seconds")?;
    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

fn parse_component(value: &str, component: &'static str) -> Result<f64, ParseError> {
    let value = value.trim();
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            component,
            value: value.to_string(),
        })
}
