//! InfluxDB line protocol rendering.
//!
//! `measurement,tag=value,... field=value,... timestamp`

use crate::entry::TimeSeriesEntry;

/// Render one entry, or `None` if it has no writable field.
///
/// Tags with empty values are omitted (InfluxDB rejects them), as are
/// non-finite field values. `timestamp` is in nanoseconds; without one the
/// server assigns its own time.
pub fn render_line(entry: &TimeSeriesEntry, timestamp: Option<i64>) -> Option<String> {
    let fields: Vec<String> = entry
        .fields
        .iter()
        .filter(|(_, value)| value.is_finite())
        .map(|(key, value)| format!("{}={}", escape_key(key), value))
        .collect();

    if fields.is_empty() {
        return None;
    }

    let mut line = escape_measurement(&entry.measurement);
    for (key, value) in entry.tags.iter().filter(|(_, v)| !v.is_empty()) {
        line.push(',');
        line.push_str(&escape_key(key));
        line.push('=');
        line.push_str(&escape_key(value));
    }
    line.push(' ');
    line.push_str(&fields.join(","));

    if let Some(ts) = timestamp {
        line.push(' ');
        line.push_str(&ts.to_string());
    }

    Some(line)
}

/// Render a batch as a newline-separated request body.
pub fn render_batch(entries: &[TimeSeriesEntry], timestamp: Option<i64>) -> String {
    entries
        .iter()
        .filter_map(|entry| render_line(entry, timestamp))
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_measurement(s: &str) -> String {
    escape(s, &[',', ' '])
}

/// Tag keys, tag values and field keys escape commas, equals signs, spaces
/// and backslashes.
fn escape_key(s: &str) -> String {
    escape(s, &[',', '=', ' ', '\\'])
}

/// Line breaks end a line in the protocol, so they become spaces.
fn escape(s: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let c = if matches!(c, '\n' | '\r') { ' ' } else { c };
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
