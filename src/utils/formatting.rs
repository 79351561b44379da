//! Shared formatting utilities.

use std::time::Duration;

/// Format a number with thousand separators.
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<_> = s.chars().collect();
    let len = chars.len();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format a duration for display (e.g., "12.3s" or "1m 23.0s").
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor() as u64;
        let remaining_secs = secs - (mins as f64 * 60.0);
        format!("{}m {:.1}s", mins, remaining_secs)
    } else {
        format!("{:.1}s", secs)
    }
}

/// Tree prefix for item `index` of `len`.
pub fn tree_prefix(index: usize, len: usize) -> &'static str {
    if index + 1 == len {
        "\u{2514}\u{2500}"
    } else {
        "\u{251c}\u{2500}"
    }
}
