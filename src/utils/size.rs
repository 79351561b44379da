//! Human-readable byte sizes (`15GiB`, `500M`, `1_048_576`).
//!
//! Suffixes are binary multiples regardless of the `i`: `1G`, `1GB` and
//! `1GiB` all mean 2^30 bytes, which matches how storage quotas are
//! advertised for the free tiers this tool targets.

use crate::utils::error::GalpackError;
use regex::Regex;
use std::sync::LazyLock;

pub const KIB: u64 = 1024;
pub const MIB: u64 = KIB * 1024;
pub const GIB: u64 = MIB * 1024;
pub const TIB: u64 = GIB * 1024;

/// `<number>[.<fraction>] [unit]`, case-insensitive.
///
/// The pattern is a literal validated by the tests below.
static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(b|k|kb|kib|m|mb|mib|g|gb|gib|t|tb|tib)?\s*$")
        .expect("size pattern is invalid")
});

fn multiplier(unit: &str) -> u64 {
    match unit.to_ascii_lowercase().chars().next() {
        Some('k') => KIB,
        Some('m') => MIB,
        Some('g') => GIB,
        Some('t') => TIB,
        _ => 1,
    }
}

/// Parse a byte size such as `15GiB`, `2.5G` or `1048576`.
pub fn parse_size(input: &str) -> Result<u64, GalpackError> {
    let cleaned = input.replace('_', "");
    let caps = SIZE_PATTERN
        .captures(&cleaned)
        .ok_or_else(|| GalpackError::InvalidSize {
            input: input.to_string(),
            reason: "expected a number with an optional unit (B, K, M, G, T)".to_string(),
        })?;

    let number = caps.get(1).map_or("", |m| m.as_str());
    let unit = caps.get(2).map_or("b", |m| m.as_str());
    let mult = multiplier(unit);

    if let Ok(whole) = number.parse::<u64>() {
        return whole.checked_mul(mult).ok_or_else(|| GalpackError::InvalidSize {
            input: input.to_string(),
            reason: "value does not fit in 64 bits".to_string(),
        });
    }

    let fractional: f64 = number.parse().map_err(|_| GalpackError::InvalidSize {
        input: input.to_string(),
        reason: format!("'{number}' is not a number"),
    })?;
    let bytes = (fractional * mult as f64).round();
    if bytes >= u64::MAX as f64 {
        return Err(GalpackError::InvalidSize {
            input: input.to_string(),
            reason: "value does not fit in 64 bits".to_string(),
        });
    }
    Ok(bytes as u64)
}

/// Format bytes as gigabytes with three decimals (`14.998GB`).
pub fn format_gb(bytes: u64) -> String {
    format!("{:.3}GB", bytes as f64 / GIB as f64)
}

/// Format a byte count with the largest fitting binary unit (`3.2 KB`).
pub fn format_size(bytes: u64) -> String {
    if bytes >= GIB {
        format!("{:.1} GB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_bytes() {
        assert_eq!(parse_size("0").unwrap(), 0);
        assert_eq!(parse_size("1024").unwrap(), 1024);
        assert_eq!(parse_size("1_048_576").unwrap(), MIB);
        assert_eq!(parse_size("  42 B ").unwrap(), 42);
    }

    #[test]
    fn test_parse_units_case_insensitive() {
        assert_eq!(parse_size("1k").unwrap(), KIB);
        assert_eq!(parse_size("1KB").unwrap(), KIB);
        assert_eq!(parse_size("1KiB").unwrap(), KIB);
        assert_eq!(parse_size("500M").unwrap(), 500 * MIB);
        assert_eq!(parse_size("15GiB").unwrap(), 15 * GIB);
        assert_eq!(parse_size("15 gb").unwrap(), 15 * GIB);
        assert_eq!(parse_size("2T").unwrap(), 2 * TIB);
    }

    #[test]
    fn test_parse_fractional() {
        assert_eq!(parse_size("1.5K").unwrap(), 1536);
        assert_eq!(parse_size("0.5GiB").unwrap(), GIB / 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("-5").is_err());
        assert!(parse_size("10 parsecs").is_err());
    }

    #[test]
    fn test_parse_overflow() {
        assert!(parse_size("99999999999T").is_err());
    }

    #[test]
    fn test_format_gb() {
        assert_eq!(format_gb(0), "0.000GB");
        assert_eq!(format_gb(15 * GIB), "15.000GB");
        assert_eq!(format_gb(GIB / 2), "0.500GB");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(3276), "3.2 KB");
        assert_eq!(format_size(2_621_440), "2.5 MB");
        assert_eq!(format_size(15 * GIB), "15.0 GB");
    }
}
