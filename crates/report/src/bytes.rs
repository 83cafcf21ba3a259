//! Human-readable byte counts

const UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Format a byte count using binary magnitude steps.
///
/// Counts below 1024 render as plain bytes (`"0 B"`, `"512 B"`); larger
/// counts pick the largest unit keeping the mantissa in `[1, 1024)` and
/// render it with one decimal place (`"1.0 KiB"`). Negative input keeps its
/// sign and formats by magnitude. Deterministic, no locale dependence.
pub fn to_si(n: i64) -> String {
    let magnitude = n.unsigned_abs();
    let sign = if n < 0 { "-" } else { "" };

    if magnitude < 1024 {
        return format!("{}{} B", sign, magnitude);
    }

    let mut value = magnitude as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    // The early return above guarantees at least one division ran.
    format!("{}{:.1} {}", sign, value, UNITS[unit - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_bytes() {
        assert_eq!(to_si(0), "0 B");
        assert_eq!(to_si(1), "1 B");
        assert_eq!(to_si(1023), "1023 B");
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(to_si(1024), "1.0 KiB");
        assert_eq!(to_si(1536), "1.5 KiB");
        assert_eq!(to_si(1024 * 1024), "1.0 MiB");
        assert_eq!(to_si(1024 * 1024 * 1024), "1.0 GiB");
        assert_eq!(to_si(1024_i64.pow(4)), "1.0 TiB");
        assert_eq!(to_si(1024_i64.pow(5)), "1.0 PiB");
        assert_eq!(to_si(1024_i64.pow(6)), "1.0 EiB");
    }

    #[test]
    fn test_negative_keeps_sign() {
        assert_eq!(to_si(-1), "-1 B");
        assert_eq!(to_si(-1024), "-1.0 KiB");
    }

    #[test]
    fn test_extremes_do_not_panic() {
        assert_eq!(to_si(i64::MAX), "8.0 EiB");
        // i64::MIN has no positive counterpart; unsigned_abs covers it.
        assert_eq!(to_si(i64::MIN), "-8.0 EiB");
    }
}
