//! Number formatting for cards, tooltips and table cells.

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Dollar amount scaled to B/M/K with two decimals.
///
/// ```
/// use defi_dashboard::dashboard::format_number;
/// assert_eq!(format_number(1_500_000_000.0), "$1.50B");
/// assert_eq!(format_number(42.0), "$42.00");
/// ```
pub fn format_number(num: f64) -> String {
    if num >= BILLION {
        format!("${:.2}B", num / BILLION)
    } else if num >= MILLION {
        format!("${:.2}M", num / MILLION)
    } else if num >= THOUSAND {
        format!("${:.2}K", num / THOUSAND)
    } else {
        format!("${:.2}", num)
    }
}

/// Integer with comma thousands separators, e.g. `1,234,567`.
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Share of `total` as a one-decimal percentage; zero when `total` is zero.
pub fn format_share(value: f64, total: f64) -> String {
    let pct = if total == 0.0 { 0.0 } else { value / total * 100.0 };
    format!("{:.1}", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_thresholds() {
        assert_eq!(format_number(1_500_000_000.0), "$1.50B");
        assert_eq!(format_number(1_000_000_000.0), "$1.00B");
        assert_eq!(format_number(2_750_000.0), "$2.75M");
        assert_eq!(format_number(2_300.0), "$2.30K");
        assert_eq!(format_number(999.0), "$999.00");
        assert_eq!(format_number(42.0), "$42.00");
        assert_eq!(format_number(0.0), "$0.00");
    }

    #[test]
    fn test_format_number_just_below_threshold() {
        // stays in the lower unit even if it rounds up to 1000.00
        assert_eq!(format_number(999_999.0), "$1000.00K");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(-45_000), "-45,000");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(25.0, 100.0), "25.0");
        assert_eq!(format_share(1.0, 3.0), "33.3");
        assert_eq!(format_share(5.0, 0.0), "0.0");
    }
}
