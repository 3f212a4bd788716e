// ---------------------------------------------------------------------------
// Number formatting for metric cards and table cells
// ---------------------------------------------------------------------------

/// `$` followed by the rounded amount with comma thousands separators.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let digits = group_thousands(rounded.abs() as u64, ',');
    if rounded < 0.0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Record count with dot thousands separators (`12.345`).
pub fn format_count(n: usize) -> String {
    group_thousands(n as u64, '.')
}

fn group_thousands(n: u64, sep: char) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_groups_and_rounds() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(1_234_567.5), "$1,234,568");
        assert_eq!(format_usd(100_000.0), "$100,000");
        assert_eq!(format_usd(-2_500.0), "-$2,500");
    }

    #[test]
    fn counts_use_dots() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.000");
        assert_eq!(format_count(133_349), "133.349");
    }
}
