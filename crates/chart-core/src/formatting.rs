//! Display formatting helpers shared by the legend, tooltip and CLI output.

/// Format a dollar amount as `$1,234.56`.
///
/// Negative amounts render with a leading minus (`-$5.00`); they should not
/// occur for validated records but the formatter stays total.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let remainder = cents % 100;

    let mut whole = group_thousands(dollars);
    whole.push('.');
    whole.push_str(&format!("{remainder:02}"));

    if negative {
        format!("-${whole}")
    } else {
        format!("${whole}")
    }
}

/// Insert comma thousands separators into an integer.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_simple() {
        assert_eq!(format_currency(12.5), "$12.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(10.0), "$10.00");
    }

    #[test]
    fn test_format_currency_rounds_to_cents() {
        assert_eq!(format_currency(0.005), "$0.01");
        assert_eq!(format_currency(1.999), "$2.00");
    }

    #[test]
    fn test_format_currency_thousands() {
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-5.0), "-$5.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123456789), "123,456,789");
    }
}
