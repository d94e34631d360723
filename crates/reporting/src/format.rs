//! Display formatting for report fields. All rounding and string
//! shaping lives here, downstream of the engine.

/// Format an amount as currency with thousands separators ("$1,234.50").
pub fn format_currency(amount: f64) -> String {
    format!("${}", group_thousands(&format!("{amount:.2}")))
}

/// Format a count with thousands separators ("1,234").
pub fn format_number(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a decimal fraction as a percentage ("2.50%").
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a ROAS value as a spend multiple ("3.20x").
pub fn format_roas(value: f64) -> String {
    format!("{value:.2}x")
}

/// Format a performance score out of 100 ("85/100").
pub fn format_score(value: f64) -> String {
    format!("{value:.0}/100")
}

fn group_thousands(formatted: &str) -> String {
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(50.5), "$50.50");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-1234.5), "$-1,234.50");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(12_345_678), "12,345,678");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.025), "2.50%");
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(1.0), "100.00%");
    }

    #[test]
    fn test_format_roas_and_score() {
        assert_eq!(format_roas(3.2), "3.20x");
        assert_eq!(format_roas(0.0), "0.00x");
        assert_eq!(format_score(85.0), "85/100");
        assert_eq!(format_score(100.0), "100/100");
    }
}
