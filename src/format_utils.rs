//! Number formatting helpers matching the d3 formats the charts were built
//! around: `,d` (thousands separator), `,.3s` (SI suffix, three significant
//! digits) and `.2f` (fixed two decimals).

/// Thousands-separated integer, d3 `,d` style.
pub fn format_comma(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

/// SI-suffixed value with three significant digits, d3 `,.3s` style.
pub fn format_si(value: f64) -> String {
    if value == 0.0 {
        return "0.00".to_string();
    }
    let negative = value < 0.0;
    let mut v = value.abs();
    let suffixes = ["", "k", "M", "G", "T", "P"];
    let mut tier = 0usize;
    while v >= 1000.0 && tier < suffixes.len() - 1 {
        v /= 1000.0;
        tier += 1;
    }
    // three significant digits: 1.23, 12.3, 123
    let decimals = if v >= 100.0 {
        0
    } else if v >= 10.0 {
        1
    } else {
        2
    };
    let body = format!("{:.*}{}", decimals, v, suffixes[tier]);
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Fixed two-decimal float, d3 `.2f` style.
pub fn format_float(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_groups_of_three() {
        assert_eq!(format_comma(0), "0");
        assert_eq!(format_comma(999), "999");
        assert_eq!(format_comma(1000), "1,000");
        assert_eq!(format_comma(1234567), "1,234,567");
        assert_eq!(format_comma(-45678), "-45,678");
    }

    #[test]
    fn si_three_significant_digits() {
        assert_eq!(format_si(0.0), "0.00");
        assert_eq!(format_si(987.0), "987");
        assert_eq!(format_si(1234.0), "1.23k");
        assert_eq!(format_si(12345.0), "12.3k");
        assert_eq!(format_si(123456.0), "123k");
        assert_eq!(format_si(1234567.0), "1.23M");
    }

    #[test]
    fn float_fixed_decimals() {
        assert_eq!(format_float(3.14159), "3.14");
        assert_eq!(format_float(-0.5), "-0.50");
    }
}
