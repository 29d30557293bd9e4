/// Format an amount as a dollar string with exactly two decimals.
/// Example: 42.5 -> "$42.50", -5.0 -> "$-5.00", 0.125 -> "$0.13"
pub fn format_money(amount: f64) -> String {
    format!("${}", format_amount(amount))
}

/// Two-decimal rendering used for display and export. Exact half-cent ties
/// round away from zero; everything else rounds to the nearest cent.
/// Example: 6.125 -> "6.13", -0.375 -> "-0.38", 19.499 -> "19.50"
pub fn format_amount(amount: f64) -> String {
    // -0.0 would otherwise print as "-0.00"
    let amount = if amount == 0.0 { 0.0 } else { amount };
    let abs = amount.abs();

    // A double sits exactly on a half cent only when it is an odd multiple
    // of 1/8 (0.125, 0.375, ...). `{:.2}` would round those to even.
    let eighths = abs * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let cents = (abs * 100.0).ceil();
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{:.2}", sign, cents / 100.0);
    }

    format!("{:.2}", amount)
}

/// Parse a user-typed number. Surrounding whitespace is ignored; empty input
/// and anything that is not a finite number yield `None`.
/// Example: " 12.5 " -> Some(12.5), "abc" -> None, "inf" -> None
pub fn parse_amount(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    input.parse::<f64>().ok().filter(|value| value.is_finite())
}
