/// Rounds `value` to `places` decimal places, halves away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Converts a grade with at most `places` decimals into whole units of
/// `10^-places`.
pub fn to_scaled(grade: f64, places: u32) -> i64 {
    (grade * 10f64.powi(places as i32)).round() as i64
}

/// Mean of non-negative values given in units of `10^-places`, rounded
/// half-up to two decimals. Integer arithmetic keeps the rounding exact.
/// Returns 0.0 for empty input.
pub fn mean_scaled(values: &[i64], places: u32) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: i64 = values.iter().sum();
    let numerator = sum * 100;
    let denominator = values.len() as i64 * 10i64.pow(places);
    let hundredths = (2 * numerator + denominator) / (2 * denominator);
    hundredths as f64 / 100.0
}

/// Formats a grade for display without trailing zeros: `90`, `95.5`, `72.25`.
pub fn format_grade(grade: f64) -> String {
    let fixed = format!("{:.2}", grade);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
