use rust_decimal::Decimal;

/// `0.72` -> `"72.0%"`
pub fn pct(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

/// `0.08` -> `"+8.0%"`, `-0.02` -> `"-2.0%"`
pub fn signed_pct(ratio: f64, decimals: usize) -> String {
    let value = ratio * 100.0;
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.*}%", sign, decimals, value)
}

/// Plain number with fixed decimals: `2.1` -> `"2.10"`
pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Quotes are shown with five decimals regardless of pip size
pub fn price(value: Decimal) -> String {
    format!("{:.5}", value)
}

/// Trailing number of an id such as `model-gen-7` or `evolution-7`
pub fn generation_label(id: &str) -> &str {
    id.rsplit('-').next().unwrap_or(id)
}

/// `EURUSD` -> `EUR/USD`
pub fn pair_label(symbol: &str) -> String {
    match (symbol.get(..3), symbol.get(3..)) {
        (Some(base), Some(quote)) if symbol.len() == 6 => format!("{}/{}", base, quote),
        _ => symbol.to_string(),
    }
}
