// ---------------------------------------------------------------------------
// Number formatting for KPI cards, tooltips and tables
// ---------------------------------------------------------------------------

/// Group an integer string's digits in threes: `"1234567"` → `"1,234,567"`.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn count(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// `$12,345.67`
pub fn currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Currency, or `n/a` when there was nothing to average.
pub fn mean(value: Option<f64>) -> String {
    value.map(currency).unwrap_or_else(|| "n/a".to_string())
}
