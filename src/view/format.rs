use chrono::DateTime;

/// `1234567` -> `"1,234,567"`.
pub fn count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Registration date as `Nov 20, 2002` (UTC), or `Unknown`.
pub fn date(unix_seconds: Option<i64>) -> String {
    unix_seconds
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .map(|at| at.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
