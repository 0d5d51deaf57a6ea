const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Humanize a byte count: "0 bytes", "47.83 KB", "100 MB", "8 GB".
///
/// GB is the largest unit, and the tier thresholds are strictly greater-than,
/// so exactly 1024^3 bytes renders as "1024 MB". Scaled values are rounded to
/// two decimals with trailing zeros trimmed.
pub fn bytes_to_string(bytes: u64) -> String {
    let v = bytes as f64;
    if v > GB {
        format!("{} GB", trim_round(v / GB))
    } else if v > MB {
        format!("{} MB", trim_round(v / MB))
    } else if v > KB {
        format!("{} KB", trim_round(v / KB))
    } else {
        format!("{} bytes", bytes)
    }
}

/// Parse a human byte amount: "100 MB", "1.5GB", "512 kb", bare "1024".
///
/// Bare numbers are bytes. Returns None for empty input, malformed numbers,
/// or unknown suffixes; callers fall back to their defaults.
pub fn bytes_from_string(s: &str) -> Option<u64> {
    let s = s.trim();
    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (number, suffix) = s.split_at(split);
    let number: f64 = number.parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    let multiplier = match suffix.trim().to_lowercase().as_str() {
        "" | "b" | "bytes" => 1.0,
        "kb" => KB,
        "mb" => MB,
        "gb" => GB,
        _ => return None,
    };
    Some((number * multiplier).round() as u64)
}

/// "part of whole" as a percent string: "0%", "15.51%".
pub fn percent_string(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "0%".to_string();
    }
    format!("{}%", trim_round(part as f64 / whole as f64 * 100.0))
}

fn trim_round(v: f64) -> String {
    let s = format!("{:.2}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
