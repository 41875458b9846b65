//! Number rendering shared by console output and the Markdown report.
//!
//! Both surfaces go through these helpers so the same value always prints
//! the same way.

/// Bytes as kilobytes with two decimals, e.g. `"0.75 KB"`.
pub fn format_kb(bytes: f64) -> String {
    format!("{:.2} KB", bytes / 1024.0)
}

/// Kilobytes with an explicit `+` for growth.
pub fn format_kb_signed(bytes: f64) -> String {
    with_sign(bytes, format_kb(bytes))
}

/// A percentage with one decimal, e.g. `"25.0%"`.
pub fn format_percent(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Integer with `,` thousands separators, e.g. `"12,345"`.
pub fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_count_signed(n: i64) -> String {
    with_sign(n as f64, format_count(n))
}

/// Milliseconds below one second, seconds with two decimals above.
pub fn format_duration(ms: f64) -> String {
    let magnitude = ms.abs();
    let sign = if ms < 0.0 { "-" } else { "" };
    if magnitude < 1000.0 {
        format!("{}{:.0}ms", sign, magnitude)
    } else {
        format!("{}{:.2}s", sign, magnitude / 1000.0)
    }
}

pub fn format_duration_signed(ms: f64) -> String {
    with_sign(ms, format_duration(ms))
}

fn with_sign(value: f64, rendered: String) -> String {
    if value > 0.0 {
        format!("+{}", rendered)
    } else {
        rendered
    }
}
