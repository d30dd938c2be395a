//! Human-readable size formatting for listing display.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count for display: `0 Bytes`, then the largest fitting
/// unit with up to two decimals, trailing zeros trimmed (`1.5 KB`,
/// `2 MB`).
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let mut text = format!("{value:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{text} {}", UNITS[exponent as usize])
}
