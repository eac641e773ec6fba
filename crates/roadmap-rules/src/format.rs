/// Format `value` rounded to at most `decimals` places, without trailing
/// zeros: `25.0` → `25`, `1.50` → `1.5`.
pub fn format_number(value: f64, decimals: u8) -> String {
    let mut text = format!("{:.*}", usize::from(decimals), value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
