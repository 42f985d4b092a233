// ddc-core/src/domain/schedule.rs

pub const DEFAULT_INTERVAL: &str = "24h";

/// Converts a five-field cron expression into an hourly check cadence.
///
/// Only the hour field is looked at: `*/N` gives `Nh`, `*` gives `1h`.
/// Any other pattern, or an expression that cannot be parsed, gives `24h`.
pub fn cron_to_interval(cron_expression: &str) -> String {
    let fields: Vec<&str> = cron_expression.split_whitespace().collect();
    if fields.len() != 5 {
        return DEFAULT_INTERVAL.to_string();
    }

    let hour = fields[1];
    if let Some(step) = hour.strip_prefix("*/") {
        return match step.parse::<u32>() {
            Ok(n) if n > 0 => format!("{}h", n),
            _ => DEFAULT_INTERVAL.to_string(),
        };
    }
    if hour == "*" {
        return "1h".to_string();
    }

    DEFAULT_INTERVAL.to_string()
}
