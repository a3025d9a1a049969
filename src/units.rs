//! Tick arithmetic and number formatting.

/// Discrete simulated time.
pub type Tick = u64;

/// Real-world duration of one tick, in seconds.
pub const TICK_SECONDS: f64 = 0.6;
/// Ticks in one minute.
pub const TICKS_PER_MINUTE: Tick = 100;
/// Ticks in one hour.
pub const TICKS_PER_HOUR: Tick = 60 * TICKS_PER_MINUTE;
/// Floor applied to the elapsed time of cumulative rates.
pub const MIN_ELAPSED_TICKS: Tick = TICKS_PER_MINUTE;

/// Convert whole seconds into ticks, rounding down.
pub fn seconds_to_ticks(seconds: u64) -> Tick {
    (seconds as f64 / TICK_SECONDS) as Tick
}

/// Convert ticks into whole seconds, rounding down.
pub fn ticks_to_seconds(ticks: Tick) -> u64 {
    (ticks as f64 * TICK_SECONDS) as u64
}

/// Format a tick count as `MM:SS`, or `H:MM:SS` past the hour.
pub fn ticks_to_time(ticks: Tick) -> String {
    let seconds = ticks_to_seconds(ticks);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    if hours > 0 {
        format!("{hours}:{:02}:{:02}", minutes % 60, seconds % 60)
    } else {
        format!("{:02}:{:02}", minutes % 60, seconds % 60)
    }
}

/// Long rate format: `69,420`, `1,200K`, `12M`.
pub fn format_long(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    if magnitude < 100_000 {
        format!("{sign}{}", group_thousands(magnitude))
    } else if magnitude < 10_000_000 {
        format!("{sign}{}K", group_thousands(magnitude / 1_000))
    } else {
        format!("{sign}{}M", group_thousands(magnitude / 1_000_000))
    }
}

/// Short rate format: `420`, `69K`, `1M`.
pub fn format_short(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    if magnitude < 1_000 {
        format!("{sign}{magnitude}")
    } else if magnitude < 1_000_000 {
        format!("{sign}{}K", group_thousands(magnitude / 1_000))
    } else {
        format!("{sign}{}M", group_thousands(magnitude / 1_000_000))
    }
}

fn group_thousands(value: u64) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_conversions_round_down() {
        assert_eq!(seconds_to_ticks(60), 100);
        assert_eq!(seconds_to_ticks(15), 25);
        assert_eq!(seconds_to_ticks(1), 1);
        assert_eq!(ticks_to_seconds(100), 60);
        assert_eq!(ticks_to_seconds(1), 0);
    }

    #[test]
    fn time_labels() {
        assert_eq!(ticks_to_time(0), "00:00");
        assert_eq!(ticks_to_time(100), "01:00");
        assert_eq!(ticks_to_time(6000), "1:00:00");
        assert_eq!(ticks_to_time(6125), "1:01:15");
    }

    #[test]
    fn long_format() {
        assert_eq!(format_long(0), "0");
        assert_eq!(format_long(69_420), "69,420");
        assert_eq!(format_long(1_200_000), "1,200K");
        assert_eq!(format_long(12_345_678), "12M");
        assert_eq!(format_long(-1_500), "-1,500");
    }

    #[test]
    fn short_format() {
        assert_eq!(format_short(420), "420");
        assert_eq!(format_short(69_420), "69K");
        assert_eq!(format_short(1_999_999), "1M");
        assert_eq!(format_short(2_500_000_000), "2,500M");
    }
}
