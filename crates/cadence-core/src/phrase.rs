//! Display and speech formatting for durations.

/// `MM:SS` clock face, minutes padded to two digits.
pub fn format_clock(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Duration as a spoken phrase: "2 minutes 30 seconds", "1 minute",
/// "45 seconds".
pub fn spoken_duration(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    match (minutes, seconds) {
        (0, s) => format!("{s} {}", plural(s, "second")),
        (m, 0) => format!("{m} {}", plural(m, "minute")),
        (m, s) => format!(
            "{m} {} {s} {}",
            plural(m, "minute"),
            plural(s, "second")
        ),
    }
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_face_pads_both_fields() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(3725), "62:05");
    }

    #[test]
    fn spoken_durations() {
        assert_eq!(spoken_duration(0), "0 seconds");
        assert_eq!(spoken_duration(1), "1 second");
        assert_eq!(spoken_duration(45), "45 seconds");
        assert_eq!(spoken_duration(60), "1 minute");
        assert_eq!(spoken_duration(150), "2 minutes 30 seconds");
        assert_eq!(spoken_duration(61), "1 minute 1 second");
    }
}
