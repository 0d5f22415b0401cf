pub trait FormatDuration {
    /// `HH:MM:SS`, clamped at zero so a countdown never shows negative
    /// time.
    fn format_clock(&self) -> String;
}

impl FormatDuration for chrono::Duration {
    fn format_clock(&self) -> String {
        let secs = self.num_seconds().max(0);

        format!(
            "{:02}:{:02}:{:02}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::FormatDuration;
    use pretty_assertions::assert_eq;

    #[test]
    fn format_clock() {
        let duration = chrono::Duration::seconds(3 * 3600 + 25 * 60 + 7);
        assert_eq!(duration.format_clock(), "03:25:07");
    }

    #[test]
    fn format_clock_clamps_negative() {
        let duration = chrono::Duration::seconds(-42);
        assert_eq!(duration.format_clock(), "00:00:00");
    }
}
