//! Time formatting and the elapsed-time stopwatch.
//!
//! Every function here takes the current time as a millisecond timestamp from
//! the caller, so none of it depends on a real clock.

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1_000;

/// Formats a millisecond duration as `HH:MM:SS`.
///
/// Sub-second remainders are floored. Hours do not wrap at 24 and grow past
/// two digits when needed.
///
/// ```
/// use examboard_core::clock::format_hms;
///
/// assert_eq!(format_hms(0), "00:00:00");
/// assert_eq!(format_hms(5_400_999), "01:30:00");
/// ```
#[must_use]
pub fn format_hms(milliseconds: u64) -> String {
    let total_seconds = milliseconds / MS_PER_SECOND;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Lenient integer parsing for the duration inputs.
///
/// Leading whitespace is skipped, then an optional sign and the leading run of
/// digits are read. The sign is kept, so `-1` parses as `-1`. Anything that
/// yields no digits, or does not fit in an `i64`, counts as zero.
#[must_use]
pub fn parse_field(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
    let magnitude: i64 = digits.parse().unwrap_or(0);
    if negative { magnitude.saturating_neg() } else { magnitude }
}

/// A resumable stopwatch measuring elapsed milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stopwatch {
    started_at: Option<u64>,
    elapsed_ms: u64,
}

impl Stopwatch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            started_at: None,
            elapsed_ms: 0,
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Starts or resumes from the elapsed time already accumulated.
    /// Returns false when already running.
    pub const fn start(&mut self, now_ms: u64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now_ms.saturating_sub(self.elapsed_ms));
        true
    }

    /// Samples the elapsed time. While stopped this is the frozen value.
    pub const fn tick(&mut self, now_ms: u64) -> u64 {
        if let Some(started_at) = self.started_at {
            self.elapsed_ms = now_ms.saturating_sub(started_at);
        }
        self.elapsed_ms
    }

    /// Freezes the elapsed time at `now_ms`.
    pub const fn stop(&mut self, now_ms: u64) {
        let _ = self.tick(now_ms);
        self.started_at = None;
    }

    /// Stops and clears the elapsed time.
    pub const fn reset(&mut self) {
        self.started_at = None;
        self.elapsed_ms = 0;
    }

    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    #[must_use]
    pub fn display(&self) -> String {
        format_hms(self.elapsed_ms)
    }
}
