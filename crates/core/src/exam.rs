//! Exam countdown session.
//!
//! The session moves through `Setup -> Armed -> Running -> Stopped` and back
//! to `Setup` on reset. Which buttons and inputs are usable follows from the
//! phase alone, see [`ExamSession::controls`].

use tracing::{debug, info};

use crate::clock::{MS_PER_SECOND, format_hms, parse_field};
use crate::error::Error;
use crate::result::Result;

/// Lifecycle phase of an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExamPhase {
    /// Waiting for a duration.
    #[default]
    Setup,
    /// Duration set, not started yet.
    Armed,
    /// Countdown running.
    Running,
    /// Stopped by hand or because time ran out. Only reset leaves this phase.
    Stopped,
}

/// Enabled state of every exam control. `true` means usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub duration_inputs: bool,
    pub set_timer: bool,
    pub start: bool,
    pub stop: bool,
    pub reset: bool,
}

/// Name and free-form details shown once the exam starts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExamInfo {
    name: String,
    details: String,
}

impl ExamInfo {
    pub fn new(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Exam name, or a single space when none was entered.
    #[must_use]
    pub fn name_or_blank(&self) -> &str {
        or_blank(&self.name)
    }

    /// Exam details, or a single space when none were entered.
    #[must_use]
    pub fn details_or_blank(&self) -> &str {
        or_blank(&self.details)
    }
}

fn or_blank(value: &str) -> &str {
    if value.is_empty() { " " } else { value }
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown is not running; nothing changed.
    Idle,
    /// Time left after this tick.
    Remaining(u64),
    /// This tick consumed the last of the time. The session is now stopped.
    Finished,
}

/// Countdown state for one exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSession {
    phase: ExamPhase,
    remaining_ms: u64,
    info: Option<ExamInfo>,
    step_ms: u64,
}

impl Default for ExamSession {
    fn default() -> Self {
        Self::new(MS_PER_SECOND)
    }
}

impl ExamSession {
    /// New session whose countdown consumes `step_ms` per tick.
    #[must_use]
    pub const fn new(step_ms: u64) -> Self {
        Self {
            phase: ExamPhase::Setup,
            remaining_ms: 0,
            info: None,
            step_ms,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> ExamPhase {
        self.phase
    }

    #[must_use]
    pub const fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    #[must_use]
    pub const fn info(&self) -> Option<&ExamInfo> {
        self.info.as_ref()
    }

    /// Whether the exam has been started since the last reset.
    #[must_use]
    pub const fn has_started(&self) -> bool {
        matches!(self.phase, ExamPhase::Running | ExamPhase::Stopped)
    }

    /// Remaining time as `HH:MM:SS`.
    #[must_use]
    pub fn display(&self) -> String {
        format_hms(self.remaining_ms)
    }

    #[must_use]
    pub const fn controls(&self) -> Controls {
        match self.phase {
            ExamPhase::Setup => Controls {
                duration_inputs: true,
                set_timer: true,
                start: false,
                stop: false,
                reset: false,
            },
            ExamPhase::Armed => Controls {
                duration_inputs: false,
                set_timer: false,
                start: true,
                stop: false,
                reset: false,
            },
            ExamPhase::Running => Controls {
                duration_inputs: false,
                set_timer: false,
                start: false,
                stop: true,
                reset: false,
            },
            ExamPhase::Stopped => Controls {
                duration_inputs: false,
                set_timer: false,
                start: false,
                stop: false,
                reset: true,
            },
        }
    }

    /// Sets the exam length and arms the session. Returns the duration in ms.
    ///
    /// A zero duration is accepted; the session arms but [`Self::start`]
    /// will refuse to run it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDuration`] if the session is not in setup or
    /// the duration does not fit in a `u64` millisecond count.
    pub fn set_duration(&mut self, hours: u64, minutes: u64) -> Result<u64> {
        if self.phase != ExamPhase::Setup {
            return Err(Error::invalid_duration(format!(
                "duration can only be set during setup, exam is {:?}",
                self.phase
            )));
        }

        let total_ms = hours
            .checked_mul(3_600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|seconds| seconds.checked_mul(MS_PER_SECOND))
            .ok_or_else(|| {
                Error::invalid_duration(format!("{hours}h {minutes}m is out of range"))
            })?;

        self.remaining_ms = total_ms;
        self.phase = ExamPhase::Armed;
        info!(duration_ms = total_ms, "exam duration set");
        Ok(total_ms)
    }

    /// [`Self::set_duration`] from raw input text, parsed leniently.
    ///
    /// Signs are kept per field, so `-1` hours and `90` minutes is 30 minutes.
    /// A total below zero arms the session with no time on it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_duration`].
    pub fn set_duration_from_input(&mut self, hours: &str, minutes: &str) -> Result<u64> {
        let (hours, minutes) = (parse_field(hours), parse_field(minutes));
        let total_minutes = hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .ok_or_else(|| {
                Error::invalid_duration(format!("{hours}h {minutes}m is out of range"))
            })?;
        self.set_duration(0, u64::try_from(total_minutes).unwrap_or(0))
    }

    /// Starts the countdown. Returns the info to display, or `None` when the
    /// session is not armed or has no time on it.
    pub fn start(&mut self, info: ExamInfo) -> Option<&ExamInfo> {
        if self.phase != ExamPhase::Armed || self.remaining_ms == 0 {
            debug!(phase = ?self.phase, remaining_ms = self.remaining_ms, "start ignored");
            return None;
        }

        self.phase = ExamPhase::Running;
        info!(name = info.name_or_blank(), "exam started");
        self.info = Some(info);
        self.info.as_ref()
    }

    /// Consumes one step of the countdown.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != ExamPhase::Running {
            return TickOutcome::Idle;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(self.step_ms);
        if self.remaining_ms == 0 {
            self.phase = ExamPhase::Stopped;
            info!("exam time is over");
            TickOutcome::Finished
        } else {
            TickOutcome::Remaining(self.remaining_ms)
        }
    }

    /// Halts a running countdown. Returns false when nothing was running.
    pub fn stop(&mut self) -> bool {
        if self.phase != ExamPhase::Running {
            return false;
        }
        self.phase = ExamPhase::Stopped;
        info!(remaining_ms = self.remaining_ms, "exam stopped");
        true
    }

    /// Returns to setup with no time and no exam info.
    pub fn reset(&mut self) {
        self.phase = ExamPhase::Setup;
        self.remaining_ms = 0;
        self.info = None;
        info!("exam reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_controls() {
        let session = ExamSession::default();
        assert_eq!(session.phase(), ExamPhase::Setup);
        assert_eq!(session.display(), "00:00:00");
        let controls = session.controls();
        assert!(controls.duration_inputs && controls.set_timer);
        assert!(!controls.start && !controls.stop && !controls.reset);
    }

    #[test]
    fn test_set_duration_arms() -> Result<()> {
        let mut session = ExamSession::default();
        assert_eq!(session.set_duration_from_input("1", "30")?, 5_400_000);
        assert_eq!(session.phase(), ExamPhase::Armed);
        assert_eq!(session.display(), "01:30:00");
        assert!(session.controls().start);
        assert!(!session.controls().set_timer);
        Ok(())
    }

    #[test]
    fn test_set_duration_twice_rejected() -> Result<()> {
        let mut session = ExamSession::default();
        session.set_duration(0, 5)?;
        assert!(matches!(
            session.set_duration(0, 10),
            Err(Error::InvalidDuration { .. })
        ));
        assert_eq!(session.remaining_ms(), 300_000);
        Ok(())
    }

    #[test]
    fn test_set_duration_overflow_rejected() {
        let mut session = ExamSession::default();
        assert!(session.set_duration(u64::MAX, 0).is_err());
        assert_eq!(session.phase(), ExamPhase::Setup);
    }

    #[test]
    fn test_signed_fields_combine_like_the_inputs() -> Result<()> {
        let mut session = ExamSession::default();
        assert_eq!(session.set_duration_from_input("-1", "90")?, 1_800_000);
        assert_eq!(session.display(), "00:30:00");

        session.reset();
        assert_eq!(session.set_duration_from_input("0", "-5")?, 0);
        assert!(session.start(ExamInfo::default()).is_none());
        Ok(())
    }

    #[test]
    fn test_zero_duration_never_starts() -> Result<()> {
        let mut session = ExamSession::default();
        session.set_duration_from_input("", "abc")?;
        assert_eq!(session.phase(), ExamPhase::Armed);
        assert!(session.start(ExamInfo::default()).is_none());
        assert_eq!(session.phase(), ExamPhase::Armed);
        Ok(())
    }

    #[test]
    fn test_start_records_info() -> Result<()> {
        let mut session = ExamSession::default();
        session.set_duration(0, 1)?;
        let started = session.start(ExamInfo::new("Physics", ""));
        assert_eq!(started.map(ExamInfo::name_or_blank), Some("Physics"));
        assert_eq!(started.map(ExamInfo::details_or_blank), Some(" "));
        assert!(session.has_started());
        assert!(session.controls().stop);
        assert!(!session.controls().start);
        Ok(())
    }

    #[test]
    fn test_countdown_finishes() -> Result<()> {
        let mut session = ExamSession::default();
        session.set_duration(0, 0)?;
        assert_eq!(session.tick(), TickOutcome::Idle);

        let mut session = ExamSession::new(1_000);
        session.set_duration(0, 1)?;
        session.start(ExamInfo::default());
        for expected in (1..60).rev() {
            assert_eq!(session.tick(), TickOutcome::Remaining(expected * 1_000));
        }
        assert_eq!(session.tick(), TickOutcome::Finished);
        assert_eq!(session.phase(), ExamPhase::Stopped);
        assert_eq!(session.display(), "00:00:00");
        assert!(session.controls().reset);
        assert_eq!(session.tick(), TickOutcome::Idle);
        Ok(())
    }

    #[test]
    fn test_stop_then_reset() -> Result<()> {
        let mut session = ExamSession::default();
        session.set_duration(2, 0)?;
        session.start(ExamInfo::new("Maths", "Room 4"));
        let _ = session.tick();
        assert!(session.stop());
        assert!(!session.stop());
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.display(), "01:59:59");

        session.reset();
        assert_eq!(session, ExamSession::default());
        Ok(())
    }
}
