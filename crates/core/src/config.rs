//! Widget configuration.
//!
//! The page may embed a JSON object to override any of these values; every
//! field falls back to its default when omitted.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::result::Result;

/// Element ids the exam clock binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub digital_clock: String,
    pub digital_date: String,
    pub countdown_display: String,
    pub exam_hours: String,
    pub exam_minutes: String,
    pub exam_name: String,
    pub exam_info: String,
    pub set_timer_button: String,
    pub start_button: String,
    pub stop_button: String,
    pub reset_button: String,
    /// Optional stopwatch surface. Skipped when the page does not have it.
    pub elapsed_display: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            digital_clock: "digitalClock".to_string(),
            digital_date: "digitalDate".to_string(),
            countdown_display: "countdownDisplay".to_string(),
            exam_hours: "examHours".to_string(),
            exam_minutes: "examMinutesInput".to_string(),
            exam_name: "examNameInput".to_string(),
            exam_info: "examInfoInput".to_string(),
            set_timer_button: "setTimerBtn".to_string(),
            start_button: "startBtn".to_string(),
            stop_button: "stopBtn".to_string(),
            reset_button: "resetBtn".to_string(),
            elapsed_display: "elapsedDisplay".to_string(),
        }
    }
}

/// Configuration for the draggable container and the exam clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Selector of the container made draggable.
    #[serde(default = "default_container_selector")]
    pub container_selector: String,

    /// CSS class given to the generated resize handle.
    #[serde(default = "default_handle_class")]
    pub handle_class: String,

    /// Selector of the section that receives the exam info block.
    #[serde(default = "default_section_selector")]
    pub section_selector: String,

    #[serde(default)]
    pub ids: ElementIds,

    /// Stopwatch refresh interval in milliseconds.
    #[serde(default = "default_stopwatch_tick_ms")]
    pub stopwatch_tick_ms: u32,

    /// Countdown interval in milliseconds. Each tick consumes this much time.
    #[serde(default = "default_countdown_tick_ms")]
    pub countdown_tick_ms: u32,

    /// Wall-clock refresh interval in milliseconds.
    #[serde(default = "default_clock_tick_ms")]
    pub clock_tick_ms: u32,

    /// Message alerted when the countdown reaches zero.
    #[serde(default = "default_finished_message")]
    pub finished_message: String,

    /// Lower bound for the resize scale. Unset means unbounded.
    #[serde(default)]
    pub min_scale: Option<f64>,

    /// Maximum `tracing` level forwarded to the console.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            container_selector: default_container_selector(),
            handle_class: default_handle_class(),
            section_selector: default_section_selector(),
            ids: ElementIds::default(),
            stopwatch_tick_ms: default_stopwatch_tick_ms(),
            countdown_tick_ms: default_countdown_tick_ms(),
            clock_tick_ms: default_clock_tick_ms(),
            finished_message: default_finished_message(),
            min_scale: None,
            log_level: default_log_level(),
        }
    }
}

impl WidgetConfig {
    /// Parses and validates a JSON configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] for malformed JSON and
    /// [`Error::InvalidConfig`] when a value fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.container_selector.trim().is_empty() {
            return Err(Error::invalid_config("container_selector must not be empty"));
        }

        if self.handle_class.trim().is_empty() || self.handle_class.contains(char::is_whitespace)
        {
            return Err(Error::invalid_config(
                "handle_class must be a single non-empty class name",
            ));
        }

        if self.stopwatch_tick_ms == 0 || self.countdown_tick_ms == 0 || self.clock_tick_ms == 0 {
            return Err(Error::invalid_config("tick intervals must be greater than 0"));
        }

        match self.min_scale {
            Some(min_scale) if !(min_scale.is_finite() && min_scale > 0.0) => {
                return Err(Error::invalid_config(format!(
                    "min_scale must be a positive finite number, got {min_scale}"
                )));
            }
            _ => {}
        }

        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(Error::invalid_config(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }

        Ok(())
    }

    /// The configured log level. Falls back to `INFO` if unparsable.
    #[must_use]
    pub fn level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

fn default_container_selector() -> String {
    ".exam-timer-container".to_string()
}

fn default_handle_class() -> String {
    "resize-handle".to_string()
}

fn default_section_selector() -> String {
    ".right-section".to_string()
}

const fn default_stopwatch_tick_ms() -> u32 {
    10
}

const fn default_countdown_tick_ms() -> u32 {
    1_000
}

const fn default_clock_tick_ms() -> u32 {
    1_000
}

fn default_finished_message() -> String {
    "Exam time is over!".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
