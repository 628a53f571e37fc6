//! Exam clock widget: wall clock, countdown and elapsed stopwatch.
//!
//! The page provides the elements; this module binds the four buttons to an
//! [`ExamSession`] and keeps the displays and enabled states in sync with it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use examboard_core::clock::Stopwatch;
use examboard_core::exam::TickOutcome;
use examboard_core::{ExamInfo, ExamSession, ResultExt, WidgetConfig};
use gloo_events::EventListener;
use gloo_timers::callback::{Interval, Timeout};
use tracing::{info, warn};
use wasm_bindgen::JsValue;
use web_sys::{Document, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

use crate::dom;
use crate::error::{Result, UiError};

const EXAM_STARTED_CLASS: &str = "exam-started";
const EXAM_INFO_CLASS: &str = "exam-info";

/// Every element the exam clock reads or writes.
#[derive(Debug)]
struct Elements {
    digital_clock: HtmlElement,
    digital_date: HtmlElement,
    countdown: HtmlElement,
    elapsed: Option<HtmlElement>,
    hours: HtmlInputElement,
    minutes: HtmlInputElement,
    name: HtmlInputElement,
    details: HtmlInputElement,
    set_timer: HtmlButtonElement,
    start: HtmlButtonElement,
    stop: HtmlButtonElement,
    reset: HtmlButtonElement,
    section: HtmlElement,
}

impl Elements {
    fn locate(document: &Document, config: &WidgetConfig) -> Result<Self> {
        let ids = &config.ids;
        let text = "an HTML element";
        let input = "an input element";
        let button = "a button element";

        Ok(Self {
            digital_clock: dom::by_id(document, &ids.digital_clock, text)?,
            digital_date: dom::by_id(document, &ids.digital_date, text)?,
            countdown: dom::by_id(document, &ids.countdown_display, text)?,
            elapsed: dom::optional_by_id(document, &ids.elapsed_display, text)?,
            hours: dom::by_id(document, &ids.exam_hours, input)?,
            minutes: dom::by_id(document, &ids.exam_minutes, input)?,
            name: dom::by_id(document, &ids.exam_name, input)?,
            details: dom::by_id(document, &ids.exam_info, input)?,
            set_timer: dom::by_id(document, &ids.set_timer_button, button)?,
            start: dom::by_id(document, &ids.start_button, button)?,
            stop: dom::by_id(document, &ids.stop_button, button)?,
            reset: dom::by_id(document, &ids.reset_button, button)?,
            section: dom::query(document, &config.section_selector)?,
        })
    }
}

/// Shared widget state. Timers hold it weakly, listeners strongly.
#[derive(Debug)]
struct ClockState {
    window: Window,
    document: Document,
    elements: Elements,
    session: RefCell<ExamSession>,
    stopwatch: RefCell<Stopwatch>,
    countdown_timer: RefCell<Option<Interval>>,
    stopwatch_timer: RefCell<Option<Interval>>,
    config: WidgetConfig,
}

/// The mounted exam clock. Dropping it stops every timer and listener.
#[derive(Debug)]
pub struct ExamClock {
    state: Rc<ClockState>,
    listeners: Vec<EventListener>,
    _wall_clock: Interval,
}

impl ExamClock {
    /// Binds to the page's exam clock elements and starts the wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ElementNotFound`] or [`UiError::WrongElementType`]
    /// if a required element is missing or of the wrong kind.
    pub fn mount(window: &Window, document: &Document, config: &WidgetConfig) -> Result<Self> {
        let elements = Elements::locate(document, config)?;
        let session = ExamSession::new(u64::from(config.countdown_tick_ms));

        let state = Rc::new(ClockState {
            window: window.clone(),
            document: document.clone(),
            elements,
            session: RefCell::new(session),
            stopwatch: RefCell::new(Stopwatch::new()),
            countdown_timer: RefCell::new(None),
            stopwatch_timer: RefCell::new(None),
            config: config.clone(),
        });

        state.render_controls();
        state.render_wall_clock().into_option_logged();

        let wall_clock = {
            let weak = Rc::downgrade(&state);
            Interval::new(config.clock_tick_ms, move || {
                if let Some(state) = weak.upgrade() {
                    state.render_wall_clock().into_option_logged();
                }
            })
        };

        let listeners = vec![
            bind_click(&state, &state.elements.set_timer, ClockState::set_duration),
            bind_click(&state, &state.elements.start, ClockState::start_exam),
            bind_click(&state, &state.elements.stop, ClockState::stop_exam),
            bind_click(&state, &state.elements.reset, ClockState::reset_exam),
        ];

        info!("exam clock mounted");
        Ok(Self {
            state,
            listeners,
            _wall_clock: wall_clock,
        })
    }

    /// Snapshot of the exam session.
    #[must_use]
    pub fn session(&self) -> ExamSession {
        self.state.session.borrow().clone()
    }

    /// Sets the duration from the hour and minute inputs.
    pub fn set_duration(&self) {
        self.state.set_duration();
    }

    pub fn start(&self) {
        self.state.start_exam();
    }

    pub fn stop(&self) {
        self.state.stop_exam();
    }

    pub fn reset(&self) {
        self.state.reset_exam();
    }
}

fn bind_click(
    state: &Rc<ClockState>,
    button: &HtmlButtonElement,
    action: fn(&Rc<ClockState>),
) -> EventListener {
    let state = Rc::clone(state);
    EventListener::new(button, "click", move |_event: &Event| action(&state))
}

impl ClockState {
    fn set_duration(self: &Rc<Self>) {
        let hours = self.elements.hours.value();
        let minutes = self.elements.minutes.value();
        let set = self
            .session
            .borrow_mut()
            .set_duration_from_input(&hours, &minutes);

        if set.into_option_logged().is_some() {
            self.render_countdown();
            self.render_controls();
        }
    }

    fn start_exam(self: &Rc<Self>) {
        let info = ExamInfo::new(self.elements.name.value(), self.elements.details.value());
        let started = self.session.borrow_mut().start(info).cloned();
        let Some(info) = started else {
            return;
        };

        self.show_exam_info(&info).into_option_logged();
        self.render_controls();

        let countdown = {
            let weak = Rc::downgrade(self);
            Interval::new(self.config.countdown_tick_ms, move || on_countdown_tick(&weak))
        };
        *self.countdown_timer.borrow_mut() = Some(countdown);
        self.start_stopwatch();
    }

    fn stop_exam(self: &Rc<Self>) {
        if self.session.borrow_mut().stop() {
            self.halt_timers();
            self.render_controls();
        }
    }

    fn reset_exam(self: &Rc<Self>) {
        self.halt_timers();
        self.session.borrow_mut().reset();
        self.stopwatch.borrow_mut().reset();

        self.hide_exam_info().into_option_logged();
        for input in [
            &self.elements.hours,
            &self.elements.minutes,
            &self.elements.name,
            &self.elements.details,
        ] {
            input.set_value("");
        }
        self.render_countdown();
        self.render_elapsed();
        self.render_controls();
    }

    fn finish_exam(self: &Rc<Self>) {
        // Called from inside the countdown interval, which must not be
        // dropped while it is running.
        let countdown = self.countdown_timer.borrow_mut().take();
        let _ = Timeout::new(0, move || drop(countdown)).forget();
        self.stop_stopwatch();
        self.render_controls();

        if let Err(e) = self
            .window
            .alert_with_message(&self.config.finished_message)
        {
            warn!("alert failed: {e:?}");
        }
    }

    fn halt_timers(&self) {
        self.countdown_timer.borrow_mut().take();
        self.stop_stopwatch();
    }

    fn start_stopwatch(self: &Rc<Self>) {
        if self.elements.elapsed.is_none() {
            return;
        }
        self.stopwatch.borrow_mut().start(dom::now_ms());

        let weak = Rc::downgrade(self);
        let timer = Interval::new(self.config.stopwatch_tick_ms, move || {
            if let Some(state) = weak.upgrade() {
                state.stopwatch.borrow_mut().tick(dom::now_ms());
                state.render_elapsed();
            }
        });
        *self.stopwatch_timer.borrow_mut() = Some(timer);
    }

    fn stop_stopwatch(&self) {
        self.stopwatch_timer.borrow_mut().take();
        self.stopwatch.borrow_mut().stop(dom::now_ms());
        self.render_elapsed();
    }

    fn show_exam_info(&self, info: &ExamInfo) -> Result<()> {
        let section = &self.elements.section;
        section
            .class_list()
            .add_1(EXAM_STARTED_CLASS)
            .map_err(|e| UiError::dom("classList.add", &e))?;

        let block = dom::create_div(&self.document, EXAM_INFO_CLASS)?;
        for line in [info.name_or_blank(), info.details_or_blank()] {
            let row = dom::create_div(&self.document, "")?;
            row.set_text_content(Some(line));
            block
                .append_child(&row)
                .map_err(|e| UiError::dom("appendChild", &e))?;
        }

        section
            .insert_before(&block, section.first_child().as_ref())
            .map_err(|e| UiError::dom("insertBefore", &e))?;
        Ok(())
    }

    fn hide_exam_info(&self) -> Result<()> {
        let section = &self.elements.section;
        section
            .class_list()
            .remove_1(EXAM_STARTED_CLASS)
            .map_err(|e| UiError::dom("classList.remove", &e))?;

        let selector = format!(".{EXAM_INFO_CLASS}");
        if let Some(block) = section
            .query_selector(&selector)
            .map_err(|e| UiError::dom("querySelector", &e))?
        {
            block.remove();
        }
        Ok(())
    }

    fn render_countdown(&self) {
        let text = self.session.borrow().display();
        self.elements.countdown.set_text_content(Some(&text));
    }

    fn render_elapsed(&self) {
        if let Some(elapsed) = &self.elements.elapsed {
            let text = self.stopwatch.borrow().display();
            elapsed.set_text_content(Some(&text));
        }
    }

    fn render_controls(&self) {
        let controls = self.session.borrow().controls();
        let e = &self.elements;
        e.hours.set_disabled(!controls.duration_inputs);
        e.minutes.set_disabled(!controls.duration_inputs);
        e.set_timer.set_disabled(!controls.set_timer);
        e.start.set_disabled(!controls.start);
        e.stop.set_disabled(!controls.stop);
        e.reset.set_disabled(!controls.reset);
    }

    fn render_wall_clock(&self) -> Result<()> {
        let now = js_sys::Date::new_0();
        let time = now.to_locale_time_string("default");
        self.elements
            .digital_clock
            .set_text_content(Some(&String::from(time)));

        let options = js_sys::Object::new();
        for (key, value) in [
            ("weekday", "long"),
            ("year", "numeric"),
            ("month", "long"),
            ("day", "numeric"),
        ] {
            js_sys::Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value))
                .map_err(|e| UiError::dom("Reflect.set", &e))?;
        }
        let date = now.to_locale_date_string("default", &options);
        self.elements
            .digital_date
            .set_text_content(Some(&String::from(date)));
        Ok(())
    }
}

fn on_countdown_tick(weak: &Weak<ClockState>) {
    let Some(state) = weak.upgrade() else {
        return;
    };

    let outcome = state.session.borrow_mut().tick();
    match outcome {
        TickOutcome::Idle => {}
        TickOutcome::Remaining(_) => state.render_countdown(),
        TickOutcome::Finished => {
            state.render_countdown();
            state.finish_exam();
        }
    }
}

impl Drop for ExamClock {
    fn drop(&mut self) {
        self.listeners.clear();
        self.state.halt_timers();
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use examboard_core::ExamPhase;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const FIXTURE: &str = r#"
        <div id="digitalClock"></div>
        <div id="digitalDate"></div>
        <div class="right-section">
            <div id="countdownDisplay">00:00:00</div>
            <div id="elapsedDisplay">00:00:00</div>
            <input id="examHours">
            <input id="examMinutesInput">
            <input id="examNameInput">
            <input id="examInfoInput">
            <button id="setTimerBtn"></button>
            <button id="startBtn" disabled></button>
            <button id="stopBtn" disabled></button>
            <button id="resetBtn" disabled></button>
        </div>
    "#;

    fn fixture(document: &Document) -> HtmlElement {
        let root = dom::create_div(document, "exam-fixture").unwrap();
        root.set_inner_html(FIXTURE);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn input(document: &Document, id: &str) -> HtmlInputElement {
        dom::by_id(document, id, "an input element").unwrap()
    }

    fn button(document: &Document, id: &str) -> HtmlButtonElement {
        dom::by_id(document, id, "a button element").unwrap()
    }

    #[wasm_bindgen_test]
    fn test_missing_element_aborts_mount() -> Result<()> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let result = ExamClock::mount(&window, &document, &WidgetConfig::default());
        assert!(matches!(result, Err(UiError::ElementNotFound { .. })));
        Ok(())
    }

    #[wasm_bindgen_test]
    fn test_set_start_stop_reset_cycle() -> Result<()> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let root = fixture(&document);
        let clock = ExamClock::mount(&window, &document, &WidgetConfig::default())?;

        input(&document, "examHours").set_value("1");
        input(&document, "examMinutesInput").set_value("30");
        input(&document, "examNameInput").set_value("Physics");
        button(&document, "setTimerBtn").click();

        assert_eq!(clock.session().phase(), ExamPhase::Armed);
        let countdown: HtmlElement = dom::by_id(&document, "countdownDisplay", "").unwrap();
        assert_eq!(countdown.text_content().as_deref(), Some("01:30:00"));
        assert!(!button(&document, "startBtn").disabled());
        assert!(input(&document, "examHours").disabled());

        button(&document, "startBtn").click();
        assert_eq!(clock.session().phase(), ExamPhase::Running);
        let section = dom::query(&document, ".right-section")?;
        assert!(section.class_list().contains("exam-started"));
        let info = section.first_element_child().unwrap();
        assert_eq!(info.class_name(), "exam-info");
        assert!(info.text_content().unwrap_or_default().contains("Physics"));

        button(&document, "stopBtn").click();
        assert_eq!(clock.session().phase(), ExamPhase::Stopped);
        assert!(!button(&document, "resetBtn").disabled());

        button(&document, "resetBtn").click();
        assert_eq!(clock.session().phase(), ExamPhase::Setup);
        assert!(!section.class_list().contains("exam-started"));
        assert!(section.query_selector(".exam-info").unwrap().is_none());
        assert_eq!(input(&document, "examHours").value(), "");
        assert!(button(&document, "startBtn").disabled());
        assert!(!button(&document, "setTimerBtn").disabled());

        drop(clock);
        root.remove();
        Ok(())
    }

    /// Replaces `window.alert` so the finish message can be read back.
    fn capture_alerts(window: &Window) {
        let capture = js_sys::Function::new_with_args("message", "globalThis.lastAlert = message;");
        js_sys::Reflect::set(window, &JsValue::from_str("alert"), &capture).unwrap();
    }

    fn last_alert(window: &Window) -> Option<String> {
        js_sys::Reflect::get(window, &JsValue::from_str("lastAlert"))
            .unwrap()
            .as_string()
    }

    #[wasm_bindgen_test]
    async fn test_countdown_reaching_zero_finishes_exam() -> Result<()> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let root = fixture(&document);
        capture_alerts(&window);

        // One countdown step covers the whole minute; the real interval never
        // fires during the test, so ticks are driven by hand.
        let config = WidgetConfig {
            countdown_tick_ms: 60_000,
            stopwatch_tick_ms: 5,
            ..WidgetConfig::default()
        };
        let clock = ExamClock::mount(&window, &document, &config)?;

        input(&document, "examMinutesInput").set_value("1");
        button(&document, "setTimerBtn").click();
        button(&document, "startBtn").click();
        assert_eq!(clock.session().phase(), ExamPhase::Running);

        gloo_timers::future::TimeoutFuture::new(1_100).await;
        let elapsed: HtmlElement = dom::by_id(&document, "elapsedDisplay", "").unwrap();
        let running = elapsed.text_content().unwrap_or_default();
        assert_ne!(running, "00:00:00");

        on_countdown_tick(&Rc::downgrade(&clock.state));

        assert_eq!(clock.session().phase(), ExamPhase::Stopped);
        let countdown: HtmlElement = dom::by_id(&document, "countdownDisplay", "").unwrap();
        assert_eq!(countdown.text_content().as_deref(), Some("00:00:00"));
        assert!(!button(&document, "resetBtn").disabled());
        assert!(button(&document, "startBtn").disabled());
        assert!(button(&document, "stopBtn").disabled());
        assert!(clock.state.countdown_timer.borrow().is_none());
        assert!(clock.state.stopwatch_timer.borrow().is_none());
        assert_eq!(last_alert(&window).as_deref(), Some("Exam time is over!"));

        // The stopwatch is frozen once the exam is over
        let frozen = elapsed.text_content();
        gloo_timers::future::TimeoutFuture::new(1_100).await;
        assert_eq!(elapsed.text_content(), frozen);

        drop(clock);
        root.remove();
        Ok(())
    }

    #[wasm_bindgen_test]
    fn test_zero_duration_does_not_start() -> Result<()> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let root = fixture(&document);
        let clock = ExamClock::mount(&window, &document, &WidgetConfig::default())?;

        clock.set_duration();
        clock.start();
        assert_eq!(clock.session().phase(), ExamPhase::Armed);

        drop(clock);
        root.remove();
        Ok(())
    }
}
