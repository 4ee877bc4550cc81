//! Clock / stopwatch mode handling, kept apart from the particle engine.
//!
//! All methods take `now` as the app's elapsed time so the whole state machine
//! can be driven from tests without a real clock.

use std::time::Duration;

/// How long a click keeps the status line visible
pub const UI_REVEAL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Clock,
    Stopwatch,
}

/// Pausable elapsed-time counter
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    running_since: Option<Duration>,
    accumulated: Duration,
}

impl Stopwatch {
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn start(&mut self, now: Duration) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn stop(&mut self, now: Duration) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_sub(since);
        }
    }

    pub fn reset(&mut self, now: Duration) {
        self.stop(now);
        self.accumulated = Duration::ZERO;
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + now.saturating_sub(since),
            None => self.accumulated,
        }
    }
}

/// Input-driven mode and stopwatch state
#[derive(Clone, Debug)]
pub struct Controls {
    mode: DisplayMode,
    stopwatch: Stopwatch,
    revealed_at: Option<Duration>,
    /// Set whenever the displayed string must be re-applied from scratch
    redraw_requested: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Clock,
            stopwatch: Stopwatch::default(),
            revealed_at: None,
            redraw_requested: false,
        }
    }
}

impl Controls {
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    /// Single click: pause a running stopwatch and reveal the UI
    pub fn click(&mut self, now: Duration) {
        if self.mode == DisplayMode::Stopwatch && self.stopwatch.is_running() {
            self.stopwatch.stop(now);
        }
        self.reveal(now);
    }

    /// Double click: start the stopwatch if it is stopped
    pub fn double_click(&mut self, now: Duration) {
        if self.mode == DisplayMode::Stopwatch && !self.stopwatch.is_running() {
            self.stopwatch.start(now);
            self.reveal(now);
        }
    }

    /// Switch between clock and stopwatch.
    ///
    /// Entering stopwatch mode resets it unless it is still running.
    pub fn toggle(&mut self, now: Duration) -> DisplayMode {
        self.mode = match self.mode {
            DisplayMode::Clock => {
                if !self.stopwatch.is_running() {
                    self.stopwatch.reset(now);
                }
                DisplayMode::Stopwatch
            }
            DisplayMode::Stopwatch => DisplayMode::Clock,
        };
        self.redraw_requested = true;
        self.reveal(now);
        self.mode
    }

    fn reveal(&mut self, now: Duration) {
        self.revealed_at = Some(now);
    }

    /// Whether the status line should be shown.
    ///
    /// Stays up for as long as the stopwatch matters: in stopwatch mode, or
    /// while it keeps running behind the clock.
    pub fn ui_visible(&self, now: Duration) -> bool {
        if self.mode == DisplayMode::Stopwatch || self.stopwatch.is_running() {
            return true;
        }
        self.revealed_at
            .is_some_and(|at| now.saturating_sub(at) < UI_REVEAL)
    }

    /// Returns `true` once after a mode change
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// `HHMMSS` for the active mode. `clock` is the local time of day.
    pub fn time_string(&self, now: Duration, clock: (u32, u32, u32)) -> String {
        match self.mode {
            DisplayMode::Clock => format_hms(clock.0, clock.1, clock.2),
            DisplayMode::Stopwatch => format_elapsed(self.stopwatch.elapsed(now)),
        }
    }

    pub fn status(&self, clock: (u32, u32, u32)) -> String {
        match self.mode {
            DisplayMode::Clock => {
                format!("Time: {:02}:{:02}:{:02}", clock.0, clock.1, clock.2)
            }
            DisplayMode::Stopwatch if self.stopwatch.is_running() => "Timing...".to_string(),
            DisplayMode::Stopwatch => "Timer paused".to_string(),
        }
    }
}

/// Six digits, hours wrapped into two
pub fn format_hms(hours: u32, minutes: u32, seconds: u32) -> String {
    format!("{:02}{:02}{:02}", hours % 100, minutes % 60, seconds % 60)
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format_hms((hours % 100) as u32, minutes as u32, seconds as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(9, 5, 3), "090503");
        assert_eq!(format_hms(23, 59, 59), "235959");
        assert_eq!(format_hms(123, 0, 0), "230000");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "000000");
        assert_eq!(format_elapsed(Duration::from_millis(59_999)), "000059");
        assert_eq!(format_elapsed(secs(3600 + 61)), "010101");
        assert_eq!(format_elapsed(secs(100 * 3600 + 5)), "000005");
    }

    #[test]
    fn test_stopwatch_pause_resume() {
        let mut sw = Stopwatch::default();
        sw.start(secs(10));
        assert_eq!(sw.elapsed(secs(15)), secs(5));

        sw.stop(secs(20));
        assert_eq!(sw.elapsed(secs(100)), secs(10));

        sw.start(secs(200));
        assert_eq!(sw.elapsed(secs(203)), secs(13));

        sw.reset(secs(204));
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed(secs(300)), Duration::ZERO);
    }

    #[test]
    fn test_clock_mode_ignores_stopwatch_gestures() {
        let mut controls = Controls::default();
        controls.double_click(secs(1));

        assert_eq!(controls.mode(), DisplayMode::Clock);
        assert!(!controls.stopwatch().is_running());
        assert_eq!(controls.time_string(secs(1), (7, 8, 9)), "070809");
        assert_eq!(controls.status((7, 8, 9)), "Time: 07:08:09");
    }

    #[test]
    fn test_stopwatch_flow() {
        let mut controls = Controls::default();
        assert_eq!(controls.toggle(secs(0)), DisplayMode::Stopwatch);
        assert!(controls.take_redraw_request());
        assert!(!controls.take_redraw_request());
        assert_eq!(controls.status((0, 0, 0)), "Timer paused");

        controls.double_click(secs(1));
        assert_eq!(controls.status((0, 0, 0)), "Timing...");
        assert_eq!(controls.time_string(secs(66), (0, 0, 0)), "000105");

        controls.click(secs(70));
        assert_eq!(controls.status((0, 0, 0)), "Timer paused");
        assert_eq!(controls.time_string(secs(500), (0, 0, 0)), "000109");
    }

    #[test]
    fn test_toggle_keeps_running_stopwatch() {
        let mut controls = Controls::default();
        controls.toggle(secs(0));
        controls.double_click(secs(0));

        controls.toggle(secs(30));
        assert_eq!(controls.mode(), DisplayMode::Clock);
        assert!(controls.stopwatch().is_running());

        // Coming back while it runs does not reset it
        controls.toggle(secs(40));
        assert_eq!(controls.time_string(secs(45), (0, 0, 0)), "000045");
    }

    #[test]
    fn test_toggle_resets_paused_stopwatch() {
        let mut controls = Controls::default();
        controls.toggle(secs(0));
        controls.double_click(secs(0));
        controls.click(secs(10));
        controls.toggle(secs(11));
        controls.toggle(secs(12));

        assert_eq!(controls.time_string(secs(20), (0, 0, 0)), "000000");
        assert_eq!(controls.status((0, 0, 0)), "Timer paused");
    }

    #[test]
    fn test_ui_reveal_expires_in_clock_mode() {
        let mut controls = Controls::default();
        assert!(!controls.ui_visible(secs(0)));

        controls.click(secs(10));
        assert!(controls.ui_visible(secs(12)));
        assert!(!controls.ui_visible(secs(13)));

        controls.toggle(secs(20));
        assert!(controls.ui_visible(secs(100)));
    }

    #[test]
    fn test_ui_stays_up_while_stopwatch_runs_behind_clock() {
        let mut controls = Controls::default();
        controls.toggle(secs(0));
        controls.double_click(secs(1));
        controls.toggle(secs(2));

        assert_eq!(controls.mode(), DisplayMode::Clock);
        assert!(controls.ui_visible(secs(60)));

        // Pausing it from stopwatch mode lets the clock UI time out again
        controls.toggle(secs(61));
        controls.click(secs(62));
        controls.toggle(secs(63));
        assert!(controls.ui_visible(secs(65)));
        assert!(!controls.ui_visible(secs(66)));
    }

    #[test]
    fn test_stopwatch_counts_across_one_long_gap() {
        let mut controls = Controls::default();
        controls.toggle(secs(0));
        controls.double_click(secs(1));

        // A single ten second stall between frames
        assert_eq!(controls.time_string(secs(11), (0, 0, 0)), "000010");
        controls.click(secs(11));
        assert_eq!(controls.time_string(secs(3600), (0, 0, 0)), "000010");
    }
}
