//! View switching
//!
//! Tracks which of the two screens is showing: the hero landing screen or
//! the terminal. Switching to the terminal schedules input focus after the
//! presentation transition; until then printable keys are ignored, the way
//! an unfocused input field ignores them.

use std::time::{Duration, Instant};

use tracing::info;

/// Delay between showing the terminal and focusing its input line.
const FOCUS_DELAY: Duration = Duration::from_millis(500);

/// The two screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Terminal,
}

/// Owns the current view and the pending input-focus timer.
pub struct ViewController {
    current: View,
    focus_at: Option<Instant>,
    input_focused: bool,
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            current: View::Landing,
            focus_at: None,
            input_focused: false,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Whether the terminal input line accepts printable keys.
    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    /// Show the terminal and schedule input focus after the transition.
    pub fn show_terminal(&mut self, now: Instant) {
        self.current = View::Terminal;
        self.input_focused = false;
        self.focus_at = Some(now + FOCUS_DELAY);
        info!("view: terminal");
    }

    /// Return to the landing screen.
    pub fn hide_terminal(&mut self) {
        self.current = View::Landing;
        self.input_focused = false;
        self.focus_at = None;
        info!("view: landing");
    }

    /// Dashboard placeholder; a third view that was never built.
    pub fn show_dashboard(&self) {
        info!("dashboard view not implemented yet");
    }

    /// Escape returns to the landing screen only from the terminal.
    pub fn handle_escape(&mut self) {
        if self.current == View::Terminal {
            self.hide_terminal();
        }
    }

    /// Resolve the pending focus timer. Returns true when focus changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(at) = self.focus_at {
            if now >= at {
                self.focus_at = None;
                self.input_focused = true;
                return true;
            }
        }
        false
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_landing() {
        let views = ViewController::new();
        assert_eq!(views.current(), View::Landing);
        assert!(!views.input_focused());
    }

    #[test]
    fn show_then_hide_round_trips() {
        let now = Instant::now();
        let mut views = ViewController::new();

        views.show_terminal(now);
        assert_eq!(views.current(), View::Terminal);

        views.hide_terminal();
        assert_eq!(views.current(), View::Landing);
    }

    #[test]
    fn focus_arrives_after_transition_delay() {
        let now = Instant::now();
        let mut views = ViewController::new();
        views.show_terminal(now);

        assert!(!views.tick(now));
        assert!(!views.input_focused());

        assert!(views.tick(now + FOCUS_DELAY));
        assert!(views.input_focused());

        // Already resolved; no further change.
        assert!(!views.tick(now + FOCUS_DELAY * 2));
    }

    #[test]
    fn hiding_cancels_pending_focus() {
        let now = Instant::now();
        let mut views = ViewController::new();
        views.show_terminal(now);
        views.hide_terminal();

        assert!(!views.tick(now + FOCUS_DELAY));
        assert!(!views.input_focused());
    }

    #[test]
    fn escape_only_acts_in_terminal_view() {
        let now = Instant::now();
        let mut views = ViewController::new();

        views.handle_escape();
        assert_eq!(views.current(), View::Landing);

        views.show_terminal(now);
        views.handle_escape();
        assert_eq!(views.current(), View::Landing);
    }

    #[test]
    fn show_terminal_is_idempotent() {
        let now = Instant::now();
        let mut views = ViewController::new();
        views.show_terminal(now);
        views.tick(now + FOCUS_DELAY);
        views.show_terminal(now + FOCUS_DELAY);

        // Re-showing re-arms the focus delay.
        assert!(!views.input_focused());
        assert!(views.tick(now + FOCUS_DELAY * 2));
    }
}
