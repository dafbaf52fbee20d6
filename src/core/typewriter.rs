//! Interruptible typewriter
//!
//! Reveals flattened content one unit at a time: a character, an atomic bar
//! element, or a line break. Each unit is paced by a fixed delay, with a
//! longer pause after line breaks. The reveal is cooperative: every step
//! first checks a cancellation token and the session token captured when the
//! animation started; either condition stops the walk, leaving the partial
//! output in place with no rollback.
//!
//! The "complete now" override is not part of this state machine: the owner
//! consumes the typewriter with [`Typewriter::into_lines`] and writes the
//! full content in one step, bypassing the token checks entirely.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::markup::{Line, Span, SpanKind};

/// Shared cancellation flag handed to an in-flight typewriter.
///
/// Cloning yields another handle to the same flag.
#[derive(Clone, Default)]
pub struct CancelToken {
    flag: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The typewriter observes this at its next step.
    pub fn cancel(&self) {
        self.flag.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }
}

/// Outcome of a single [`Typewriter::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Nothing was due yet.
    Idle,
    /// One or more units were revealed.
    Progressed,
    /// The full content has been revealed.
    Finished,
    /// Cancellation or a stale session token stopped the walk.
    Aborted,
}

/// Character-by-character reveal of flattened content.
pub struct Typewriter {
    full: Vec<Line>,
    /// Reveal cursor: current line, span within it, units within the span.
    line: usize,
    span: usize,
    offset: usize,
    token: u64,
    cancel: CancelToken,
    per_unit: Duration,
    newline_pause: u32,
    next_due: Instant,
    done: bool,
}

enum Step {
    Unit,
    LineBreak,
    End,
}

impl Typewriter {
    /// Start a reveal of `full` at `now`. `token` is the session counter
    /// value captured by the dispatch that started this animation.
    pub fn new(
        full: Vec<Line>,
        token: u64,
        cancel: CancelToken,
        per_unit: Duration,
        newline_pause: u32,
        now: Instant,
    ) -> Self {
        Self {
            full,
            line: 0,
            span: 0,
            offset: 0,
            token,
            cancel,
            per_unit,
            newline_pause: newline_pause.max(1),
            next_due: now,
            done: false,
        }
    }

    /// Advance the reveal up to `now`. `live_seq` is the current session
    /// counter; a mismatch with the captured token aborts the walk.
    pub fn advance(&mut self, now: Instant, live_seq: u64) -> Advance {
        if self.done {
            return Advance::Idle;
        }
        if self.cancel.is_cancelled() || self.token != live_seq {
            self.done = true;
            return Advance::Aborted;
        }

        let mut progressed = false;
        while now >= self.next_due {
            match self.step() {
                Step::Unit => {
                    progressed = true;
                    self.next_due += self.per_unit;
                }
                Step::LineBreak => {
                    progressed = true;
                    self.next_due += self.per_unit * self.newline_pause;
                }
                Step::End => {
                    self.done = true;
                    return Advance::Finished;
                }
            }
            if self.cancel.is_cancelled() || self.token != live_seq {
                self.done = true;
                return Advance::Aborted;
            }
        }

        if progressed {
            Advance::Progressed
        } else {
            Advance::Idle
        }
    }

    /// Reveal the next unit, moving the cursor.
    fn step(&mut self) -> Step {
        loop {
            let Some(line) = self.full.get(self.line) else {
                return Step::End;
            };
            match line.spans.get(self.span) {
                Some(span) => {
                    if self.offset < span.units() {
                        self.offset += 1;
                        return Step::Unit;
                    }
                    self.span += 1;
                    self.offset = 0;
                }
                None => {
                    self.line += 1;
                    self.span = 0;
                    self.offset = 0;
                    if self.line >= self.full.len() {
                        return Step::End;
                    }
                    return Step::LineBreak;
                }
            }
        }
    }

    /// Lines revealed so far, the last one possibly partial.
    pub fn visible_lines(&self) -> Vec<Line> {
        let mut out: Vec<Line> = self.full[..self.line.min(self.full.len())].to_vec();
        if let Some(line) = self.full.get(self.line) {
            let mut partial = Line::default();
            for (i, span) in line.spans.iter().enumerate() {
                if i < self.span {
                    partial.spans.push(span.clone());
                } else if i == self.span && self.offset > 0 {
                    partial.spans.push(truncate_span(span, self.offset));
                } else {
                    break;
                }
            }
            out.push(partial);
        }
        out
    }

    /// Consume the typewriter, yielding the entire intended content.
    pub fn into_lines(self) -> Vec<Line> {
        self.full
    }

    #[cfg(test)]
    fn visible_text(&self) -> String {
        self.visible_lines()
            .iter()
            .map(Line::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn truncate_span(span: &Span, units: usize) -> Span {
    let mut out = span.clone();
    if let SpanKind::Text(text) = &span.kind {
        out.kind = SpanKind::Text(text.chars().take(units).collect());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup;

    const TICK: Duration = Duration::from_millis(10);

    fn typer(content: &str, token: u64, cancel: CancelToken, now: Instant) -> Typewriter {
        Typewriter::new(markup::render(content), token, cancel, TICK, 3, now)
    }

    #[test]
    fn reveals_units_in_order() {
        let t0 = Instant::now();
        let mut tw = typer("abc", 1, CancelToken::new(), t0);

        assert_eq!(tw.advance(t0, 1), Advance::Progressed);
        assert_eq!(tw.visible_text(), "a");

        assert_eq!(tw.advance(t0 + TICK * 2, 1), Advance::Progressed);
        assert_eq!(tw.visible_text(), "abc");

        assert_eq!(tw.advance(t0 + TICK * 3, 1), Advance::Finished);
    }

    #[test]
    fn line_break_pauses_longer() {
        let t0 = Instant::now();
        let mut tw = typer("ab\ncd", 1, CancelToken::new(), t0);

        // a, b, then the line break at +20ms.
        tw.advance(t0 + TICK * 2, 1);
        assert_eq!(tw.visible_text(), "ab\n");

        // Break pause is 3 ticks; 'c' is not due until +50ms.
        assert_eq!(tw.advance(t0 + TICK * 4, 1), Advance::Idle);
        assert_eq!(tw.advance(t0 + TICK * 5, 1), Advance::Progressed);
        assert_eq!(tw.visible_text(), "ab\nc");
    }

    #[test]
    fn cancel_stops_mid_flight_keeping_partial() {
        let t0 = Instant::now();
        let cancel = CancelToken::new();
        let mut tw = typer("hello", 1, cancel.clone(), t0);

        tw.advance(t0 + TICK, 1);
        assert_eq!(tw.visible_text(), "he");

        cancel.cancel();
        assert_eq!(tw.advance(t0 + TICK * 2, 1), Advance::Aborted);
        assert_eq!(tw.visible_text(), "he");

        // Once aborted the walk never resumes.
        assert_eq!(tw.advance(t0 + TICK * 10, 1), Advance::Idle);
        assert_eq!(tw.visible_text(), "he");
    }

    #[test]
    fn stale_session_token_aborts() {
        let t0 = Instant::now();
        let mut tw = typer("hello", 3, CancelToken::new(), t0);

        tw.advance(t0, 3);
        assert_eq!(tw.advance(t0 + TICK, 4), Advance::Aborted);
        assert_eq!(tw.visible_text(), "h");
    }

    #[test]
    fn finishes_with_full_content() {
        let t0 = Instant::now();
        let mut tw = typer("ab\ncd", 1, CancelToken::new(), t0);
        assert_eq!(tw.advance(t0 + TICK * 100, 1), Advance::Finished);
        assert_eq!(tw.visible_text(), "ab\ncd");
    }

    #[test]
    fn into_lines_yields_entire_content() {
        let t0 = Instant::now();
        let content = markup::render("<hl>skip</hl> me");
        let tw = Typewriter::new(content.clone(), 1, CancelToken::new(), TICK, 3, t0);
        assert_eq!(tw.into_lines(), content);
    }

    #[test]
    fn bar_reveals_as_single_unit() {
        let t0 = Instant::now();
        let mut tw = typer("x<bar level=\"80\"/>y", 1, CancelToken::new(), t0);
        tw.advance(t0 + TICK, 1);
        let lines = tw.visible_lines();
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[1].kind, markup::SpanKind::Bar(80));
    }
}
