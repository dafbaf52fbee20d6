//! Screen renderer
//!
//! Draws the landing and terminal views with crossterm and records the
//! clickable zones of every frame for mouse hit testing. The renderer owns
//! the terminal lifecycle: raw mode, the alternate screen, and mouse
//! capture, with a fail-fast size check before anything is touched.
//!
//! # Layout
//!
//! ```text
//! Terminal view:
//! ┌──────────────────────────────────────────┐
//! │ header: title, language selector, close  │  row 0
//! │ output region (scrollable)               │  rows 1..h-3
//! │ prompt + input line                      │  row h-2
//! │ command buttons                          │  row h-1
//! └──────────────────────────────────────────┘
//! ```

use std::io::{self, Write};
use std::time::Instant;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Attribute, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use thiserror::Error;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::ColorScheme;
use crate::content::Lang;
use crate::core::markup::{Ink, Line, SpanKind, TextAttrs};
use crate::core::session::{CommandId, TerminalSession};
use crate::view::{View, ViewController};

/// Smallest usable screen.
const MIN_COLS: u16 = 80;
const MIN_ROWS: u16 = 20;

/// Cell width of a rendered skill bar.
const BAR_WIDTH: usize = 16;

/// Left margin of the output region.
const MARGIN: u16 = 2;

/// Startup validation failure.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("terminal too small: {cols}x{rows} (needs at least {min_cols}x{min_rows})")]
    TooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },

    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),
}

/// What a mouse click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// "open terminal" button on the landing screen.
    TerminalButton,
    /// "dashboard" button on the landing screen (stub view).
    DashboardButton,
    /// The ✕ control in the terminal header.
    CloseControl,
    /// A language selector button.
    LangButton(Lang),
    /// A command button on the bottom strip.
    CommandButton(CommandId),
    /// A contact link; carries the target URL.
    Link(String),
    /// Anywhere else in the terminal body (skips the animation).
    Body,
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Rect {
    fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

/// A visual fragment after line wrapping.
enum Seg {
    Text {
        text: String,
        ink: Ink,
        attrs: TextAttrs,
        link: Option<String>,
    },
    Bar {
        level: u8,
    },
}

impl Seg {
    fn width(&self) -> usize {
        match self {
            Seg::Text { text, .. } => text.width(),
            Seg::Bar { .. } => BAR_WIDTH,
        }
    }
}

/// Screen renderer and clickable-zone registry.
pub struct Renderer {
    scheme: ColorScheme,
    cols: u16,
    rows: u16,
    initialized: bool,
    zones: Vec<(Rect, HitTarget)>,
}

impl Renderer {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            cols: 0,
            rows: 0,
            initialized: false,
            zones: Vec::new(),
        }
    }

    /// Current terminal size.
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Validate the screen and enter raw mode, the alternate screen, and
    /// mouse capture. Fails before touching the terminal if the screen is
    /// too small.
    pub fn init(&mut self) -> Result<(), SetupError> {
        let (cols, rows) = Self::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(SetupError::TooSmall {
                cols,
                rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }
        self.cols = cols;
        self.rows = rows;

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            crossterm::event::EnableMouseCapture,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        stdout.flush()?;
        self.initialized = true;
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            crossterm::event::DisableMouseCapture,
            LeaveAlternateScreen,
            Show,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        stdout.flush()
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Set the host terminal window title.
    pub fn set_title(&self, title: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "\x1b]0;{}\x07", title)?;
        stdout.flush()
    }

    /// Hit test a mouse position against the last rendered frame.
    pub fn hit(&self, x: u16, y: u16) -> Option<&HitTarget> {
        self.zones
            .iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, target)| target)
    }

    /// Draw the current frame.
    pub fn render(
        &mut self,
        views: &ViewController,
        session: &TerminalSession,
        now: Instant,
    ) -> io::Result<()> {
        self.zones.clear();
        let mut stdout = io::stdout();
        execute!(stdout, Hide, Clear(ClearType::All))?;

        match views.current() {
            View::Landing => self.render_landing(&mut stdout, session)?,
            View::Terminal => self.render_terminal(&mut stdout, views, session, now)?,
        }

        execute!(stdout, ResetColor)?;
        stdout.flush()
    }

    // -- Landing view --

    fn render_landing<W: Write>(
        &mut self,
        out: &mut W,
        session: &TerminalSession,
    ) -> io::Result<()> {
        let bio = &session.catalog().bundle(session.lang()).bio;
        let mid = self.rows / 3;

        self.draw_centered(
            out,
            mid,
            bio.name,
            self.scheme.accent,
            Attribute::Bold,
        )?;
        self.draw_centered(
            out,
            mid + 2,
            bio.title,
            self.scheme.subtitle,
            Attribute::Reset,
        )?;

        // The two navigation buttons, centered as one row.
        let terminal_label = "[ open terminal ]";
        let dashboard_label = "[ dashboard ]";
        let gap = 4u16;
        let total = terminal_label.width() as u16 + gap + dashboard_label.width() as u16;
        let start = self.cols.saturating_sub(total) / 2;
        let button_row = mid + 5;

        self.draw_button(out, start, button_row, terminal_label, true)?;
        self.zones.push((
            Rect {
                x: start,
                y: button_row,
                w: terminal_label.width() as u16,
                h: 1,
            },
            HitTarget::TerminalButton,
        ));

        let dash_x = start + terminal_label.width() as u16 + gap;
        self.draw_button(out, dash_x, button_row, dashboard_label, false)?;
        self.zones.push((
            Rect {
                x: dash_x,
                y: button_row,
                w: dashboard_label.width() as u16,
                h: 1,
            },
            HitTarget::DashboardButton,
        ));

        self.draw_centered(
            out,
            button_row + 3,
            "press t or enter to open the terminal · q quits",
            self.scheme.muted,
            Attribute::Dim,
        )?;

        // Footer tagline, refreshed on language switch.
        let footer_row = self.rows.saturating_sub(2);
        self.draw_centered(
            out,
            footer_row,
            session.status_line(),
            self.scheme.muted,
            Attribute::Dim,
        )?;
        Ok(())
    }

    fn draw_centered<W: Write>(
        &self,
        out: &mut W,
        row: u16,
        text: &str,
        color: crate::config::Color,
        attr: Attribute,
    ) -> io::Result<()> {
        let x = self.cols.saturating_sub(text.width() as u16) / 2;
        execute!(
            out,
            MoveTo(x, row),
            SetAttribute(attr),
            SetForegroundColor(color.to_crossterm())
        )?;
        write!(out, "{}", text)?;
        execute!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }

    fn draw_button<W: Write>(
        &self,
        out: &mut W,
        x: u16,
        y: u16,
        label: &str,
        primary: bool,
    ) -> io::Result<()> {
        let color = if primary {
            self.scheme.accent
        } else {
            self.scheme.button_fg
        };
        execute!(
            out,
            MoveTo(x, y),
            SetAttribute(Attribute::Bold),
            SetForegroundColor(color.to_crossterm())
        )?;
        write!(out, "{}", label)?;
        execute!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }

    // -- Terminal view --

    fn render_terminal<W: Write>(
        &mut self,
        out: &mut W,
        views: &ViewController,
        session: &TerminalSession,
        now: Instant,
    ) -> io::Result<()> {
        self.render_header(out, session)?;

        let body_top = 1u16;
        let body_rows = self.rows.saturating_sub(3).saturating_sub(body_top) as usize;
        self.render_output(out, session, now, body_top, body_rows)?;

        self.render_input_line(out, views, session)?;
        self.render_command_strip(out, session)?;

        // Everything not claimed by a control skips the animation.
        self.zones.push((
            Rect {
                x: 0,
                y: body_top,
                w: self.cols,
                h: self.rows.saturating_sub(2).saturating_sub(body_top),
            },
            HitTarget::Body,
        ));
        Ok(())
    }

    fn render_header<W: Write>(&mut self, out: &mut W, session: &TerminalSession) -> io::Result<()> {
        execute!(
            out,
            MoveTo(0, 0),
            SetBackgroundColor(self.scheme.header_bg.to_crossterm()),
            SetForegroundColor(self.scheme.header_fg.to_crossterm())
        )?;
        write!(out, "{:width$}", "", width = self.cols as usize)?;

        execute!(out, MoveTo(1, 0), SetAttribute(Attribute::Bold))?;
        write!(out, "termfolio")?;
        execute!(out, SetAttribute(Attribute::Reset))?;
        execute!(
            out,
            SetBackgroundColor(self.scheme.header_bg.to_crossterm()),
            SetForegroundColor(self.scheme.header_fg.to_crossterm())
        )?;

        // Transient notice, centered in the header.
        if let Some(notice) = session.notice() {
            let x = self.cols.saturating_sub(notice.width() as u16) / 2;
            execute!(out, MoveTo(x, 0), SetAttribute(Attribute::Dim))?;
            write!(out, "{}", notice)?;
            execute!(out, SetAttribute(Attribute::Reset))?;
            execute!(
                out,
                SetBackgroundColor(self.scheme.header_bg.to_crossterm()),
                SetForegroundColor(self.scheme.header_fg.to_crossterm())
            )?;
        }

        // Language selector and close control, right-aligned.
        let close_label = " ✕ ";
        let mut x = self.cols.saturating_sub(close_label.width() as u16 + 1);
        for lang in Lang::ALL.into_iter().rev() {
            let label = format!(" {} ", lang.label());
            x = x.saturating_sub(label.width() as u16 + 1);
            execute!(out, MoveTo(x, 0))?;
            if lang == session.lang() {
                execute!(
                    out,
                    SetBackgroundColor(self.scheme.button_active_bg.to_crossterm()),
                    SetForegroundColor(self.scheme.button_active_fg.to_crossterm())
                )?;
            }
            write!(out, "{}", label)?;
            execute!(
                out,
                SetBackgroundColor(self.scheme.header_bg.to_crossterm()),
                SetForegroundColor(self.scheme.header_fg.to_crossterm())
            )?;
            self.zones.push((
                Rect {
                    x,
                    y: 0,
                    w: label.width() as u16,
                    h: 1,
                },
                HitTarget::LangButton(lang),
            ));
        }

        let close_x = self.cols.saturating_sub(close_label.width() as u16 + 1);
        execute!(out, MoveTo(close_x, 0))?;
        write!(out, "{}", close_label)?;
        self.zones.push((
            Rect {
                x: close_x,
                y: 0,
                w: close_label.width() as u16,
                h: 1,
            },
            HitTarget::CloseControl,
        ));

        execute!(out, ResetColor)?;
        Ok(())
    }

    fn render_output<W: Write>(
        &mut self,
        out: &mut W,
        session: &TerminalSession,
        now: Instant,
        top: u16,
        height: usize,
    ) -> io::Result<()> {
        let width = self.cols.saturating_sub(MARGIN * 2) as usize;
        let rows = wrap_lines(&session.display_lines(), width);

        let total = rows.len();
        let start = total.saturating_sub(height + session.scroll());
        let visible = rows.into_iter().skip(start).take(height);

        let progress = session.bar_progress(now);
        let mut screen_row = top;
        let mut end_x = MARGIN;
        for row in visible {
            execute!(out, MoveTo(MARGIN, screen_row))?;
            let mut x = MARGIN;
            for seg in row {
                self.draw_seg(out, &seg, x, screen_row, progress)?;
                x += seg.width() as u16;
            }
            end_x = x;
            screen_row += 1;
        }

        // Block cursor trailing the reveal.
        if session.is_typing() && screen_row > top {
            execute!(
                out,
                MoveTo(end_x, screen_row - 1),
                SetForegroundColor(self.scheme.accent.to_crossterm())
            )?;
            write!(out, "▌")?;
            execute!(out, ResetColor)?;
        }
        Ok(())
    }

    fn draw_seg<W: Write>(
        &mut self,
        out: &mut W,
        seg: &Seg,
        x: u16,
        y: u16,
        bar_progress: f32,
    ) -> io::Result<()> {
        match seg {
            Seg::Text {
                text,
                ink,
                attrs,
                link,
            } => {
                if *ink == Ink::Chip {
                    execute!(
                        out,
                        SetBackgroundColor(self.scheme.chip_bg.to_crossterm()),
                        SetForegroundColor(self.scheme.chip_fg.to_crossterm())
                    )?;
                } else {
                    execute!(
                        out,
                        SetForegroundColor(self.ink_color(*ink).to_crossterm())
                    )?;
                }
                if attrs.contains(TextAttrs::BOLD) {
                    execute!(out, SetAttribute(Attribute::Bold))?;
                }
                if attrs.contains(TextAttrs::DIM) {
                    execute!(out, SetAttribute(Attribute::Dim))?;
                }
                if attrs.contains(TextAttrs::ITALIC) {
                    execute!(out, SetAttribute(Attribute::Italic))?;
                }
                if attrs.contains(TextAttrs::UNDERLINE) {
                    execute!(out, SetAttribute(Attribute::Underlined))?;
                }
                write!(out, "{}", text)?;
                execute!(out, SetAttribute(Attribute::Reset), ResetColor)?;

                if let Some(url) = link {
                    self.zones.push((
                        Rect {
                            x,
                            y,
                            w: text.width() as u16,
                            h: 1,
                        },
                        HitTarget::Link(url.clone()),
                    ));
                }
            }
            Seg::Bar { level } => {
                let target = (*level as f32 / 100.0) * BAR_WIDTH as f32;
                let filled = (target * bar_progress).round() as usize;
                let filled = filled.min(BAR_WIDTH);
                execute!(
                    out,
                    SetForegroundColor(self.scheme.bar_fill.to_crossterm())
                )?;
                write!(out, "{}", "█".repeat(filled))?;
                execute!(
                    out,
                    SetForegroundColor(self.scheme.bar_empty.to_crossterm())
                )?;
                write!(out, "{}", "░".repeat(BAR_WIDTH - filled))?;
                execute!(out, ResetColor)?;
            }
        }
        Ok(())
    }

    fn render_input_line<W: Write>(
        &self,
        out: &mut W,
        views: &ViewController,
        session: &TerminalSession,
    ) -> io::Result<()> {
        let row = self.rows.saturating_sub(2);
        execute!(out, MoveTo(MARGIN, row))?;

        let s = &self.scheme;
        execute!(
            out,
            SetAttribute(Attribute::Bold),
            SetForegroundColor(s.prompt_user.to_crossterm())
        )?;
        write!(out, "{}", session.prompt_user())?;
        execute!(
            out,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(s.prompt_symbol.to_crossterm())
        )?;
        write!(out, "@")?;
        execute!(
            out,
            SetAttribute(Attribute::Bold),
            SetForegroundColor(s.prompt_user.to_crossterm())
        )?;
        write!(out, "{}", session.prompt_host())?;
        execute!(
            out,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(s.prompt_symbol.to_crossterm())
        )?;
        write!(out, ":")?;
        execute!(out, SetForegroundColor(s.prompt_path.to_crossterm()))?;
        write!(out, "~")?;
        execute!(out, SetForegroundColor(s.prompt_symbol.to_crossterm()))?;
        write!(out, "$ ")?;
        execute!(out, SetForegroundColor(s.command.to_crossterm()))?;
        write!(out, "{}", session.input())?;

        if views.input_focused() {
            execute!(out, SetForegroundColor(s.accent.to_crossterm()))?;
            write!(out, "▌")?;
        }
        execute!(out, ResetColor)?;
        Ok(())
    }

    fn render_command_strip<W: Write>(
        &mut self,
        out: &mut W,
        session: &TerminalSession,
    ) -> io::Result<()> {
        let row = self.rows.saturating_sub(1);
        let active = session.current_command_id();
        let mut x = 1u16;

        for id in CommandId::ALL {
            let label = format!("[{}]", id.name());
            execute!(out, MoveTo(x, row))?;
            if active == Some(id) {
                execute!(
                    out,
                    SetBackgroundColor(self.scheme.button_active_bg.to_crossterm()),
                    SetForegroundColor(self.scheme.button_active_fg.to_crossterm())
                )?;
            } else {
                execute!(
                    out,
                    SetForegroundColor(self.scheme.button_fg.to_crossterm())
                )?;
            }
            write!(out, "{}", label)?;
            execute!(out, ResetColor)?;

            self.zones.push((
                Rect {
                    x,
                    y: row,
                    w: label.width() as u16,
                    h: 1,
                },
                HitTarget::CommandButton(id),
            ));
            x += label.width() as u16 + 1;
        }
        Ok(())
    }

    fn ink_color(&self, ink: Ink) -> crate::config::Color {
        let s = &self.scheme;
        match ink {
            Ink::Default => s.text,
            Ink::Title => s.title,
            Ink::Subtitle => s.subtitle,
            Ink::Highlight => s.highlight,
            Ink::Muted => s.muted,
            Ink::Error => s.error,
            Ink::Link => s.link,
            Ink::Chip => s.chip_bg,
            Ink::PromptUser => s.prompt_user,
            Ink::PromptPath => s.prompt_path,
            Ink::PromptSymbol => s.prompt_symbol,
            Ink::CommandText => s.command,
        }
    }
}

/// Wrap logical lines into visual rows of at most `width` cells.
fn wrap_lines(lines: &[Line], width: usize) -> Vec<Vec<Seg>> {
    let width = width.max(8);
    let mut rows: Vec<Vec<Seg>> = Vec::new();

    for line in lines {
        let mut row: Vec<Seg> = Vec::new();
        let mut used = 0usize;

        for span in &line.spans {
            match &span.kind {
                SpanKind::Bar(level) => {
                    if used + BAR_WIDTH > width && used > 0 {
                        rows.push(std::mem::take(&mut row));
                        used = 0;
                    }
                    row.push(Seg::Bar { level: *level });
                    used += BAR_WIDTH;
                }
                SpanKind::Text(raw) => {
                    // Chips get a one-cell pad on each side.
                    let text = if span.ink == Ink::Chip {
                        format!(" {} ", raw)
                    } else {
                        raw.clone()
                    };
                    let mut current = String::new();
                    for ch in text.chars() {
                        let w = ch.width().unwrap_or(0);
                        if used + w > width {
                            if !current.is_empty() {
                                row.push(Seg::Text {
                                    text: std::mem::take(&mut current),
                                    ink: span.ink,
                                    attrs: span.attrs,
                                    link: span.link.clone(),
                                });
                            }
                            rows.push(std::mem::take(&mut row));
                            used = 0;
                        }
                        current.push(ch);
                        used += w;
                    }
                    if !current.is_empty() {
                        row.push(Seg::Text {
                            text: current,
                            ink: span.ink,
                            attrs: span.attrs,
                            link: span.link.clone(),
                        });
                    }
                }
            }
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup;

    fn row_text(row: &[Seg]) -> String {
        row.iter()
            .map(|seg| match seg {
                Seg::Text { text, .. } => text.clone(),
                Seg::Bar { .. } => "#".repeat(BAR_WIDTH),
            })
            .collect()
    }

    #[test]
    fn short_lines_stay_unwrapped() {
        let lines = markup::render("hello world");
        let rows = wrap_lines(&lines, 40);
        assert_eq!(rows.len(), 1);
        assert_eq!(row_text(&rows[0]), "hello world");
    }

    #[test]
    fn long_lines_wrap_at_width() {
        let lines = markup::render("abcdefghij");
        let rows = wrap_lines(&lines, 8);
        assert_eq!(rows.len(), 2);
        assert_eq!(row_text(&rows[0]), "abcdefgh");
        assert_eq!(row_text(&rows[1]), "ij");
    }

    #[test]
    fn empty_lines_become_empty_rows() {
        let lines = markup::render("a\n\nb");
        let rows = wrap_lines(&lines, 20);
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_empty());
    }

    #[test]
    fn bar_wraps_as_a_unit() {
        let lines = markup::render("aaaa<bar level=\"50\"/>");
        let rows = wrap_lines(&lines, 10);
        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[1][0], Seg::Bar { level: 50 }));
    }

    #[test]
    fn rect_containment() {
        let rect = Rect {
            x: 2,
            y: 3,
            w: 4,
            h: 1,
        };
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 3));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 4));
    }
}
