//! Terminal session
//!
//! Owns command dispatch, content lookup, the input line and its history,
//! the scrollable output region, and the typewriter hand-over. Commands are
//! totally ordered by a monotonically increasing session counter; a deferred
//! render whose captured token no longer matches the live counter is
//! discarded without touching the output region.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::content::{Catalog, Lang, TextKey};
use crate::history::{CommandHistory, Recall};

use super::markup::{self, Ink, Line, Span, TextAttrs};
use super::typewriter::{Advance, CancelToken, Typewriter};

/// Grace period between cancelling an animation and running the command
/// that displaced it.
const CANCEL_GRACE: Duration = Duration::from_millis(20);

/// Duration of the skill-bar fill tween after a reveal completes.
const BAR_TWEEN: Duration = Duration::from_millis(600);

/// How long a transient notice stays on screen.
const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// The fixed command vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
    Whoami,
    Experience,
    Education,
    Skills,
    Certs,
    Contact,
    Help,
    Clear,
}

impl CommandId {
    pub const ALL: [CommandId; 8] = [
        CommandId::Whoami,
        CommandId::Experience,
        CommandId::Education,
        CommandId::Skills,
        CommandId::Certs,
        CommandId::Contact,
        CommandId::Help,
        CommandId::Clear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandId::Whoami => "whoami",
            CommandId::Experience => "experience",
            CommandId::Education => "education",
            CommandId::Skills => "skills",
            CommandId::Certs => "certs",
            CommandId::Contact => "contact",
            CommandId::Help => "help",
            CommandId::Clear => "clear",
        }
    }

    /// Resolve a normalized command word against the vocabulary.
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == input)
    }

    /// Case-insensitive prefix completion. Returns a command only when the
    /// prefix is non-empty and matches exactly one name.
    pub fn complete(partial: &str) -> Option<Self> {
        if partial.is_empty() {
            return None;
        }
        let lower = partial.to_ascii_lowercase();
        let mut matches = Self::ALL.into_iter().filter(|c| c.name().starts_with(&lower));
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first)
    }
}

/// Typewriter pacing, from configuration.
#[derive(Debug, Clone, Copy)]
pub struct TypingSpeed {
    pub per_char: Duration,
    pub newline_pause: u32,
}

impl Default for TypingSpeed {
    fn default() -> Self {
        Self {
            per_char: Duration::from_millis(15),
            newline_pause: 3,
        }
    }
}

/// The scrollable output area of the terminal screen.
#[derive(Default)]
struct OutputRegion {
    lines: Vec<Line>,
    /// Index where the replaceable content block starts (after the echo).
    block_start: usize,
    /// Scroll distance from the bottom; 0 sticks to the newest line.
    scroll: usize,
}

impl OutputRegion {
    fn reset(&mut self) {
        self.lines.clear();
        self.block_start = 0;
        self.scroll = 0;
    }

    /// Replace everything with a command echo line; content follows.
    fn set_echo(&mut self, echo: Line) {
        self.reset();
        self.lines.push(echo);
        self.block_start = self.lines.len();
    }

    /// Replace the content block, keeping the echo.
    fn replace_block(&mut self, content: Vec<Line>) {
        self.lines.truncate(self.block_start);
        self.lines.extend(content);
        self.scroll = 0;
    }

    fn scroll_up(&mut self, n: usize) {
        self.scroll = (self.scroll + n).min(self.lines.len().saturating_sub(1));
    }

    fn scroll_down(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }
}

/// A dispatch deferred while the previous animation winds down.
struct PendingCommand {
    cmd: String,
    token: u64,
    animate: bool,
    not_before: Instant,
}

/// The interactive terminal session.
pub struct TerminalSession {
    catalog: Catalog,
    lang: Lang,
    /// Monotonic dispatch counter; the sole arbiter of render staleness.
    seq: u64,
    current_command: Option<String>,
    input: String,
    history: CommandHistory,
    typewriter: Option<Typewriter>,
    cancel: Option<CancelToken>,
    pending: Option<PendingCommand>,
    output: OutputRegion,
    bars_started: Option<Instant>,
    status_line: String,
    notice: Option<(String, Instant)>,
    speed: TypingSpeed,
    animate_default: bool,
    prompt_user: String,
    prompt_host: String,
}

impl TerminalSession {
    pub fn new(
        catalog: Catalog,
        lang: Lang,
        speed: TypingSpeed,
        prompt_user: &str,
        prompt_host: &str,
        animate_default: bool,
    ) -> Self {
        let status_line = catalog.translate(lang, TextKey::Footer).to_string();
        Self {
            catalog,
            lang,
            seq: 0,
            current_command: None,
            input: String::new(),
            history: CommandHistory::new(),
            typewriter: None,
            cancel: None,
            pending: None,
            output: OutputRegion::default(),
            bars_started: None,
            status_line,
            notice: None,
            speed,
            animate_default,
            prompt_user: prompt_user.to_string(),
            prompt_host: prompt_host.to_string(),
        }
    }

    // -- Accessors used by the renderer --

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn is_typing(&self) -> bool {
        self.typewriter.is_some()
    }

    pub fn scroll(&self) -> usize {
        self.output.scroll
    }

    /// The resolved command currently displayed, for the active-button
    /// marker on the command strip.
    pub fn current_command_id(&self) -> Option<CommandId> {
        self.current_command.as_deref().and_then(CommandId::parse)
    }

    /// Lines to draw: committed output plus the in-flight reveal.
    pub fn display_lines(&self) -> Vec<Line> {
        let mut lines = self.output.lines.clone();
        if let Some(tw) = &self.typewriter {
            lines.extend(tw.visible_lines());
        }
        lines
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn prompt_user(&self) -> &str {
        &self.prompt_user
    }

    pub fn prompt_host(&self) -> &str {
        &self.prompt_host
    }

    pub fn window_title(&self) -> String {
        format!(
            "termfolio - {}@{} [{}]",
            self.prompt_user,
            self.prompt_host,
            self.lang.code()
        )
    }

    /// Eased 0.0-1.0 progress of the skill-bar fill tween.
    pub fn bar_progress(&self, now: Instant) -> f32 {
        match self.bars_started {
            Some(t0) => {
                let t = now.saturating_duration_since(t0).as_secs_f32()
                    / BAR_TWEEN.as_secs_f32();
                ease_out_quad(t)
            }
            None => 0.0,
        }
    }

    // -- Input line --

    pub fn insert_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Submit the input line: record it in history and dispatch it.
    pub fn submit(&mut self, now: Instant) {
        let cmd = self.input.trim().to_ascii_lowercase();
        self.input.clear();
        if cmd.is_empty() {
            return;
        }
        self.history.push(&cmd);
        let animate = self.animate_default;
        self.execute_command(&cmd, now, animate);
    }

    pub fn history_prev(&mut self) {
        if let Some(entry) = self.history.prev() {
            self.input = entry.to_string();
        }
    }

    pub fn history_next(&mut self) {
        match self.history.next() {
            Recall::Entry(entry) => self.input = entry.to_string(),
            Recall::Empty => self.input.clear(),
        }
    }

    /// Tab completion: replace the input only on a unique prefix match.
    pub fn autocomplete(&mut self) {
        if let Some(id) = CommandId::complete(self.input.trim()) {
            self.input = id.name().to_string();
        }
    }

    pub fn animate_default(&self) -> bool {
        self.animate_default
    }

    // -- Dispatch --

    /// Dispatch a command. The most recently issued command always wins: if
    /// an animation is in flight, it is cancelled and this dispatch waits
    /// out a short grace period as a pending command; a newer dispatch in
    /// the meantime supersedes it.
    pub fn execute_command(&mut self, cmd: &str, now: Instant, animate: bool) {
        let cmd = cmd.trim().to_ascii_lowercase();
        if cmd.is_empty() {
            return;
        }
        self.seq += 1;
        let token = self.seq;
        info!(command = %cmd, token, "dispatch");

        if self.typewriter.is_some() {
            if let Some(cancel) = &self.cancel {
                cancel.cancel();
            }
            self.pending = Some(PendingCommand {
                cmd,
                token,
                animate,
                not_before: now + CANCEL_GRACE,
            });
            return;
        }

        self.dispatch(&cmd, token, now, animate);
    }

    fn dispatch(&mut self, cmd: &str, token: u64, now: Instant, animate: bool) {
        self.current_command = Some(cmd.to_string());
        let resolved = CommandId::parse(cmd);

        if resolved == Some(CommandId::Clear) {
            self.clear_terminal();
            self.show_welcome(now);
            return;
        }

        let content = match resolved {
            Some(id) => markup::render(&self.render_section(id)),
            None => self.render_not_found(cmd),
        };
        let echo = self.command_echo(cmd);

        if token != self.seq {
            debug!(token, live = self.seq, "stale render abandoned");
            return;
        }

        self.output.set_echo(echo);
        self.bars_started = None;
        if animate {
            self.start_typewriter(content, token, now);
        } else {
            self.output.replace_block(content);
            self.bars_started = Some(now);
        }
    }

    /// Reset the output and type the welcome banner.
    pub fn show_welcome(&mut self, now: Instant) {
        let content = markup::render(self.catalog.translate(self.lang, TextKey::Welcome));
        self.output.reset();
        self.bars_started = None;
        if self.animate_default {
            self.start_typewriter(content, self.seq, now);
        } else {
            self.output.replace_block(content);
        }
    }

    fn clear_terminal(&mut self) {
        self.output.reset();
        self.current_command = None;
    }

    fn start_typewriter(&mut self, content: Vec<Line>, token: u64, now: Instant) {
        let cancel = CancelToken::new();
        self.cancel = Some(cancel.clone());
        self.typewriter = Some(Typewriter::new(
            content,
            token,
            cancel,
            self.speed.per_char,
            self.speed.newline_pause,
            now,
        ));
    }

    /// Click-to-skip: synchronously write the entire intended content and
    /// clear the in-progress state. Bypasses the token check.
    pub fn complete_typing_instantly(&mut self, now: Instant) -> bool {
        match self.typewriter.take() {
            Some(tw) => {
                self.output.replace_block(tw.into_lines());
                self.bars_started = Some(now);
                self.cancel = None;
                true
            }
            None => false,
        }
    }

    // -- Language switching --

    /// Switch the interface language. A no-op when already current.
    /// Re-renders the active command instantly in the new language, or
    /// falls back to the welcome banner.
    pub fn switch_language(&mut self, lang: Lang, now: Instant) {
        if lang == self.lang {
            return;
        }
        let rerun = self.current_command.clone();

        // Fire-and-forget: the animation is dropped where it stands.
        if let Some(cancel) = &self.cancel {
            cancel.cancel();
        }
        self.typewriter = None;
        self.cancel = None;

        self.lang = lang;
        self.status_line = self.catalog.translate(lang, TextKey::Footer).to_string();
        info!(lang = lang.code(), "language switched");

        match rerun {
            Some(cmd) if cmd != "clear" && CommandId::parse(&cmd).is_some() => {
                self.clear_terminal();
                self.execute_command(&cmd, now, false);
            }
            _ => {
                self.clear_terminal();
                self.show_welcome(now);
            }
        }
    }

    // -- Scrolling --

    pub fn scroll_up(&mut self, n: usize) {
        self.output.scroll_up(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.output.scroll_down(n);
    }

    // -- Notices --

    /// Show a transient status notice (clipboard feedback).
    pub fn set_notice(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some((text.into(), now + NOTICE_DURATION));
    }

    // -- Per-frame state advance --

    /// Advance timers and the typewriter. Returns true when the screen
    /// needs redrawing.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut dirty = false;

        // A deferred dispatch a newer command has superseded is dropped
        // unapplied.
        if self.pending.as_ref().is_some_and(|p| p.token != self.seq) {
            debug!("superseded pending command discarded");
            self.pending = None;
        }

        let mut outcome = None;
        if let Some(tw) = self.typewriter.as_mut() {
            match tw.advance(now, self.seq) {
                Advance::Idle => {}
                Advance::Progressed => dirty = true,
                state => outcome = Some(state),
            }
        }
        match outcome {
            Some(Advance::Finished) => {
                if let Some(tw) = self.typewriter.take() {
                    self.output.replace_block(tw.into_lines());
                    self.bars_started = Some(now);
                    self.cancel = None;
                    dirty = true;
                }
            }
            Some(Advance::Aborted) => {
                // Partial output stays; nothing is rolled back.
                if let Some(tw) = self.typewriter.take() {
                    self.output.replace_block(tw.visible_lines());
                    self.cancel = None;
                    dirty = true;
                }
            }
            _ => {}
        }

        // Run a deferred dispatch once the animation has acknowledged
        // cancellation and the grace period has passed.
        if self.typewriter.is_none() {
            if let Some(p) = self.pending.take() {
                if now >= p.not_before {
                    self.dispatch(&p.cmd, p.token, now, p.animate);
                    dirty = true;
                } else {
                    self.pending = Some(p);
                }
            }
        }

        if self.notice.as_ref().is_some_and(|(_, until)| now >= *until) {
            self.notice = None;
            dirty = true;
        }

        // Keep redrawing while the skill bars are still filling.
        if let Some(t0) = self.bars_started {
            if now.saturating_duration_since(t0) <= BAR_TWEEN {
                dirty = true;
            }
        }

        dirty
    }

    // -- Section renderers --

    fn render_section(&self, id: CommandId) -> String {
        match id {
            CommandId::Whoami => self.render_whoami(),
            CommandId::Experience => self.render_experience(),
            CommandId::Education => self.render_education(),
            CommandId::Skills => self.render_skills(),
            CommandId::Certs => self.render_certs(),
            CommandId::Contact => self.render_contact(),
            CommandId::Help => self.render_help(),
            CommandId::Clear => String::new(),
        }
    }

    fn render_not_found(&self, cmd: &str) -> Vec<Line> {
        // The literal token goes in as a span, not through the markup
        // parser, so stray '<' in user input cannot open a tag.
        let mut lines = markup::render(
            self.catalog.translate(self.lang, TextKey::CommandNotFound),
        );
        for span in lines.iter_mut().flat_map(|l| l.spans.iter_mut()) {
            if span.ink == Ink::Default {
                span.ink = Ink::Error;
            }
        }
        if lines.is_empty() {
            lines.push(Line::default());
        }
        lines[0].spans.insert(
            0,
            Span::styled(format!("bash: {cmd}: "), Ink::Error, TextAttrs::empty()),
        );
        lines
    }

    fn command_echo(&self, cmd: &str) -> Line {
        let bold = TextAttrs::BOLD;
        Line {
            spans: vec![
                Span::styled(self.prompt_user.clone(), Ink::PromptUser, bold),
                Span::styled("@", Ink::PromptSymbol, TextAttrs::empty()),
                Span::styled(self.prompt_host.clone(), Ink::PromptUser, bold),
                Span::styled(":", Ink::PromptSymbol, TextAttrs::empty()),
                Span::styled("~", Ink::PromptPath, TextAttrs::empty()),
                Span::styled("$ ", Ink::PromptSymbol, TextAttrs::empty()),
                Span::styled(cmd.to_string(), Ink::CommandText, TextAttrs::empty()),
            ],
        }
    }

    fn render_whoami(&self) -> String {
        let b = self.catalog.bundle(self.lang);
        format!(
            "<title>{}</title>\n<sub>{}</sub>\n\n\
             📍 {}\n💼 {}\n🎯 {}\n\n{}",
            b.bio.name, b.bio.title, b.bio.location, b.bio.role, b.bio.focus, b.bio.summary,
        )
    }

    fn render_experience(&self) -> String {
        let b = self.catalog.bundle(self.lang);
        let mut out = format!(
            "<title>{}</title>\n",
            self.catalog.translate(self.lang, TextKey::ExperienceTitle)
        );
        for employer in &b.employers {
            for role in &employer.roles {
                out.push('\n');
                out.push_str(&format!(
                    "<muted>{} · {}</muted>\n",
                    role.period, role.duration
                ));
                if role.current {
                    out.push_str(&format!("<hl>{}</hl>\n", role.title));
                } else {
                    out.push_str(&format!("<sub>{}</sub>\n", role.title));
                }
                out.push_str(&format!("<b>{}</b>\n", employer.company));
                out.push_str(&format!("<muted>{}</muted>\n", role.location));
                for task in &role.tasks {
                    out.push_str(&format!("  • {task}\n"));
                }
            }
        }
        out
    }

    fn render_education(&self) -> String {
        let b = self.catalog.bundle(self.lang);
        let mut out = format!(
            "<title>{}</title>\n",
            self.catalog.translate(self.lang, TextKey::EducationTitle)
        );
        for edu in &b.education {
            out.push('\n');
            out.push_str(&format!("🎓 <sub>{}</sub>\n", edu.degree));
            out.push_str(&format!("   {}\n", edu.school));
            out.push_str(&format!("   <muted>{}</muted>\n", edu.year));
            let chips: Vec<String> = edu
                .skills
                .iter()
                .map(|s| format!("<chip>{s}</chip>"))
                .collect();
            out.push_str(&format!("   {}\n", chips.join(" ")));
        }
        out
    }

    fn render_skills(&self) -> String {
        let b = self.catalog.bundle(self.lang);
        let mut out = format!(
            "<title>{}</title>\n",
            self.catalog.translate(self.lang, TextKey::SkillsTitle)
        );
        for category in &b.skill_categories {
            out.push_str(&format!("\n<sub>{}</sub>\n", category.name));
            for skill in &category.skills {
                out.push_str(&format!(
                    "  {:<24}<bar level=\"{}\"/> <muted>{:>3}%</muted>\n",
                    skill.name, skill.level, skill.level,
                ));
            }
        }
        out
    }

    fn render_certs(&self) -> String {
        let b = self.catalog.bundle(self.lang);
        let mut out = format!(
            "<title>{}</title>\n",
            self.catalog.translate(self.lang, TextKey::CertsTitle)
        );
        for cert in &b.certifications {
            out.push('\n');
            out.push_str(&format!("🏆 <b>{}</b>\n", cert.name));
            out.push_str(&format!("   {}\n", cert.issuer));
            out.push_str(&format!(
                "   <muted>{} · ID: {}</muted>\n",
                cert.date, cert.credential_id,
            ));
        }
        out
    }

    fn render_contact(&self) -> String {
        let b = self.catalog.bundle(self.lang);
        let mut out = format!(
            "<title>{}</title>\n\n",
            self.catalog.translate(self.lang, TextKey::ContactTitle)
        );
        for item in &b.contacts {
            out.push_str(&format!(
                "{} {}: <link url=\"{}\">{}</link>\n",
                item.icon, item.label, item.url, item.value,
            ));
        }
        out.push_str(&format!(
            "\n💬 <muted>{}</muted>",
            self.catalog.translate(self.lang, TextKey::ContactNote)
        ));
        out
    }

    fn render_help(&self) -> String {
        let b = self.catalog.bundle(self.lang);
        let mut out = format!(
            "<title>{}</title>\n\n",
            self.catalog.translate(self.lang, TextKey::HelpTitle)
        );
        for entry in &b.help {
            out.push_str(&format!(
                "<hl>{:<12}</hl> <muted>-</muted> {}\n",
                entry.command, entry.description,
            ));
        }
        out
    }

    #[cfg(test)]
    fn seq(&self) -> u64 {
        self.seq
    }

    #[cfg(test)]
    fn is_quiescent(&self) -> bool {
        self.typewriter.is_none() && self.pending.is_none()
    }
}

fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(5);

    fn session() -> TerminalSession {
        TerminalSession::new(
            Catalog::new(),
            Lang::En,
            TypingSpeed {
                per_char: Duration::from_millis(10),
                newline_pause: 3,
            },
            "guest",
            "portfolio",
            true,
        )
    }

    fn display_text(session: &TerminalSession) -> String {
        session
            .display_lines()
            .iter()
            .map(Line::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tick until the session settles (animation and pending drained).
    fn settle(session: &mut TerminalSession, mut now: Instant) -> Instant {
        for _ in 0..100_000 {
            session.tick(now);
            if session.is_quiescent() {
                return now;
            }
            now += TICK;
        }
        panic!("session did not settle");
    }

    fn type_input(session: &mut TerminalSession, text: &str) {
        for ch in text.chars() {
            session.insert_char(ch);
        }
    }

    #[test]
    fn dispatch_renders_echo_and_content() {
        let t0 = Instant::now();
        let mut s = session();
        s.execute_command("help", t0, false);

        let text = display_text(&s);
        assert!(text.contains("guest@portfolio:~$ help"));
        assert!(text.contains("whoami"));
        assert_eq!(s.current_command_id(), Some(CommandId::Help));
    }

    #[test]
    fn last_of_rapid_dispatches_wins() {
        let t0 = Instant::now();
        let mut s = session();

        s.execute_command("whoami", t0, true);
        s.tick(t0);
        s.execute_command("help", t0 + Duration::from_millis(1), true);
        s.execute_command("skills", t0 + Duration::from_millis(2), true);

        let end = settle(&mut s, t0 + Duration::from_millis(3));
        let text = display_text(&s);
        let skills_title = s.catalog().translate(Lang::En, TextKey::SkillsTitle);
        let help_title = s.catalog().translate(Lang::En, TextKey::HelpTitle).to_string();

        assert!(text.contains("$ skills"));
        assert!(text.contains(skills_title));
        assert!(!text.contains(help_title.as_str()));

        // Nothing left to resurrect the superseded render.
        s.tick(end + Duration::from_secs(1));
        assert!(!display_text(&s).contains(help_title.as_str()));
    }

    #[test]
    fn deferred_dispatch_waits_out_the_grace_period() {
        let t0 = Instant::now();
        let mut s = session();

        s.execute_command("whoami", t0, true);
        s.tick(t0);
        let partial = display_text(&s);
        assert!(partial.contains("$ whoami"));

        s.execute_command("help", t0 + Duration::from_millis(5), true);

        // The cancelled animation is acknowledged first; its partial output
        // stays while the grace period runs.
        s.tick(t0 + Duration::from_millis(6));
        assert!(display_text(&s).contains("$ whoami"));
        assert!(!s.is_typing());

        // After the grace period the new command renders.
        s.tick(t0 + Duration::from_millis(30));
        assert!(display_text(&s).contains("$ help"));
    }

    #[test]
    fn switching_to_current_language_is_a_noop() {
        let t0 = Instant::now();
        let mut s = session();
        s.execute_command("whoami", t0, false);
        let seq = s.seq();
        let before = display_text(&s);

        s.switch_language(Lang::En, t0 + Duration::from_millis(1));

        assert_eq!(s.seq(), seq);
        assert_eq!(display_text(&s), before);
    }

    #[test]
    fn language_round_trip_rerenders_identically() {
        let t0 = Instant::now();
        let mut s = session();
        s.execute_command("experience", t0, false);
        let before = display_text(&s);

        s.switch_language(Lang::Es, t0 + Duration::from_millis(1));
        let spanish = display_text(&s);
        assert_ne!(spanish, before);

        s.switch_language(Lang::En, t0 + Duration::from_millis(2));
        assert_eq!(display_text(&s), before);
    }

    #[test]
    fn language_switch_without_command_shows_welcome() {
        let t0 = Instant::now();
        let mut s = session();
        s.show_welcome(t0);
        let end = settle(&mut s, t0);

        s.switch_language(Lang::Es, end);
        settle(&mut s, end);
        let text = display_text(&s);
        assert!(text.contains("Bienvenido"));
        assert_eq!(s.status_line(), "Funciona a base de café y tareas cron");
    }

    #[test]
    fn click_to_skip_completes_content_and_clears_flag() {
        let t0 = Instant::now();
        let mut s = session();
        s.execute_command("whoami", t0, true);
        s.tick(t0);
        assert!(s.is_typing());

        assert!(s.complete_typing_instantly(t0 + Duration::from_millis(1)));
        assert!(!s.is_typing());

        // Same content as an unanimated dispatch.
        let mut reference = session();
        reference.execute_command("whoami", t0, false);
        assert_eq!(display_text(&s), display_text(&reference));
    }

    #[test]
    fn skip_without_animation_in_flight_is_inert() {
        let t0 = Instant::now();
        let mut s = session();
        assert!(!s.complete_typing_instantly(t0));
    }

    #[test]
    fn clear_resets_to_welcome_banner() {
        let t0 = Instant::now();
        let mut s = session();
        s.execute_command("whoami", t0, false);
        let end = settle(&mut s, t0);

        s.execute_command("clear", end, true);
        settle(&mut s, end);

        let text = display_text(&s);
        assert!(text.contains("Welcome to the portfolio"));
        assert!(!text.contains("$ clear"));
        assert_eq!(s.current_command_id(), None);
    }

    #[test]
    fn unknown_command_renders_diagnostic_with_token() {
        let t0 = Instant::now();
        let mut s = session();
        type_input(&mut s, "foo");
        s.submit(t0);
        settle(&mut s, t0);

        let text = display_text(&s);
        assert!(text.contains("bash: foo:"));
        assert!(text.contains("command not found"));
        assert_eq!(s.current_command_id(), None);
        assert_eq!(s.history.len(), 1);
        assert_eq!(s.history.cursor(), 1);
    }

    #[test]
    fn submit_records_history_and_recalls_in_reverse() {
        let t0 = Instant::now();
        let mut s = session();
        for (i, cmd) in ["help", "clear", "whoami"].iter().enumerate() {
            type_input(&mut s, cmd);
            s.submit(t0 + Duration::from_secs(i as u64));
            settle(&mut s, t0 + Duration::from_secs(i as u64));
        }

        s.history_prev();
        assert_eq!(s.input(), "whoami");
        s.history_prev();
        assert_eq!(s.input(), "clear");
        s.history_prev();
        assert_eq!(s.input(), "help");

        s.history_next();
        s.history_next();
        assert_eq!(s.input(), "whoami");
        s.history_next();
        assert_eq!(s.input(), "");
    }

    #[test]
    fn submit_ignores_blank_input() {
        let t0 = Instant::now();
        let mut s = session();
        type_input(&mut s, "   ");
        s.submit(t0);

        assert!(s.history.is_empty());
        assert_eq!(s.seq(), 0);
    }

    #[test]
    fn autocomplete_unique_prefix_completes() {
        let mut s = session();
        type_input(&mut s, "who");
        s.autocomplete();
        assert_eq!(s.input(), "whoami");
    }

    #[test]
    fn autocomplete_ambiguous_and_unknown_leave_input() {
        let mut s = session();
        type_input(&mut s, "e");
        s.autocomplete();
        assert_eq!(s.input(), "e");

        let mut s = session();
        s.autocomplete();
        assert_eq!(s.input(), "");

        let mut s = session();
        type_input(&mut s, "xyz");
        s.autocomplete();
        assert_eq!(s.input(), "xyz");
    }

    #[test]
    fn autocomplete_is_case_insensitive() {
        let mut s = session();
        type_input(&mut s, "WHO");
        s.autocomplete();
        assert_eq!(s.input(), "whoami");
    }

    #[test]
    fn welcome_banner_types_out() {
        let t0 = Instant::now();
        let mut s = session();
        s.show_welcome(t0);
        assert!(s.is_typing());

        settle(&mut s, t0);
        assert!(display_text(&s).contains("Welcome to the portfolio"));
    }

    #[test]
    fn bar_progress_runs_after_reveal() {
        let t0 = Instant::now();
        let mut s = session();
        s.execute_command("skills", t0, false);

        assert!(s.bar_progress(t0) < 0.05);
        assert!(s.bar_progress(t0 + Duration::from_millis(300)) > 0.5);
        assert!((s.bar_progress(t0 + Duration::from_secs(2)) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn notice_expires() {
        let t0 = Instant::now();
        let mut s = session();
        s.set_notice("copied", t0);
        assert_eq!(s.notice(), Some("copied"));

        s.tick(t0 + Duration::from_secs(3));
        assert_eq!(s.notice(), None);
    }
}
