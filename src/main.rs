//! termfolio - an interactive portfolio for the console
//!
//! termfolio renders a portfolio's interactive layer as a terminal
//! application: a hero landing screen and a simulated shell that answers a
//! small command vocabulary with bilingual content, typed out character by
//! character.
//!
//! # Features
//!
//! - **Two views**: hero landing screen and the terminal, switchable by
//!   keyboard or mouse
//! - **Typed reveal**: command output types itself out and can be skipped
//!   with a click or interrupted by the next command
//! - **Bilingual content**: English and Spanish, switchable mid-session
//! - **Command history**: arrow-key recall, Tab completion
//! - **Color schemes**: crt, solarized-dark, dracula, gruvbox-dark,
//!   tokyo-night
//!
//! # Quick Start
//!
//! ```text
//! termfolio              # landing screen, defaults from config.toml
//! termfolio -l es        # start in Spanish
//! termfolio --instant    # disable the typing animation
//! ```
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | Enter / t | Open the terminal (from the landing screen) |
//! | Esc | Back to the landing screen |
//! | Enter | Run the typed command |
//! | Tab | Autocomplete |
//! | ↑ / ↓ | Command history |
//! | F2 | Toggle language |
//! | PageUp / PageDown | Scroll output |
//! | q (landing) / Ctrl+C | Quit |

mod config;
mod content;
mod core;
mod history;
mod ui;
mod view;

use std::env;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::{ColorScheme, Config};
use crate::content::{Catalog, Lang};
use crate::core::session::{TerminalSession, TypingSpeed};
use crate::ui::{Action, HitTarget, KeyMapper, Renderer};
use crate::view::{View, ViewController};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command line options
#[derive(Default)]
struct CliArgs {
    /// Startup language override
    lang: Option<String>,
    /// Color scheme override
    scheme: Option<String>,
    /// Disable the typing animation
    instant: bool,
}

fn print_version() {
    eprintln!("termfolio {}", VERSION);
}

fn print_help() {
    eprintln!("termfolio {} - an interactive portfolio for the console", VERSION);
    eprintln!();
    eprintln!("Usage: termfolio [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -l, --lang <CODE>     Startup language (en, es)");
    eprintln!("  -s, --scheme <NAME>   Color scheme");
    eprintln!("      --instant         Disable the typing animation");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  Enter / t             Open the terminal (landing screen)");
    eprintln!("  Esc                   Back to the landing screen");
    eprintln!("  Tab                   Autocomplete the typed command");
    eprintln!("  Up / Down             Command history");
    eprintln!("  F2                    Toggle language");
    eprintln!("  PageUp / PageDown     Scroll the output");
    eprintln!("  q / Ctrl+C            Quit");
    eprintln!();
    eprintln!("Terminal commands: whoami, experience, education, skills,");
    eprintln!("                   certs, contact, help, clear");
    eprintln!();
    eprintln!("Configuration: ~/.termfolio/config.toml");
    eprintln!();
    eprintln!("Color schemes: {}", ColorScheme::list().join(", "));
}

fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = env::args().collect();
    let mut cli = CliArgs::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-l" | "--lang" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing language argument".to_string());
                }
                cli.lang = Some(args[i].clone());
            }
            "-s" | "--scheme" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing scheme argument".to_string());
                }
                cli.scheme = Some(args[i].clone());
            }
            "--instant" => {
                cli.instant = true;
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(cli)
}

/// Initialize logging to ~/.termfolio/termfolio.log
fn init_logging() {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from);

    let log_path = home
        .map(|h| h.join(".termfolio").join("termfolio.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("termfolio.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = match parse_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("termfolio starting...");

    let file_config = Config::load();

    // Command line overrides fail fast; file values fall back to defaults.
    let lang = match &cli.lang {
        Some(code) => Lang::parse(code)
            .with_context(|| format!("unknown language '{}' (expected: en, es)", code))?,
        None => match file_config.language.as_deref() {
            Some(code) => Lang::parse(code).unwrap_or_else(|| {
                warn!("unknown language '{}' in config, using en", code);
                Lang::En
            }),
            None => Lang::En,
        },
    };

    let scheme = match &cli.scheme {
        Some(name) => {
            if !ColorScheme::is_known(name) {
                anyhow::bail!(
                    "unknown color scheme '{}' (expected one of: {})",
                    name,
                    ColorScheme::list().join(", ")
                );
            }
            ColorScheme::by_name(name)
        }
        None => file_config.get_color_scheme(),
    };

    let speed = TypingSpeed {
        per_char: Duration::from_millis(file_config.typing.speed_ms),
        newline_pause: file_config.typing.newline_pause,
    };

    info!(
        lang = lang.code(),
        scheme = %scheme.name,
        instant = cli.instant,
        "configuration resolved"
    );

    let mut session = TerminalSession::new(
        Catalog::new(),
        lang,
        speed,
        &file_config.prompt.user,
        &file_config.prompt.host,
        !cli.instant,
    );
    let mut views = ViewController::new();
    let mut renderer = Renderer::new(scheme);

    renderer.init().context("failed to initialize terminal")?;

    // The welcome banner starts typing immediately, the way the original
    // page types it while the hero section is still showing.
    session.show_welcome(Instant::now());

    let result = run_main_loop(&mut views, &mut session, &mut renderer);

    let _ = renderer.cleanup();
    info!("termfolio exiting");
    result
}

/// Main event loop
fn run_main_loop(
    views: &mut ViewController,
    session: &mut TerminalSession,
    renderer: &mut Renderer,
) -> anyhow::Result<()> {
    let poll_timeout = Duration::from_millis(10);
    let mut dirty = true;
    let mut last_title = String::new();

    loop {
        let now = Instant::now();

        if session.tick(now) {
            dirty = true;
        }
        if views.tick(now) {
            dirty = true;
        }

        let title = session.window_title();
        if title != last_title {
            renderer.set_title(&title)?;
            last_title = title;
        }

        if dirty {
            renderer.render(views, session, now)?;
            dirty = false;
        }

        if !event::poll(poll_timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                let now = Instant::now();
                let Some(action) = KeyMapper::map(&key_event, views.current()) else {
                    continue;
                };

                // The input line only takes keys once the transition focus
                // has landed, like an unfocused input field.
                let needs_focus = matches!(
                    action,
                    Action::Submit
                        | Action::HistoryPrev
                        | Action::HistoryNext
                        | Action::Autocomplete
                        | Action::Backspace
                        | Action::Insert(_)
                );
                if needs_focus && !views.input_focused() {
                    continue;
                }

                match action {
                    Action::Quit => {
                        info!("quit requested");
                        break;
                    }
                    Action::OpenTerminal => views.show_terminal(now),
                    Action::OpenDashboard => views.show_dashboard(),
                    Action::CloseTerminal => views.handle_escape(),
                    Action::Submit => session.submit(now),
                    Action::HistoryPrev => session.history_prev(),
                    Action::HistoryNext => session.history_next(),
                    Action::Autocomplete => session.autocomplete(),
                    Action::ToggleLanguage => {
                        let next = session.lang().other();
                        session.switch_language(next, now);
                    }
                    Action::ScrollUp => session.scroll_up(5),
                    Action::ScrollDown => session.scroll_down(5),
                    Action::Backspace => session.backspace(),
                    Action::Insert(c) => session.insert_char(c),
                }
                dirty = true;
            }

            Event::Mouse(mouse_event) => {
                let now = Instant::now();
                match mouse_event.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        let target = renderer
                            .hit(mouse_event.column, mouse_event.row)
                            .cloned();
                        handle_click(views, session, target, now);
                        dirty = true;
                    }
                    MouseEventKind::ScrollUp if views.current() == View::Terminal => {
                        session.scroll_up(3);
                        dirty = true;
                    }
                    MouseEventKind::ScrollDown if views.current() == View::Terminal => {
                        session.scroll_down(3);
                        dirty = true;
                    }
                    _ => {}
                }
            }

            Event::Resize(cols, rows) => {
                info!("resize: {}x{}", cols, rows);
                renderer.resize(cols, rows);
                dirty = true;
            }

            _ => {}
        }
    }

    Ok(())
}

/// Route a left click to the control it landed on.
fn handle_click(
    views: &mut ViewController,
    session: &mut TerminalSession,
    target: Option<HitTarget>,
    now: Instant,
) {
    match (views.current(), target) {
        (View::Landing, Some(HitTarget::TerminalButton)) => views.show_terminal(now),
        (View::Landing, Some(HitTarget::DashboardButton)) => views.show_dashboard(),

        // The close control works regardless of anything else going on.
        (View::Terminal, Some(HitTarget::CloseControl)) => views.hide_terminal(),
        (View::Terminal, Some(HitTarget::LangButton(lang))) => {
            session.switch_language(lang, now);
        }
        (View::Terminal, Some(HitTarget::CommandButton(id))) => {
            let animate = session.animate_default();
            session.execute_command(id.name(), now, animate);
        }
        (View::Terminal, Some(HitTarget::Link(url))) => {
            copy_to_clipboard(session, &url, now);
        }
        // Any other click in the terminal body skips the animation.
        (View::Terminal, Some(HitTarget::Body)) | (View::Terminal, None) => {
            session.complete_typing_instantly(now);
        }
        _ => {}
    }
}

/// Copy a link target to the system clipboard with a transient notice.
fn copy_to_clipboard(session: &mut TerminalSession, url: &str, now: Instant) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(url.to_string()).is_ok() {
                session.set_notice("link copied to clipboard", now);
            } else {
                warn!("clipboard write failed");
            }
        }
        Err(e) => {
            warn!("clipboard unavailable: {}", e);
        }
    }
}
