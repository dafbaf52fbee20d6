//! Core terminal session components.
//!
//! - `markup`: content markup parsing and span flattening
//! - `typewriter`: the interruptible character-by-character reveal
//! - `session`: command dispatch and session state

pub mod markup;
pub mod session;
pub mod typewriter;

pub use session::{CommandId, TerminalSession, TypingSpeed};
