//! User interface rendering and input handling.

mod keymapper;
mod renderer;

pub use keymapper::{Action, KeyMapper};
pub use renderer::{HitTarget, Renderer, SetupError};
