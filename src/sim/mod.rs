//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Pipe queue mutated in strict FIFO order
//! - No rendering or platform dependencies

pub mod rect;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use state::{Bird, GamePhase, GameState, Intent, Pipe};
pub use tick::{advance, apply_intent, flap, game_over, reset};
