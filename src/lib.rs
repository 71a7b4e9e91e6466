//! Flappy Glide - a viewport-adaptive Flappy Bird clone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipe feed, collisions, game state)
//! - `tuning`: Viewport-derived game balance
//! - `render`: Canvas-2D presentation
//! - `bestscore`: Best-score persistence (LocalStorage on web)

pub mod bestscore;
pub mod render;
pub mod sim;
pub mod tuning;

pub use bestscore::BestScore;
pub use tuning::Tunables;

/// Game configuration constants
pub mod consts {
    /// Maximum physics step per frame (seconds). Frames arriving late after
    /// a tab suspend are clamped to this instead of integrating a huge step.
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Horizontal lead past the right viewport edge where pipes spawn
    pub const PIPE_SPAWN_LEAD: f32 = 10.0;
    /// Pipes whose trailing edge crosses this x are retired
    pub const PIPE_RETIRE_X: f32 = -60.0;
    /// Vertical margin kept clear above the gap and above the ground
    pub const PIPE_EDGE_MARGIN: f32 = 40.0;

    /// Minimum viewport dimensions; smaller viewports are floored to these
    pub const MIN_VIEW_WIDTH: f32 = 320.0;
    pub const MIN_VIEW_HEIGHT: f32 = 480.0;

    /// Device pixel ratio cap for the canvas backing store
    pub const MAX_DEVICE_PIXEL_RATIO: f64 = 3.0;
}

/// Round to the nearest integer, then clamp to `[min, max]`
#[inline]
pub fn round_clamp(value: f32, min: f32, max: f32) -> f32 {
    value.round().clamp(min, max)
}
