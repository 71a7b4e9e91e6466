//! Game state and core simulation types
//!
//! The world is one `GameState`: the bird, the pipe queue, score, and the
//! phase machine. It is mutated only by the operations in `tick`.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tunables;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first primary action
    Ready,
    /// Active gameplay
    Running,
    /// Run ended; next primary action resets
    GameOver,
}

/// Input intents delivered by the host.
///
/// The input adapter enqueues these; the frame driver drains the queue once
/// per tick, immediately before `advance`, so all mutation stays inside the
/// tick even when the host delivers events asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Flap,
    Reset,
}

/// The player's bird
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bird {
    /// Position of the bird's center; x is viewport-derived, y is free
    pub pos: Vec2,
    /// Bounding-square side (diameter)
    pub size: f32,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
}

impl Bird {
    /// Half the bounding-square side
    #[inline]
    pub fn half(&self) -> f32 {
        self.size / 2.0
    }

    /// Collision rectangle
    pub fn rect(&self) -> Rect {
        Rect::centered_square(self.pos, self.size)
    }
}

/// A gated pipe obstacle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pipe {
    /// Leading-edge x
    pub x: f32,
    /// Height of the top solid segment
    pub top_height: f32,
    /// Vertical opening below the top segment
    pub gap: f32,
    /// Set once the pipe has contributed to the score
    pub scored: bool,
}

impl Pipe {
    /// The two solid rectangles of this pipe (top, bottom)
    pub fn rects(&self, tun: &Tunables) -> (Rect, Rect) {
        let top = Rect::new(self.x, 0.0, tun.pipe_width, self.top_height);
        let bottom_y = self.top_height + self.gap;
        let bottom = Rect::new(
            self.x,
            bottom_y,
            tun.pipe_width,
            tun.floor_y() - bottom_y,
        );
        (top, bottom)
    }

    /// Trailing-edge x
    #[inline]
    pub fn trailing_x(&self, tun: &Tunables) -> f32 {
        self.x + tun.pipe_width
    }
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Stream feeding pipe geometry sampling
    pub rng: Pcg32,
    pub bird: Bird,
    /// Pipes in spawn order; appended at the back, retired from the front,
    /// so x-order is preserved at all times
    pub pipes: VecDeque<Pipe>,
    /// Horizontal distance travelled since the last spawn
    pub distance_since_spawn: f32,
    /// Pipes passed this run
    pub score: u32,
    /// Best score across runs; raised at game over, persisted by the driver
    pub best_score: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Create a fresh world in `Ready` phase, placed per the given tunables
    pub fn new(seed: u64, tun: &Tunables) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bird: Bird {
                pos: Vec2::new(tun.bird_x, tun.bird_start_y),
                size: tun.bird_size,
                vel_y: 0.0,
            },
            pipes: VecDeque::new(),
            distance_since_spawn: 0.0,
            score: 0,
            best_score: 0,
            phase: GamePhase::Ready,
        }
    }

    /// Apply a new tunables snapshot after a resize.
    ///
    /// Size and x always follow the viewport; y and velocity are only reset
    /// in `Ready`, so a mid-run resize never teleports the bird.
    pub fn refit(&mut self, tun: &Tunables) {
        self.bird.size = tun.bird_size;
        self.bird.pos.x = tun.bird_x;
        if self.phase == GamePhase::Ready {
            self.bird.pos.y = tun.bird_start_y;
            self.bird.vel_y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tunables() -> Tunables {
        Tunables::for_viewport(800.0, 600.0)
    }

    #[test]
    fn test_new_state_ready() {
        let tun = tunables();
        let state = GameState::new(7, &tun);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird.pos, Vec2::new(tun.bird_x, tun.bird_start_y));
        assert_eq!(state.bird.vel_y, 0.0);
    }

    #[test]
    fn test_refit_ready_repositions() {
        let tun = tunables();
        let mut state = GameState::new(7, &tun);
        state.bird.pos.y = 999.0;
        state.bird.vel_y = 123.0;

        let bigger = Tunables::for_viewport(1200.0, 900.0);
        state.refit(&bigger);
        assert_eq!(state.bird.pos.y, bigger.bird_start_y);
        assert_eq!(state.bird.vel_y, 0.0);
        assert_eq!(state.bird.pos.x, bigger.bird_x);
        assert_eq!(state.bird.size, bigger.bird_size);
    }

    #[test]
    fn test_refit_running_keeps_motion() {
        let tun = tunables();
        let mut state = GameState::new(7, &tun);
        state.phase = GamePhase::Running;
        state.bird.pos.y = 137.0;
        state.bird.vel_y = -250.0;

        let bigger = Tunables::for_viewport(1200.0, 900.0);
        state.refit(&bigger);
        // Only size and x follow the viewport mid-run
        assert_eq!(state.bird.pos.y, 137.0);
        assert_eq!(state.bird.vel_y, -250.0);
        assert_eq!(state.bird.pos.x, bigger.bird_x);
        assert_eq!(state.bird.size, bigger.bird_size);
    }

    #[test]
    fn test_pipe_rects() {
        let tun = tunables();
        let pipe = Pipe {
            x: 500.0,
            top_height: 120.0,
            gap: 160.0,
            scored: false,
        };
        let (top, bottom) = pipe.rects(&tun);
        assert_eq!(top, Rect::new(500.0, 0.0, tun.pipe_width, 120.0));
        assert_eq!(bottom.y, 280.0);
        // Bottom segment reaches exactly down to the ground
        assert_eq!(bottom.y + bottom.h, tun.floor_y());
    }
}
