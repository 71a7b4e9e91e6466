//! Viewport-derived game balance
//!
//! Every size-dependent parameter (gravity, speeds, gaps, entity sizes) is a
//! clamped linear function of the viewport dimensions, so the game stays
//! playable from phone portrait up to ultrawide desktop. `Tunables` is a
//! value snapshot: recomputed on resize and swapped in between ticks.

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_VIEW_HEIGHT, MIN_VIEW_WIDTH};
use crate::round_clamp;

/// The full tunable set for one viewport size.
///
/// Pure function of `(width, height)`: same inputs always produce the same
/// snapshot. Units are logical pixels and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tunables {
    /// Viewport width after flooring to the minimum
    pub view_width: f32,
    /// Viewport height after flooring to the minimum
    pub view_height: f32,
    /// Height of the ground strip at the bottom of the viewport
    pub ground_height: f32,
    /// Horizontal extent of a pipe
    pub pipe_width: f32,
    /// Smallest gap the spawner may sample
    pub min_gap: f32,
    /// Largest gap the spawner may sample
    pub max_gap: f32,
    /// Leftward pipe speed, pixels/second
    pub pipe_speed: f32,
    /// Horizontal distance between successive spawns
    pub pipe_spawn_distance: f32,
    /// Bird bounding-square side (diameter)
    pub bird_size: f32,
    /// Fixed bird x position
    pub bird_x: f32,
    /// Bird y position at the start of a run
    pub bird_start_y: f32,
    /// Downward acceleration, pixels/second^2
    pub gravity: f32,
    /// Upward velocity applied by a flap (negative = up)
    pub flap_impulse: f32,
}

impl Tunables {
    /// Derive the tunable set for a viewport.
    ///
    /// Dimensions below the documented minimums (320x480) are floored, not
    /// rejected.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let w = width.max(MIN_VIEW_WIDTH);
        let h = height.max(MIN_VIEW_HEIGHT);

        Self {
            view_width: w,
            view_height: h,
            ground_height: round_clamp(h * 0.18, 80.0, 140.0),
            pipe_width: round_clamp(w * 0.13, 52.0, 90.0),
            min_gap: round_clamp(h * 0.22, 140.0, 200.0),
            max_gap: round_clamp(h * 0.28, 180.0, 260.0),
            pipe_speed: round_clamp(w * 0.42, 160.0, 260.0),
            pipe_spawn_distance: round_clamp(w * 0.42, 220.0, 360.0),
            bird_size: round_clamp(w * 0.05, 18.0, 30.0),
            bird_x: (w * 0.28).round(),
            bird_start_y: (h * 0.42).round(),
            gravity: round_clamp(h * 4.0, 1600.0, 2600.0),
            flap_impulse: round_clamp(-h, -800.0, -520.0),
        }
    }

    /// Top of the ground strip; the bird dies at this line
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.view_height - self.ground_height
    }
}
