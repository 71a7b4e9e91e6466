//! Variable-timestep simulation step
//!
//! `advance` moves the world forward by one frame's delta: physics
//! integration, pipe feed, scoring, and collision detection. `flap` and
//! `reset` are the only other entry points that mutate the world; the
//! phase machine transitions nowhere else.

use rand::Rng;

use super::state::{GamePhase, GameState, Intent, Pipe};
use crate::consts::{MAX_FRAME_DT, PIPE_EDGE_MARGIN, PIPE_RETIRE_X, PIPE_SPAWN_LEAD};
use crate::tuning::Tunables;

/// Advance the world by `dt` seconds.
///
/// No-op outside `Running`. The step is clamped to [`MAX_FRAME_DT`] so a
/// frame arriving after a tab suspend integrates one bounded step instead
/// of tunneling the bird through geometry.
pub fn advance(state: &mut GameState, dt: f32, tun: &Tunables) {
    if state.phase != GamePhase::Running {
        return;
    }
    let dt = dt.min(MAX_FRAME_DT);

    // Bird physics
    state.bird.vel_y += tun.gravity * dt;
    state.bird.pos.y += state.bird.vel_y * dt;

    // Hard floor: clamp and end the run
    let half = state.bird.half();
    let floor_y = tun.floor_y();
    if state.bird.pos.y + half >= floor_y {
        state.bird.pos.y = floor_y - half;
        game_over(state);
    }
    // Soft ceiling: clamp and kill the velocity, the run continues
    if state.bird.pos.y - half <= 0.0 {
        state.bird.pos.y = half;
        state.bird.vel_y = 0.0;
    }

    // Pipe feed
    let distance = tun.pipe_speed * dt;
    state.distance_since_spawn += distance;
    if state.distance_since_spawn >= tun.pipe_spawn_distance {
        state.distance_since_spawn = 0.0;
        spawn_pipe(state, tun);
    }

    for pipe in &mut state.pipes {
        pipe.x -= distance;
    }
    // Retire from the front only; spawn order == x order, so this is FIFO
    while state
        .pipes
        .front()
        .is_some_and(|p| p.trailing_x(tun) < PIPE_RETIRE_X)
    {
        state.pipes.pop_front();
    }

    // Scoring and pipe collision in one pass
    let bird_rect = state.bird.rect();
    let bird_x = state.bird.pos.x;
    let mut hit = false;
    let mut passed = 0u32;
    for pipe in &mut state.pipes {
        if !pipe.scored && pipe.trailing_x(tun) < bird_x {
            pipe.scored = true;
            passed += 1;
        }
        let (top, bottom) = pipe.rects(tun);
        if bird_rect.overlaps(&top) || bird_rect.overlaps(&bottom) {
            hit = true;
        }
    }
    state.score += passed;
    if hit {
        game_over(state);
    }
}

/// Primary-action response while airborne or waiting.
///
/// `Ready` starts the run with zero velocity; `Running` applies the flap
/// impulse; `GameOver` ignores it (the driver maps that to [`reset`]).
pub fn flap(state: &mut GameState, tun: &Tunables) {
    match state.phase {
        GamePhase::Ready => {
            state.phase = GamePhase::Running;
            state.bird.vel_y = 0.0;
        }
        GamePhase::Running => {
            state.bird.vel_y = tun.flap_impulse;
        }
        GamePhase::GameOver => {}
    }
}

/// Full reset back to `Ready`: empty pipe queue, zeroed feed accumulator
/// and score, bird re-placed from the tunables. Best score is untouched.
pub fn reset(state: &mut GameState, tun: &Tunables) {
    state.pipes.clear();
    state.distance_since_spawn = 0.0;
    state.score = 0;
    state.phase = GamePhase::Ready;
    state.refit(tun);
}

/// End the run. Idempotent: the best score is raised at most once per run,
/// on the `Running -> GameOver` edge.
pub fn game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    if state.score > state.best_score {
        state.best_score = state.score;
        log::info!("new best score: {}", state.best_score);
    }
}

/// Apply one drained input intent
pub fn apply_intent(state: &mut GameState, intent: Intent, tun: &Tunables) {
    match intent {
        Intent::Flap => flap(state, tun),
        Intent::Reset => reset(state, tun),
    }
}

/// Spawn one pipe just past the right viewport edge.
///
/// Gap and top height are sampled uniformly so the opening always fits
/// inside the viewport interior with the edge margin above the gap and
/// above the ground. The span guard degrades silently at extreme aspect
/// ratios instead of sampling a negative range.
fn spawn_pipe(state: &mut GameState, tun: &Tunables) {
    let gap = state
        .rng
        .random_range(tun.min_gap..=tun.max_gap)
        .round();
    let min_top = PIPE_EDGE_MARGIN;
    let max_top = tun.floor_y() - gap - PIPE_EDGE_MARGIN;
    let span = (max_top - min_top).max(0.0);
    let top_height = (min_top + state.rng.random_range(0.0..=span)).round();

    state.pipes.push_back(Pipe {
        x: tun.view_width + PIPE_SPAWN_LEAD,
        top_height,
        gap,
        scored: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tunables() -> Tunables {
        Tunables::for_viewport(800.0, 600.0)
    }

    fn running_state(tun: &Tunables) -> GameState {
        let mut state = GameState::new(42, tun);
        flap(&mut state, tun);
        state
    }

    fn push_pipe(state: &mut GameState, x: f32, top_height: f32, gap: f32) {
        state.pipes.push_back(Pipe {
            x,
            top_height,
            gap,
            scored: false,
        });
    }

    #[test]
    fn test_flap_starts_run_with_zero_velocity() {
        let tun = tunables();
        let mut state = GameState::new(42, &tun);
        assert_eq!(state.phase, GamePhase::Ready);

        flap(&mut state, &tun);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.bird.vel_y, 0.0);

        flap(&mut state, &tun);
        assert_eq!(state.bird.vel_y, tun.flap_impulse);
    }

    #[test]
    fn test_flap_noop_after_game_over() {
        let tun = tunables();
        let mut state = running_state(&tun);
        game_over(&mut state);
        flap(&mut state, &tun);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_advance_noop_outside_running() {
        let tun = tunables();
        for phase in [GamePhase::Ready, GamePhase::GameOver] {
            let mut state = GameState::new(42, &tun);
            state.phase = phase;
            let before = (state.bird.pos, state.bird.vel_y, state.score);
            advance(&mut state, 0.5, &tun);
            assert_eq!(before, (state.bird.pos, state.bird.vel_y, state.score));
            assert_eq!(state.phase, phase);
            assert!(state.pipes.is_empty());
        }
    }

    #[test]
    fn test_integration_step() {
        // gravity=2400 at 600px tall; one 20ms step from rest
        let tun = tunables();
        let mut state = running_state(&tun);
        let y0 = state.bird.pos.y;

        advance(&mut state, 0.02, &tun);
        assert!((state.bird.vel_y - 48.0).abs() < 1e-3);
        assert!((state.bird.pos.y - (y0 + 48.0 * 0.02)).abs() < 1e-3);
    }

    #[test]
    fn test_dt_clamped_to_max_step() {
        let tun = tunables();
        let mut state = running_state(&tun);

        // A 100ms hitch integrates as one 33ms step
        advance(&mut state, 0.1, &tun);
        assert!((state.bird.vel_y - tun.gravity * MAX_FRAME_DT).abs() < 1e-3);
    }

    #[test]
    fn test_floor_is_hard() {
        let tun = tunables();
        let mut state = running_state(&tun);
        state.bird.pos.y = tun.floor_y() - 1.0;
        state.bird.vel_y = 500.0;

        advance(&mut state, MAX_FRAME_DT, &tun);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.bird.pos.y, tun.floor_y() - state.bird.half());
    }

    #[test]
    fn test_ceiling_is_soft() {
        let tun = tunables();
        let mut state = running_state(&tun);
        state.bird.pos.y = 1.0;
        state.bird.vel_y = -600.0;

        advance(&mut state, MAX_FRAME_DT, &tun);
        // Clamped and stopped, but the run continues
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.bird.pos.y, state.bird.half());
        assert_eq!(state.bird.vel_y, 0.0);
    }

    #[test]
    fn test_spawn_geometry_in_bounds() {
        let tun = tunables();
        let mut state = running_state(&tun);
        for _ in 0..50 {
            spawn_pipe(&mut state, &tun);
        }
        for pipe in &state.pipes {
            assert_eq!(pipe.x, tun.view_width + PIPE_SPAWN_LEAD);
            assert!(pipe.gap >= tun.min_gap && pipe.gap <= tun.max_gap);
            assert!(pipe.top_height >= PIPE_EDGE_MARGIN);
            // Opening bottom stays above the ground margin (rounding slack)
            assert!(pipe.top_height + pipe.gap <= tun.floor_y() - PIPE_EDGE_MARGIN + 1.0);
        }
    }

    #[test]
    fn test_feed_spawns_after_spawn_distance() {
        let tun = tunables();
        let mut state = running_state(&tun);

        let dt = 0.02;
        let mut travelled = 0.0;
        while state.pipes.is_empty() {
            state.bird.vel_y = 0.0;
            state.bird.pos.y = tun.bird_start_y;
            advance(&mut state, dt, &tun);
            travelled += tun.pipe_speed * dt;
            assert!(travelled < tun.pipe_spawn_distance + 100.0, "no spawn");
        }
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.distance_since_spawn, 0.0);
    }

    #[test]
    fn test_score_increments_once_per_pipe() {
        let tun = tunables();
        let mut state = running_state(&tun);
        // Pipe whose trailing edge is just right of the bird; keep the gap
        // centered on the bird so there is no collision
        let top = state.bird.pos.y - 150.0;
        let x = state.bird.pos.x - tun.pipe_width + 5.0;
        push_pipe(&mut state, x, top, 300.0);

        state.bird.vel_y = 0.0;
        advance(&mut state, 0.02, &tun);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].scored);

        // Further advances never re-score the same pipe
        for _ in 0..10 {
            state.bird.vel_y = 0.0;
            state.bird.pos.y = tun.bird_start_y;
            let before = state.score;
            advance(&mut state, 0.02, &tun);
            assert!(state.score >= before);
            assert!(state.score <= 1);
        }
    }

    #[test]
    fn test_pipe_collision_ends_run() {
        let tun = tunables();
        let mut state = running_state(&tun);
        // Top segment covering the bird's position
        let x = state.bird.pos.x - 5.0;
        let top = state.bird.pos.y + 100.0;
        push_pipe(&mut state, x, top, 150.0);

        state.bird.vel_y = 0.0;
        advance(&mut state, 0.001, &tun);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_retirement_is_fifo() {
        let tun = tunables();
        let mut state = running_state(&tun);
        state.bird.pos.y = tun.bird_start_y;

        // Three pipes: the first just about to cross the retire threshold,
        // the others strictly to its right
        push_pipe(&mut state, PIPE_RETIRE_X - tun.pipe_width - 1.0, 40.0, 200.0);
        push_pipe(&mut state, 600.0, 40.0, 200.0);
        push_pipe(&mut state, 700.0, 40.0, 200.0);
        for p in &mut state.pipes {
            p.scored = true;
        }

        state.bird.vel_y = 0.0;
        advance(&mut state, 0.001, &tun);
        assert_eq!(state.pipes.len(), 2);
        // Remaining pipes keep their relative order
        assert!(state.pipes[0].x < state.pipes[1].x);
        assert!((state.pipes[1].x - state.pipes[0].x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_game_over_updates_best_once() {
        let tun = tunables();
        let mut state = running_state(&tun);
        state.score = 5;
        state.best_score = 3;

        game_over(&mut state);
        assert_eq!(state.best_score, 5);

        // Re-entry changes nothing, even if score moved afterwards
        state.score = 9;
        game_over(&mut state);
        assert_eq!(state.best_score, 5);
    }

    #[test]
    fn test_best_score_never_lowered() {
        let tun = tunables();
        let mut state = running_state(&tun);
        state.score = 2;
        state.best_score = 10;
        game_over(&mut state);
        assert_eq!(state.best_score, 10);
    }

    #[test]
    fn test_reset_idempotent() {
        let tun = tunables();
        let mut state = running_state(&tun);
        state.score = 4;
        state.best_score = 4;
        push_pipe(&mut state, 300.0, 100.0, 180.0);
        game_over(&mut state);

        reset(&mut state, &tun);
        let once = state.clone();
        reset(&mut state, &tun);

        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.distance_since_spawn, 0.0);
        assert_eq!(state.best_score, 4);
        assert_eq!(state.bird.pos, once.bird.pos);
        assert_eq!(state.bird.vel_y, once.bird.vel_y);
    }

    #[test]
    fn test_intents() {
        let tun = tunables();
        let mut state = GameState::new(42, &tun);

        apply_intent(&mut state, Intent::Flap, &tun);
        assert_eq!(state.phase, GamePhase::Running);

        game_over(&mut state);
        apply_intent(&mut state, Intent::Reset, &tun);
        assert_eq!(state.phase, GamePhase::Ready);
    }

    #[test]
    fn test_same_seed_same_feed() {
        let tun = tunables();
        let mut a = running_state(&tun);
        let mut b = running_state(&tun);
        a.bird.pos.y = tun.bird_start_y;
        b.bird.pos.y = tun.bird_start_y;

        for _ in 0..600 {
            // Hover so both runs survive identically
            a.bird.vel_y = 0.0;
            b.bird.vel_y = 0.0;
            advance(&mut a, 0.016, &tun);
            advance(&mut b, 0.016, &tun);
            a.bird.pos.y = tun.bird_start_y;
            b.bird.pos.y = tun.bird_start_y;
        }

        assert_eq!(a.pipes.len(), b.pipes.len());
        for (pa, pb) in a.pipes.iter().zip(b.pipes.iter()) {
            assert_eq!(pa.top_height, pb.top_height);
            assert_eq!(pa.gap, pb.gap);
        }
    }
}
