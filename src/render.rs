//! Canvas-2D presentation
//!
//! Draws a read-only snapshot of the world each tick: sky, pipes, ground,
//! bird, score, and the phase overlays. Never mutates game state.

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use std::f64::consts::PI;

    use web_sys::CanvasRenderingContext2d;

    use crate::sim::{GamePhase, GameState};
    use crate::tuning::Tunables;

    const FONT_STACK: &str = "system-ui, -apple-system, Arial, sans-serif";

    pub struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasRenderer {
        pub fn new(ctx: CanvasRenderingContext2d) -> Self {
            Self { ctx }
        }

        /// Reset the context transform for a new backing-store scale
        pub fn set_pixel_ratio(&self, dpr: f64) {
            let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            let _ = self.ctx.scale(dpr, dpr);
        }

        pub fn render(&self, state: &GameState, tun: &Tunables) {
            self.draw_background(tun);
            self.draw_pipes(state, tun);
            self.draw_ground(tun);
            self.draw_bird(state);
            self.draw_score(state, tun);
            match state.phase {
                GamePhase::Running => {}
                GamePhase::Ready => self.draw_ready(state, tun),
                GamePhase::GameOver => self.draw_game_over(state, tun),
            }
        }

        fn draw_background(&self, tun: &Tunables) {
            let (w, h) = (tun.view_width as f64, tun.view_height as f64);
            self.ctx.set_fill_style_str("#70c5ce");
            self.ctx.fill_rect(0.0, 0.0, w, h);

            // Distant clouds
            self.ctx.set_fill_style_str("rgba(255,255,255,0.8)");
            let cloud_y = (h * 0.18).round();
            self.draw_cloud(40.0, cloud_y, 28.0);
            self.draw_cloud((w * 0.5).round(), (cloud_y * 0.8).round(), 24.0);
            self.draw_cloud((w * 0.8).round(), (cloud_y * 1.1).round(), 32.0);
        }

        fn draw_cloud(&self, x: f64, y: f64, r: f64) {
            self.ctx.begin_path();
            let _ = self.ctx.arc(x, y, r, 0.0, PI * 2.0);
            let _ = self.ctx.arc(x + r * 0.9, y + r * 0.3, r * 0.8, 0.0, PI * 2.0);
            let _ = self.ctx.arc(x - r * 0.8, y + r * 0.2, r * 0.7, 0.0, PI * 2.0);
            self.ctx.fill();
        }

        fn draw_ground(&self, tun: &Tunables) {
            let (w, h) = (tun.view_width as f64, tun.view_height as f64);
            let ground_h = tun.ground_height as f64;
            self.ctx.set_fill_style_str("#ded895");
            self.ctx.fill_rect(0.0, h - ground_h, w, ground_h);
            // Grass strip
            self.ctx.set_fill_style_str("#83d07b");
            self.ctx.fill_rect(0.0, h - ground_h, w, 20.0);
        }

        fn draw_pipes(&self, state: &GameState, tun: &Tunables) {
            let pipe_w = tun.pipe_width as f64;
            self.ctx.set_fill_style_str("#5ec45e");
            self.ctx.set_stroke_style_str("#3a9b3a");
            self.ctx.set_line_width(3.0);

            for pipe in &state.pipes {
                let x = pipe.x as f64;
                let top_h = pipe.top_height as f64;

                self.ctx.fill_rect(x, 0.0, pipe_w, top_h);
                self.ctx.stroke_rect(x, 0.0, pipe_w, top_h);
                // Top cap lip
                self.ctx.fill_rect(x - 3.0, top_h - 16.0, pipe_w + 6.0, 16.0);
                self.ctx.stroke_rect(x - 3.0, top_h - 16.0, pipe_w + 6.0, 16.0);

                let bottom_y = (pipe.top_height + pipe.gap) as f64;
                let bottom_h = tun.floor_y() as f64 - bottom_y;
                self.ctx.fill_rect(x, bottom_y, pipe_w, bottom_h);
                self.ctx.stroke_rect(x, bottom_y, pipe_w, bottom_h);
                // Bottom cap lip
                self.ctx.fill_rect(x - 3.0, bottom_y, pipe_w + 6.0, 16.0);
                self.ctx.stroke_rect(x - 3.0, bottom_y, pipe_w + 6.0, 16.0);
            }
        }

        fn draw_bird(&self, state: &GameState) {
            let (x, y) = (state.bird.pos.x as f64, state.bird.pos.y as f64);
            let r = state.bird.size as f64 / 2.0;

            // Body
            self.ctx.set_fill_style_str("#ffd94a");
            self.ctx.begin_path();
            let _ = self.ctx.arc(x, y, r, 0.0, PI * 2.0);
            self.ctx.fill();
            // Eye
            self.ctx.set_fill_style_str("#fff");
            self.ctx.begin_path();
            let _ = self.ctx.arc(x + r * 0.2, y - r * 0.2, r * 0.35, 0.0, PI * 2.0);
            self.ctx.fill();
            self.ctx.set_fill_style_str("#000");
            self.ctx.begin_path();
            let _ = self.ctx.arc(x + r * 0.35, y - r * 0.2, r * 0.12, 0.0, PI * 2.0);
            self.ctx.fill();
            // Beak
            self.ctx.set_fill_style_str("#ff9e3d");
            self.ctx.begin_path();
            self.ctx.move_to(x + r * 0.2, y + r * 0.05);
            self.ctx.line_to(x + r * 0.85, y + r * 0.2);
            self.ctx.line_to(x + r * 0.2, y + r * 0.35);
            self.ctx.close_path();
            self.ctx.fill();
        }

        fn draw_score(&self, state: &GameState, tun: &Tunables) {
            let w = tun.view_width as f64;
            self.ctx.set_fill_style_str("#fff");
            self.ctx.set_stroke_style_str("rgba(0,0,0,0.3)");
            self.ctx.set_line_width(4.0);
            self.ctx
                .set_font(&format!("bold {}px {FONT_STACK}", (w * 0.08).round()));
            self.ctx.set_text_align("center");
            self.ctx.set_text_baseline("top");
            let text = state.score.to_string();
            let _ = self.ctx.stroke_text(&text, w / 2.0, 20.0);
            let _ = self.ctx.fill_text(&text, w / 2.0, 20.0);
        }

        fn draw_ready(&self, state: &GameState, tun: &Tunables) {
            let (w, h) = (tun.view_width as f64, tun.view_height as f64);
            let s = w.min(h);
            let title_size = (s * 0.08).round();
            let tip_size = (s * 0.05).round();

            self.ctx.set_fill_style_str("#fff");
            self.ctx.set_stroke_style_str("rgba(0,0,0,0.35)");
            self.ctx.set_line_width(6.0);
            self.ctx.set_text_align("center");
            self.ctx.set_text_baseline("middle");

            let base_y = h * 0.35;
            self.ctx
                .set_font(&format!("bold {title_size}px {FONT_STACK}"));
            self.draw_outlined("Tap / click / Space to start", w / 2.0, base_y);

            let tip_y = (base_y + title_size * 1.2).round();
            self.ctx.set_font(&format!("600 {tip_size}px {FONT_STACK}"));
            self.draw_outlined("Flap to stay between the pipes", w / 2.0, tip_y);

            let best_y = (tip_y + tip_size * 1.4).round();
            self.draw_best_score(state, tun, best_y, (s * 0.06).round());
        }

        fn draw_game_over(&self, state: &GameState, tun: &Tunables) {
            let (w, h) = (tun.view_width as f64, tun.view_height as f64);
            let s = w.min(h);
            let title_size = (s * 0.1).round();
            let score_size = (s * 0.06).round();
            let best_size = (s * 0.06).round();
            let tip_size = (s * 0.05).round();

            self.ctx.set_fill_style_str("#fff");
            self.ctx.set_stroke_style_str("rgba(0,0,0,0.4)");
            self.ctx.set_line_width(6.0);
            self.ctx.set_text_align("center");
            self.ctx.set_text_baseline("middle");

            let base_y = h * 0.32;
            self.ctx
                .set_font(&format!("bold {title_size}px {FONT_STACK}"));
            self.draw_outlined("Game over", w / 2.0, base_y);

            let score_y = (base_y + title_size * 1.2).round();
            self.ctx
                .set_font(&format!("600 {score_size}px {FONT_STACK}"));
            self.draw_outlined(&format!("Score {}", state.score), w / 2.0, score_y);

            let best_y = (score_y + score_size * 1.3).round();
            self.draw_best_score(state, tun, best_y, best_size);

            let tip_y = (best_y + best_size * 1.3).round();
            self.ctx.set_font(&format!("600 {tip_size}px {FONT_STACK}"));
            self.draw_outlined("Tap / click / Space to restart", w / 2.0, tip_y);
        }

        fn draw_best_score(&self, state: &GameState, tun: &Tunables, y: f64, size: f64) {
            let w = tun.view_width as f64;
            self.ctx.set_fill_style_str("#fff");
            self.ctx.set_stroke_style_str("rgba(0,0,0,0.3)");
            self.ctx.set_line_width(4.0);
            self.ctx.set_text_align("center");
            self.ctx.set_text_baseline("top");
            self.ctx.set_font(&format!("bold {size}px {FONT_STACK}"));
            self.draw_outlined(&format!("Best {}", state.best_score), w / 2.0, y);
        }

        fn draw_outlined(&self, text: &str, x: f64, y: f64) {
            let _ = self.ctx.stroke_text(text, x, y);
            let _ = self.ctx.fill_text(text, x, y);
        }
    }
}
