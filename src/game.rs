//! Frame driver
//!
//! Runs one game at a time: poll input, tick the simulation, draw, present,
//! then sleep off whatever is left of the frame budget. The frame cap is soft;
//! a slow frame is never caught up.

use crate::error::Result;
use crate::highscores::ScoreStore;
use crate::platform::{Clock, InputSource};
use crate::renderer::{Renderer, draw_scene};
use crate::sim::{GameEvent, GameOverReason, GameState, TickOutcome, tick};
use crate::tuning::Tuning;

/// Frames averaged by the FPS overlay
const FPS_WINDOW: usize = 60;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run finished normally; its score has been recorded
    GameOver { score: u64, reason: GameOverReason },
    /// The player closed the game; nothing was recorded
    Quit { score: u64 },
}

impl RunOutcome {
    pub fn score(&self) -> u64 {
        match *self {
            RunOutcome::GameOver { score, .. } | RunOutcome::Quit { score } => score,
        }
    }
}

/// Rolling frame rate over the last `FPS_WINDOW` frames
#[derive(Debug, Clone)]
struct FpsCounter {
    frame_times: [u64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    fn record(&mut self, now_ms: u64) {
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;

        if self.frames_seen > FPS_WINDOW {
            let elapsed = now_ms.saturating_sub(oldest);
            if elapsed > 0 {
                self.fps = ((FPS_WINDOW as f64 * 1000.0) / elapsed as f64).round() as u32;
            }
        }
    }

    fn fps(&self) -> u32 {
        self.fps
    }
}

/// Owns the collaborators of a run and drives it frame by frame
pub struct FrameDriver<R, I, C> {
    renderer: R,
    input: I,
    clock: C,
    tuning: Tuning,
    frame_budget_ms: Option<u64>,
    show_fps: bool,
    fps: FpsCounter,
}

impl<R: Renderer, I: InputSource, C: Clock> FrameDriver<R, I, C> {
    /// Driver with no frame cap and no FPS overlay
    pub fn new(renderer: R, input: I, clock: C, tuning: Tuning) -> Self {
        Self {
            renderer,
            input,
            clock,
            tuning,
            frame_budget_ms: None,
            show_fps: false,
            fps: FpsCounter::default(),
        }
    }

    /// Sleep so each frame takes at least `budget_ms`
    pub fn with_frame_budget(mut self, budget_ms: Option<u64>) -> Self {
        self.frame_budget_ms = budget_ms;
        self
    }

    pub fn with_fps_overlay(mut self, show_fps: bool) -> Self {
        self.show_fps = show_fps;
        self
    }

    /// Play one fresh run. A run that ends in game over has its score
    /// recorded before this returns.
    pub fn play<S: ScoreStore + ?Sized>(&mut self, seed: u64, store: &mut S) -> Result<RunOutcome> {
        let mut state = GameState::new(seed, self.tuning.clone(), self.clock.now_ms());
        log::info!("Run started (seed {})", seed);

        let outcome = self.run(&mut state)?;
        if let RunOutcome::GameOver { score, .. } = outcome {
            store.record_score(score)?;
        }
        Ok(outcome)
    }

    /// Drive `state` until it ends
    pub fn run(&mut self, state: &mut GameState) -> Result<RunOutcome> {
        loop {
            let frame_start = self.clock.now_ms();
            let input = self.input.poll()?;

            let outcome = tick(state, &input, frame_start);
            for event in state.drain_events() {
                log_event(&event);
            }
            match outcome {
                TickOutcome::Continue => {}
                TickOutcome::GameOver(reason) => {
                    log::info!("Game over after {} frames, score {}", state.frame, state.score);
                    return Ok(RunOutcome::GameOver {
                        score: state.score,
                        reason,
                    });
                }
                TickOutcome::Quit => {
                    log::info!("Quit requested, score {} not recorded", state.score);
                    return Ok(RunOutcome::Quit { score: state.score });
                }
            }

            self.fps.record(frame_start);
            let fps = self.show_fps.then(|| self.fps.fps());
            draw_scene(state, &mut self.renderer, fps)?;
            self.renderer.present()?;

            if let Some(budget) = self.frame_budget_ms {
                let elapsed = self.clock.now_ms().saturating_sub(frame_start);
                if elapsed < budget {
                    self.clock.sleep_ms(budget - elapsed);
                }
            }
        }
    }
}

fn log_event(event: &GameEvent) {
    match *event {
        GameEvent::MeteoroidSpawned { id, y } => log::debug!("Meteoroid {} spawned at y={}", id, y),
        GameEvent::BulletFired { id } => log::debug!("Bullet {} fired", id),
        GameEvent::MeteoroidDestroyed { id } => log::debug!("Meteoroid {} destroyed", id),
        GameEvent::DifficultyIncreased {
            meteoroid_speed,
            spawn_interval_ms,
        } => log::info!(
            "Difficulty increased: meteoroid speed {}, spawn interval {} ms",
            meteoroid_speed,
            spawn_interval_ms
        ),
        GameEvent::PlayerHit => log::info!("Player hit by a meteoroid"),
        GameEvent::ReturnedToMenu => log::info!("Returned to menu"),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use glam::Vec2;

    use super::*;
    use crate::error::Error;
    use crate::highscores::HighScores;
    use crate::platform::{ManualClock, ScriptedInput};
    use crate::renderer::Sprite;
    use crate::renderer::recording::{DrawCall, RecordingRenderer};
    use crate::sim::TickInput;

    const FRAME_MS: u64 = 16;

    fn idle_then(frames: usize, last: TickInput) -> ScriptedInput {
        ScriptedInput::new(std::iter::repeat_n(TickInput::default(), frames).chain([last]))
    }

    fn exit() -> TickInput {
        TickInput {
            exit_to_menu: true,
            ..Default::default()
        }
    }

    fn quit() -> TickInput {
        TickInput {
            quit: true,
            ..Default::default()
        }
    }

    fn driver(input: ScriptedInput) -> FrameDriver<RecordingRenderer, ScriptedInput, ManualClock> {
        FrameDriver::new(RecordingRenderer::default(), input, ManualClock::new(0), Tuning::default())
            .with_frame_budget(Some(FRAME_MS))
    }

    fn meteoroids_in(frame: &[DrawCall]) -> usize {
        frame
            .iter()
            .filter(|c| matches!(c, DrawCall::Sprite(Sprite::Meteoroid { .. }, _)))
            .count()
    }

    #[test]
    fn test_exit_to_menu_records_score() {
        let mut driver = driver(idle_then(9, exit()));
        let mut store = HighScores::seeded();

        let outcome = driver.play(1, &mut store).unwrap();
        assert_eq!(
            outcome,
            RunOutcome::GameOver {
                score: 10,
                reason: GameOverReason::ReturnedToMenu
            }
        );
        assert_eq!(store.top_scores(3), vec![10, 0, 0]);
        // The exit frame is not drawn
        assert_eq!(driver.renderer.presented.len(), 9);
    }

    #[test]
    fn test_quit_records_nothing() {
        let mut driver = driver(idle_then(4, quit()));
        let mut store = HighScores::seeded();

        let outcome = driver.play(1, &mut store).unwrap();
        assert_eq!(outcome, RunOutcome::Quit { score: 5 });
        assert_eq!(outcome.score(), 5);
        assert_eq!(store.entries.len(), 3);
    }

    #[test]
    fn test_frames_are_paced_by_budget() {
        let mut driver = driver(idle_then(100, exit()));
        let mut store = HighScores::new();
        driver.play(1, &mut store).unwrap();

        // 100 full frames slept off, the exit frame returns before sleeping
        assert_eq!(driver.clock.now_ms(), 100 * FRAME_MS);
    }

    #[test]
    fn test_spawn_timer_runs_on_clock_time() {
        let mut driver = driver(idle_then(100, exit()));
        let mut store = HighScores::new();
        driver.play(1, &mut store).unwrap();

        let frames = &driver.renderer.presented;
        // First spawn is due at 1500 ms: frame 94 starts at 1504 ms
        assert_eq!(meteoroids_in(&frames[93]), 0);
        assert_eq!(meteoroids_in(&frames[94]), 1);
        assert_eq!(meteoroids_in(driver.renderer.last_frame().unwrap()), 1);
    }

    #[test]
    fn test_player_hit_ends_run() {
        let mut driver = driver(ScriptedInput::default());
        let mut state = GameState::new(1, Tuning::default(), 0);
        state.entities.spawn_meteoroid_at(state.player.rect.pos.y);
        state.entities.meteoroids[0].rect.pos.x = state.player.rect.pos.x;

        let outcome = driver.run(&mut state).unwrap();
        assert_eq!(
            outcome,
            RunOutcome::GameOver {
                score: 1,
                reason: GameOverReason::PlayerHit
            }
        );
        assert!(state.entities.meteoroids.is_empty());
        assert!(driver.renderer.presented.is_empty());
    }

    #[test]
    fn test_fps_overlay() {
        let mut driver = driver(idle_then(70, exit())).with_fps_overlay(true);
        let mut store = HighScores::new();
        driver.play(1, &mut store).unwrap();

        let last = driver.renderer.last_frame().unwrap();
        let expected = format!("FPS: {}", (60_000.0_f64 / (60.0 * FRAME_MS as f64)).round() as u32);
        assert!(last.contains(&DrawCall::Text(expected, Vec2::new(3.0, 40.0))));
    }

    #[test]
    fn test_fps_counter_window() {
        let mut fps = FpsCounter::default();
        for i in 0..=FPS_WINDOW as u64 {
            fps.record(i * 20);
        }
        assert_eq!(fps.fps(), 50);
    }

    struct BrokenRenderer;

    impl Renderer for BrokenRenderer {
        fn draw(&mut self, _sprite: Sprite, _pos: Vec2) -> Result<()> {
            Ok(())
        }

        fn draw_text(&mut self, _text: &str, _pos: Vec2) -> Result<()> {
            Ok(())
        }

        fn present(&mut self) -> Result<()> {
            Err(Error::Io(io::Error::other("display gone")))
        }
    }

    #[test]
    fn test_renderer_failure_propagates() {
        let mut driver = FrameDriver::new(BrokenRenderer, ScriptedInput::default(), ManualClock::new(0), Tuning::default());
        let mut store = HighScores::seeded();

        assert!(matches!(driver.play(1, &mut store), Err(Error::Io(_))));
        assert_eq!(store.entries.len(), 3);
    }
}
