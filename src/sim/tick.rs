//! Per-frame simulation step
//!
//! Advances one run by exactly one frame. The order of the steps matters:
//! input and timers first, then the player, then collisions, and only then
//! entity movement.

use super::collision::{self, Boundary};
use super::state::{GameEvent, GameOverReason, GamePhase, GameState, Movement};

/// Input state for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
    /// Leave the run and go back to the menu
    pub exit_to_menu: bool,
    /// Close the game
    pub quit: bool,
}

/// What the frame driver should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver(GameOverReason),
    Quit,
}

/// Advance the game state by one frame at clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) -> TickOutcome {
    if let GamePhase::GameOver(reason) = state.phase {
        return TickOutcome::GameOver(reason);
    }

    state.background.advance();

    state.frame += 1;
    state.add_score(state.tuning.survival_points);

    // Timers
    let scheduled = state.scheduler.poll(now_ms);
    if scheduled.spawn {
        let meteoroid = state.entities.spawn_meteoroid(&mut state.rng);
        state.events.push(GameEvent::MeteoroidSpawned {
            id: meteoroid.id,
            y: meteoroid.rect.top(),
        });
    }
    if scheduled.escalated {
        let difficulty = state.scheduler.difficulty();
        state.events.push(GameEvent::DifficultyIncreased {
            meteoroid_speed: difficulty.meteoroid_speed,
            spawn_interval_ms: difficulty.spawn_interval_ms,
        });
    }
    if input.quit {
        return TickOutcome::Quit;
    }

    // Player
    let movement = Movement::resolve(input.left, input.right, input.up, input.down);
    state.player.steer(movement, state.tuning.player_speed);

    if input.shoot && state.shoot_cooldown.trigger(now_ms) {
        let bullet = state.entities.fire_bullet(&state.player);
        state.events.push(GameEvent::BulletFired { id: bullet.id });
    }

    if input.exit_to_menu {
        state.events.push(GameEvent::ReturnedToMenu);
        return end_run(state, GameOverReason::ReturnedToMenu);
    }

    state.player.animate();

    // Collisions
    let crashed = collision::colliding_with(&state.player, &state.entities.meteoroids);
    if !crashed.is_empty() {
        state.entities.remove_meteoroids(&crashed);
        state.events.push(GameEvent::PlayerHit);
        return end_run(state, GameOverReason::PlayerHit);
    }

    let hits = collision::resolve_bullet_hits(&state.entities.meteoroids, &state.entities.bullets);
    if !hits.is_empty() {
        state.entities.remove_bullets(&hits.bullets);
        let destroyed = state.entities.explode(&hits.meteoroids);
        state.add_score(state.tuning.meteoroid_bonus * destroyed.len() as u64);
        state
            .events
            .extend(destroyed.into_iter().map(|id| GameEvent::MeteoroidDestroyed { id }));
    }

    let gone = Boundary::right().crossed(&state.entities.bullets);
    state.entities.remove_bullets(&gone);
    let gone = Boundary::left().crossed(&state.entities.meteoroids);
    state.entities.remove_meteoroids(&gone);

    // Movement
    let meteoroid_speed = state.scheduler.difficulty().meteoroid_speed;
    state.entities.advance(state.tuning.bullet_speed, meteoroid_speed);

    TickOutcome::Continue
}

fn end_run(state: &mut GameState, reason: GameOverReason) -> TickOutcome {
    state.phase = GamePhase::GameOver(reason);
    TickOutcome::GameOver(reason)
}
