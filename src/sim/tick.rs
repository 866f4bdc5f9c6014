//! Per-frame simulation step
//!
//! Order within a tick: player, player bullet, enemies, enemy bullets. The
//! first fatal collision ends the run and skips whatever is left of the
//! tick, so the reset runs exactly once.

use std::ops::ControlFlow;
use std::time::Duration;

use super::collision::collides;
use super::events::{EventSink, GameEvent, GameOverCause};
use super::input::{InputState, Key};
use super::state::SimulationState;
use crate::entities::volley;

/// Result of one update step; `Break` means the run just ended
pub type Step = ControlFlow<GameOverCause>;

/// Advance the game by one frame.
///
/// `now` is the time since the session started; it only drives the cosmetic
/// appearance toggle. Does nothing while waiting on a game-over screen.
pub fn tick(
    state: &mut SimulationState,
    input: &InputState,
    now: Duration,
    events: &mut impl EventSink,
) {
    if !state.is_playing() {
        return;
    }
    state.tick_count += 1;

    update_player(state, input, events);

    if let ControlFlow::Break(cause) = update_world(state, now, events) {
        state.game_over(cause, events);
    }
}

fn update_world(state: &mut SimulationState, now: Duration, events: &mut impl EventSink) -> Step {
    update_player_bullet(state, events)?;
    update_enemies(state, now, events)?;
    update_enemy_bullets(state)
}

/// Movement, mode toggle and firing
pub fn update_player(state: &mut SimulationState, input: &InputState, events: &mut impl EventSink) {
    let config = &state.config;
    let player = &mut state.player;

    if input.is_pressed(Key::ToggleSpecial) {
        player.toggle_mode();
        log::debug!("Player mode: {}", player.mode.get_name());
    }

    if input.is_pressed(Key::Left) {
        player.move_left(config.player_min_x);
    }
    if input.is_pressed(Key::Right) {
        player.move_right(config.player_max_x);
    }

    if player.is_special() {
        if input.is_pressed(Key::Up) {
            player.move_up(config.player_max_y);
        }
        if input.is_pressed(Key::Down) {
            player.move_down(config.player_min_y);
        }
    } else {
        // Normal mode pins the ship to the floor every tick
        player.y = config.player_floor_y;
    }

    if input.is_pressed(Key::Fire) && state.try_fire() {
        events.emit(GameEvent::ShotFired);
    }
}

/// Move the player's shot and resolve its first hit.
pub fn update_player_bullet(state: &mut SimulationState, events: &mut impl EventSink) -> Step {
    let Some(bullet) = state.player_bullet.as_mut() else {
        return Step::Continue(());
    };

    bullet.update();
    if bullet.is_out_of_bounds(state.config.player_bullet_ceiling) {
        state.player_bullet = None;
        return Step::Continue(());
    }

    let hit = state
        .formation
        .enemies
        .iter()
        .position(|enemy| enemy.is_alive() && collides(state.player_bullet.as_ref(), Some(enemy)));

    if let Some(index) = hit {
        state.formation.kill(index);
        state.player_bullet = None;
        state.add_score(state.config.points_per_kill, events);
        state.check_level_clear(events);
    }

    Step::Continue(())
}

/// March the grid, launch and fly divers, then check for a cleared wave.
pub fn update_enemies(
    state: &mut SimulationState,
    now: Duration,
    events: &mut impl EventSink,
) -> Step {
    state.clock += state.config.clock_step;

    let interval = state.config.appearance_interval();
    state.formation.toggle_appearance_if_due(now, interval);

    state.formation.march(state.level.enemy_speed);
    let formation_hit = state
        .formation
        .enemies
        .iter()
        .any(|enemy| enemy.in_formation() && collides(Some(enemy), Some(&state.player)));
    if formation_hit {
        return Step::Break(GameOverCause::FormationCollision);
    }

    // Takes effect on the next tick's march
    if state.formation.edge_reached(state.config.march_edge) {
        state.formation.reverse();
    }

    state.roll_for_dive();

    update_divers(state)?;

    state.check_level_clear(events);
    Step::Continue(())
}

/// Newest divers first, mirroring removal while iterating.
fn update_divers(state: &mut SimulationState) -> Step {
    let config = &state.config;
    let clock = state.clock;

    for slot in (0..state.formation.descending.len()).rev() {
        let index = state.formation.descending[slot];
        let Some(enemy) = state.formation.enemies.get_mut(index) else {
            continue;
        };
        if !enemy.is_alive() {
            continue;
        }

        enemy.descend(config.dive_speed, clock);

        if enemy.y < config.volley_trigger_y && !enemy.has_fired {
            enemy.has_fired = true;
            let shots = volley(
                enemy.x,
                enemy.y,
                enemy.z,
                config.enemy_bullet_speed,
                enemy.volley_slope(clock),
                config.volley_spread,
            );
            log::debug!("Enemy {index} fires a volley at ({:.2}, {:.2})", enemy.x, enemy.y);
            state.enemy_bullets.extend(shots);
        }

        if collides(Some(&*enemy), Some(&state.player)) {
            return Step::Break(GameOverCause::DiverCollision);
        }

        if enemy.y < config.exit_y {
            enemy.kill();
            state.formation.descending.remove(slot);
        }
    }

    Step::Continue(())
}

/// Move enemy shots, drop the ones that left, and stop at the first hit.
pub fn update_enemy_bullets(state: &mut SimulationState) -> Step {
    let floor = state.config.exit_y;
    let mut i = state.enemy_bullets.len();

    while i > 0 {
        i -= 1;
        let bullet = &mut state.enemy_bullets[i];
        bullet.update();

        if bullet.is_out_of_bounds(floor) {
            state.enemy_bullets.swap_remove(i);
            continue;
        }

        if collides(Some(&state.enemy_bullets[i]), Some(&state.player)) {
            return Step::Break(GameOverCause::EnemyFire);
        }
    }

    Step::Continue(())
}
