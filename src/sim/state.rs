//! Simulation state
//!
//! Everything one session needs lives in [`SimulationState`]. Nothing is
//! global, so tests build as many independent games as they like.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::events::{EventSink, GameEvent, GameOverCause};
use super::level::LevelController;
use crate::config::GameConfig;
use crate::entities::{EnemyBullet, Formation, GridLayout, Player, PlayerBullet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// The run ended and the state is already reset; waiting for the player
    /// to acknowledge the final score.
    GameOver {
        final_score: u32,
        cause: GameOverCause,
    },
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub player: Player,
    /// At most one player shot in flight
    pub player_bullet: Option<PlayerBullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub formation: Formation,
    pub level: LevelController,
    pub score: u32,
    /// Shared sine clock for every diver; runs for the whole session
    pub clock: f32,
    pub tick_count: u64,
    pub rng: Pcg32,
}

impl SimulationState {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };

        let level = LevelController::new(&config);
        let mut formation = Formation::new(GridLayout::from_config(&config));
        formation.spawn_grid(level.rows, level.cols);

        Self {
            player: Player::new(&config),
            phase: GamePhase::Playing,
            player_bullet: None,
            enemy_bullets: Vec::new(),
            formation,
            level,
            score: 0,
            clock: 0.0,
            tick_count: 0,
            rng,
            config,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Spawn a player shot unless one is already in flight.
    /// Returns whether a shot was fired.
    pub fn try_fire(&mut self) -> bool {
        if self.player_bullet.is_some() {
            return false;
        }
        let (x, y, z) = self.player.muzzle();
        self.player_bullet = Some(PlayerBullet::new(x, y, z, self.config.player_bullet_speed));
        true
    }

    /// Advance to the next level if the whole wave is dead.
    pub fn check_level_clear(&mut self, events: &mut impl EventSink) -> bool {
        if !self.formation.all_dead() {
            return false;
        }
        self.advance_level(events);
        true
    }

    pub fn advance_level(&mut self, events: &mut impl EventSink) {
        self.level.advance();
        self.formation.spawn_grid(self.level.rows, self.level.cols);
        log::info!(
            "Level {} reached: {} rows, speed {:.2}",
            self.level.level,
            self.level.rows,
            self.level.enemy_speed
        );
        events.emit(GameEvent::LevelChanged(self.level.level));
    }

    pub fn add_score(&mut self, points: u32, events: &mut impl EventSink) {
        self.score = self.score.saturating_add(points);
        events.emit(GameEvent::ScoreChanged(self.score));
    }

    /// Pick a diver if the odds and the cap allow it.
    pub fn roll_for_dive(&mut self) -> Option<usize> {
        if self.formation.descending_count() >= self.config.max_descending {
            return None;
        }
        if !self.rng.random_bool(self.level.dive_probability()) {
            return None;
        }
        let index = self.formation.dive_candidate()?;

        let (min, max) = (self.config.dive_amplitude_min, self.config.dive_amplitude_max);
        let amplitude = if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        };

        if self.formation.begin_descent(index, amplitude) {
            log::debug!("Enemy {index} breaks formation (amplitude {amplitude:.3})");
            Some(index)
        } else {
            None
        }
    }

    /// End the run: notify, reset, and wait for acknowledgement.
    pub fn game_over(&mut self, cause: GameOverCause, events: &mut impl EventSink) {
        let final_score = self.score;
        log::info!(
            "Game over on level {} with score {final_score}: {}",
            self.level.level,
            cause.message()
        );
        events.emit(GameEvent::Collision { cause, final_score });

        self.reset();
        self.phase = GamePhase::GameOver { final_score, cause };

        events.emit(GameEvent::ScoreChanged(self.score));
        events.emit(GameEvent::LevelChanged(self.level.level));
    }

    /// Back to level one with an empty sky. The player keeps its position
    /// and mode; the sine clock keeps running.
    pub fn reset(&mut self) {
        self.score = 0;
        self.level.reset();
        self.formation.direction = 1.0;
        self.player_bullet = None;
        self.enemy_bullets.clear();
        self.formation.spawn_grid(self.level.rows, self.level.cols);
    }

    pub fn acknowledge_game_over(&mut self) {
        if let GamePhase::GameOver { .. } = self.phase {
            self.phase = GamePhase::Playing;
        }
    }
}
