use std::time::Duration;

use super::enemy::{Enemy, EnemyState};
use crate::config::GameConfig;

/// Grid layout used when (re)spawning a wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub base_y: f32,
    pub z: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
}

impl GridLayout {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            spacing_x: config.spacing_x,
            spacing_y: config.spacing_y,
            base_y: config.grid_base_y,
            z: config.grid_z,
            enemy_width: config.enemy_width,
            enemy_height: config.enemy_height,
        }
    }

    /// Offsets for a `rows x cols` grid, centered on x = 0, row-major
    pub fn get_positions(&self, rows: usize, cols: usize) -> Vec<(f32, f32)> {
        let half_width = cols.saturating_sub(1) as f32 * self.spacing_x / 2.0;
        (0..rows)
            .flat_map(|row| {
                (0..cols).map(move |col| {
                    (
                        col as f32 * self.spacing_x - half_width,
                        row as f32 * self.spacing_y + self.base_y,
                    )
                })
            })
            .collect()
    }
}

/// Owns every enemy of the current wave plus the set of divers.
#[derive(Debug, Clone)]
pub struct Formation {
    pub layout: GridLayout,
    pub enemies: Vec<Enemy>,
    /// Indices into `enemies`, in the order the divers broke formation
    pub descending: Vec<usize>,
    /// March direction (-1 left, 1 right)
    pub direction: f32,
    /// `None` until the first flip, so the first check always flips
    last_appearance_change: Option<Duration>,
}

impl Formation {
    pub fn new(layout: GridLayout) -> Self {
        Self {
            layout,
            enemies: Vec::new(),
            descending: Vec::new(),
            direction: 1.0,
            last_appearance_change: None,
        }
    }

    /// Replace the whole wave with a fresh, fully alive grid.
    pub fn spawn_grid(&mut self, rows: usize, cols: usize) {
        self.enemies.clear();
        self.descending.clear();

        let layout = self.layout;
        self.enemies.extend(
            layout
                .get_positions(rows, cols)
                .into_iter()
                .map(|(x, y)| Enemy::new(x, y, layout.z, layout.enemy_width, layout.enemy_height)),
        );
    }

    /// Flip every living enemy's shape once `interval` has passed since the
    /// last flip. The very first call always flips. Returns whether a flip
    /// happened.
    pub fn toggle_appearance_if_due(&mut self, now: Duration, interval: Duration) -> bool {
        if let Some(last) = self.last_appearance_change {
            if now.saturating_sub(last) <= interval {
                return false;
            }
        }
        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            enemy.toggle_appearance();
        }
        self.last_appearance_change = Some(now);
        true
    }

    /// Shift every enemy still in formation sideways
    pub fn march(&mut self, speed: f32) {
        let step = self.direction * speed;
        for enemy in self.enemies.iter_mut().filter(|e| e.in_formation()) {
            enemy.x += step;
        }
    }

    pub fn edge_reached(&self, edge: f32) -> bool {
        self.enemies
            .iter()
            .any(|e| e.is_alive() && (e.x < -edge || e.x > edge))
    }

    pub fn reverse(&mut self) {
        self.direction = -self.direction;
    }

    /// First enemy, in collection order, that may still break formation
    pub fn dive_candidate(&self) -> Option<usize> {
        self.enemies.iter().position(|e| e.in_formation())
    }

    pub fn begin_descent(&mut self, index: usize, amplitude: f32) -> bool {
        let Some(enemy) = self.enemies.get_mut(index) else {
            return false;
        };
        if !enemy.start_descent(amplitude) {
            return false;
        }
        self.descending.push(index);
        true
    }

    /// Kill an enemy and drop it from the diver set if it was diving
    pub fn kill(&mut self, index: usize) {
        if let Some(enemy) = self.enemies.get_mut(index) {
            enemy.kill();
        }
        self.descending.retain(|&i| i != index);
    }

    pub fn descending_count(&self) -> usize {
        self.descending.len()
    }

    pub fn alive_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub fn all_dead(&self) -> bool {
        self.enemies.iter().all(|e| e.state == EnemyState::Dead)
    }
}
