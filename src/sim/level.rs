//! Difficulty progression

use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct LevelController {
    pub level: u32,
    pub rows: usize,
    pub cols: usize,
    pub enemy_speed: f32,
    initial_rows: usize,
    initial_speed: f32,
    speed_increment: f32,
    dive_chance_base: f64,
    dive_chance_per_level: f64,
}

impl LevelController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            level: 1,
            rows: config.initial_rows,
            cols: config.cols,
            enemy_speed: config.initial_enemy_speed,
            initial_rows: config.initial_rows,
            initial_speed: config.initial_enemy_speed,
            speed_increment: config.enemy_speed_increment,
            dive_chance_base: config.dive_chance_base,
            dive_chance_per_level: config.dive_chance_per_level,
        }
    }

    /// Next level: one more row and a faster march
    pub fn advance(&mut self) {
        self.level += 1;
        self.rows += 1;
        self.enemy_speed += self.speed_increment;
    }

    pub fn reset(&mut self) {
        self.level = 1;
        self.rows = self.initial_rows;
        self.enemy_speed = self.initial_speed;
    }

    /// Per-tick chance that one more enemy breaks formation, clamped to [0, 1]
    pub fn dive_probability(&self) -> f64 {
        (self.dive_chance_base + self.level as f64 * self.dive_chance_per_level).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_starts_at_one() {
        let level = LevelController::new(&GameConfig::default());
        assert_eq!(level.level, 1);
        assert_eq!(level.rows, 3);
        assert_eq!(level.cols, 6);
        assert_eq!(level.enemy_speed, 0.1);
    }

    #[test]
    fn test_advance_adds_row_and_speed() {
        let mut level = LevelController::new(&GameConfig::default());
        level.advance();
        assert_eq!(level.level, 2);
        assert_eq!(level.rows, 4);
        assert!((level.enemy_speed - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut level = LevelController::new(&GameConfig::default());
        for _ in 0..5 {
            level.advance();
        }
        level.reset();
        assert_eq!(level, LevelController::new(&GameConfig::default()));
    }

    #[test]
    fn test_dive_probability_scales_with_level() {
        let mut level = LevelController::new(&GameConfig::default());
        assert!((level.dive_probability() - 0.015).abs() < 1e-9);
        level.advance();
        assert!((level.dive_probability() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_dive_probability_is_clamped() {
        let config = GameConfig {
            dive_chance_base: 0.9,
            dive_chance_per_level: 0.5,
            ..GameConfig::default()
        };
        let level = LevelController::new(&config);
        assert_eq!(level.dive_probability(), 1.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_each_advance_is_exact(advances in 1usize..30) {
                let mut level = LevelController::new(&GameConfig::default());
                for _ in 0..advances {
                    let (rows, speed) = (level.rows, level.enemy_speed);
                    level.advance();
                    prop_assert_eq!(level.rows, rows + 1);
                    prop_assert!((level.enemy_speed - speed - 0.05).abs() < 1e-5);
                }
                prop_assert_eq!(level.level as usize, advances + 1);
            }
        }
    }
}
