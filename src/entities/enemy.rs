/// Cosmetic shape tag; only the renderer decides what each looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Cube,
    Sphere,
}

impl Appearance {
    pub fn toggled(self) -> Self {
        match self {
            Appearance::Cube => Appearance::Sphere,
            Appearance::Sphere => Appearance::Cube,
        }
    }
}

/// Lifecycle of an enemy. Transitions only go forward:
/// `InFormation -> Descending -> Dead` or `InFormation -> Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    InFormation,
    Descending,
    Dead,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
    pub state: EnemyState,
    pub appearance: Appearance,
    /// Horizontal sine amplitude; zero until the enemy dives
    pub sin_amplitude: f32,
    pub has_fired: bool,
}

impl Enemy {
    pub fn new(x: f32, y: f32, z: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            z,
            width,
            height,
            state: EnemyState::InFormation,
            appearance: Appearance::Cube,
            sin_amplitude: 0.0,
            has_fired: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state != EnemyState::Dead
    }

    pub fn is_descending(&self) -> bool {
        self.state == EnemyState::Descending
    }

    pub fn in_formation(&self) -> bool {
        self.state == EnemyState::InFormation
    }

    /// Break formation. Returns false (and changes nothing) unless the enemy
    /// is still in formation.
    pub fn start_descent(&mut self, amplitude: f32) -> bool {
        if !self.in_formation() {
            return false;
        }
        self.state = EnemyState::Descending;
        self.sin_amplitude = amplitude;
        true
    }

    pub fn kill(&mut self) {
        self.state = EnemyState::Dead;
    }

    pub fn toggle_appearance(&mut self) {
        self.appearance = self.appearance.toggled();
    }

    /// One tick of a dive: constant descent plus the shared sine sway
    pub fn descend(&mut self, dive_speed: f32, clock: f32) {
        self.y -= dive_speed;
        self.x += clock.sin() * self.sin_amplitude;
    }

    /// Slope of the dive path at `clock`, negated so shots lean back toward it
    pub fn volley_slope(&self, clock: f32) -> f32 {
        -(clock.sin() * self.sin_amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy() -> Enemy {
        Enemy::new(0.0, 4.0, -20.0, 1.5, 1.0)
    }

    #[test]
    fn test_enemy_spawns_in_formation() {
        let enemy = enemy();
        assert!(enemy.in_formation());
        assert!(enemy.is_alive());
        assert_eq!(enemy.appearance, Appearance::Cube);
        assert_eq!(enemy.sin_amplitude, 0.0);
        assert!(!enemy.has_fired);
    }

    #[test]
    fn test_enemy_descent_is_one_way() {
        let mut enemy = enemy();
        assert!(enemy.start_descent(0.15));
        assert!(enemy.is_descending());
        assert_eq!(enemy.sin_amplitude, 0.15);

        // Second selection is refused and keeps the first amplitude
        assert!(!enemy.start_descent(0.11));
        assert_eq!(enemy.sin_amplitude, 0.15);

        enemy.kill();
        assert!(!enemy.is_alive());
        assert!(!enemy.start_descent(0.12));
        assert_eq!(enemy.state, EnemyState::Dead);
    }

    #[test]
    fn test_enemy_descend_moves_down_and_sways() {
        let mut enemy = enemy();
        enemy.start_descent(0.2);
        let clock = std::f32::consts::FRAC_PI_2;
        enemy.descend(0.1, clock);
        assert!((enemy.y - 3.9).abs() < 1e-5);
        assert!((enemy.x - 0.2).abs() < 1e-5);
        assert!((enemy.volley_slope(clock) + 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_appearance_toggle_round_trips() {
        let mut enemy = enemy();
        enemy.toggle_appearance();
        assert_eq!(enemy.appearance, Appearance::Sphere);
        enemy.toggle_appearance();
        assert_eq!(enemy.appearance, Appearance::Cube);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_never_returns_to_formation(
                steps in prop::collection::vec(0u8..3, 0..20)
            ) {
                let mut enemy = enemy();
                let mut left_formation = false;
                for step in steps {
                    match step {
                        0 => { enemy.start_descent(0.1); }
                        1 => enemy.kill(),
                        _ => enemy.descend(0.1, 1.0),
                    }
                    if !enemy.in_formation() {
                        left_formation = true;
                    }
                    prop_assert!(!(left_formation && enemy.in_formation()));
                }
            }
        }
    }
}
