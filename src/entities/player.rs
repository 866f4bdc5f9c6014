use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerMode {
    /// Pinned to the floor, horizontal movement only
    #[default]
    Normal,
    /// Free vertical movement inside the lower band
    Special,
}

impl PlayerMode {
    pub fn toggled(self) -> Self {
        match self {
            PlayerMode::Normal => PlayerMode::Special,
            PlayerMode::Special => PlayerMode::Normal,
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            PlayerMode::Normal => "Normal",
            PlayerMode::Special => "Special",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub half_extent: f32,
    pub speed: f32,
    pub mode: PlayerMode,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: 0.0,
            y: config.player_floor_y,
            z: config.player_z,
            half_extent: config.player_half_extent,
            speed: config.player_speed,
            mode: PlayerMode::Normal,
        }
    }

    // Bounds are checked before the step, so the ship may overshoot by one step.
    pub fn move_left(&mut self, min_x: f32) {
        if self.x > min_x {
            self.x -= self.speed;
        }
    }

    pub fn move_right(&mut self, max_x: f32) {
        if self.x < max_x {
            self.x += self.speed;
        }
    }

    pub fn move_up(&mut self, max_y: f32) {
        if self.y < max_y {
            self.y += self.speed;
        }
    }

    pub fn move_down(&mut self, min_y: f32) {
        if self.y > min_y {
            self.y -= self.speed;
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn is_special(&self) -> bool {
        self.mode == PlayerMode::Special
    }

    /// Where a freshly fired bullet appears
    pub fn muzzle(&self) -> (f32, f32, f32) {
        (self.x, self.y + 1.0, self.z)
    }
}
