/// The player's single in-flight shot
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBullet {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub speed: f32,
}

impl PlayerBullet {
    pub fn new(x: f32, y: f32, z: f32, speed: f32) -> Self {
        Self { x, y, z, speed }
    }

    pub fn update(&mut self) {
        self.y += self.speed;
    }

    pub fn is_out_of_bounds(&self, ceiling: f32) -> bool {
        self.y > ceiling
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyBullet {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub speed: f32,
    /// Horizontal drift per unit of descent
    pub slope: f32,
}

impl EnemyBullet {
    pub fn new(x: f32, y: f32, z: f32, speed: f32, slope: f32) -> Self {
        Self {
            x,
            y,
            z,
            speed,
            slope,
        }
    }

    pub fn update(&mut self) {
        self.x += self.slope * self.speed;
        self.y -= self.speed;
    }

    pub fn is_out_of_bounds(&self, floor: f32) -> bool {
        self.y < floor
    }
}

/// Three shots fanned around `base_slope`, offsets -1, 0, +1 times `spread`
pub fn volley(
    x: f32,
    y: f32,
    z: f32,
    speed: f32,
    base_slope: f32,
    spread: f32,
) -> [EnemyBullet; 3] {
    [-1.0, 0.0, 1.0].map(|offset| EnemyBullet::new(x, y, z, speed, base_slope + offset * spread))
}
