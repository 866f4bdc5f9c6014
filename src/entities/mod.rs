mod enemy;
mod formation;
mod player;
mod projectile;

// Re-export all public types
pub use enemy::{Appearance, Enemy, EnemyState};
pub use formation::{Formation, GridLayout};
pub use player::{Player, PlayerMode};
pub use projectile::{EnemyBullet, PlayerBullet, volley};
