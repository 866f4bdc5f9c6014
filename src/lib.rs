//! Cube Swarm - a terminal arcade shooter
//!
//! - `entities`: player, enemies, bullets and the enemy formation
//! - `sim`: deterministic per-tick rules, collisions and difficulty
//! - `config`: tuning constants, loadable from JSON
//! - `input`, `renderer`, `audio`, `app`: the terminal front end

pub mod app;
pub mod audio;
pub mod config;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod sim;

// Library exports for testing
pub use config::GameConfig;
pub use entities::{
    Appearance, Enemy, EnemyBullet, EnemyState, Formation, Player, PlayerBullet, PlayerMode,
};
pub use sim::{
    EventSink, GameEvent, GameOverCause, GamePhase, InputState, Key, SimulationState, collides,
    tick,
};
