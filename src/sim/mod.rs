//! Deterministic simulation core
//!
//! All gameplay rules live here. Nothing in this module touches the
//! terminal, audio or the wall clock; time and input arrive as arguments
//! and randomness comes from the seeded RNG inside the state.

pub mod collision;
pub mod events;
pub mod input;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{HIT_THRESHOLD, Positioned, collides};
pub use events::{EventSink, GameEvent, GameOverCause, NullSink};
pub use input::{InputState, Key};
pub use level::LevelController;
pub use state::{GamePhase, SimulationState};
pub use tick::{Step, tick};
