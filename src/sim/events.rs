//! Notifications pushed from the simulation to presentation

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// A grid enemy reached the player
    FormationCollision,
    /// A diving enemy rammed the player
    DiverCollision,
    /// An enemy bullet hit the player
    EnemyFire,
}

impl GameOverCause {
    pub fn message(&self) -> &'static str {
        match self {
            GameOverCause::FormationCollision | GameOverCause::DiverCollision => {
                "You collided with an enemy."
            }
            GameOverCause::EnemyFire => "Alien projectile hit the player.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    Collision {
        cause: GameOverCause,
        final_score: u32,
    },
    ScoreChanged(u32),
    LevelChanged(u32),
}

/// Fire-and-forget receiver for [`GameEvent`]s
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}
