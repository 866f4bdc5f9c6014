use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};

use crate::audio::{AudioManager, Volumes};
use crate::config::GameConfig;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::sim::{EventSink, GameEvent, SimulationState, tick};

/// Counters the HUD shows, kept in sync through simulation events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
}

impl Default for Hud {
    fn default() -> Self {
        Self { score: 0, level: 1 }
    }
}

/// Turns simulation events into sound and HUD updates
pub struct Presentation {
    pub audio: AudioManager,
    pub hud: Hud,
}

impl EventSink for Presentation {
    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::ShotFired => self.audio.play_shot_sound(),
            GameEvent::Collision { cause, final_score } => {
                log::info!("Collision: {} (final score {final_score})", cause.message());
                self.audio.play_collision_sound();
            }
            GameEvent::ScoreChanged(score) => self.hud.score = score,
            GameEvent::LevelChanged(level) => self.hud.level = level,
        }
    }
}

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    state: SimulationState,
    /// Time zero for the appearance timer
    game_start: Instant,
    frame_count: u64,
    frame_interval: Duration,
    input_manager: InputManager,
    renderer: GameRenderer,
    presentation: Presentation,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, input_manager: InputManager, audio: AudioManager) -> Self {
        let frame_interval = config.frame_interval();
        Self {
            running: true,
            state: SimulationState::new(config),
            game_start: Instant::now(),
            frame_count: 0,
            frame_interval,
            input_manager,
            renderer: GameRenderer::new(),
            presentation: Presentation {
                audio,
                hud: Hud::default(),
            },
        }
    }

    /// Build the app with a real audio device, if there is one
    pub fn with_audio(config: GameConfig, input_manager: InputManager) -> Self {
        let audio = AudioManager::new(Volumes::from_config(&config));
        Self::new(config, input_manager, audio)
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.presentation.audio.start_music();

        while self.running {
            // Draw what the previous tick produced
            terminal.draw(|frame| {
                let view = RenderView::new(&self.state, self.frame_count, frame.area());
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(&self.state.phase)?;
            self.process_actions();
            self.step();

            std::thread::sleep(self.frame_interval);
        }

        self.presentation.audio.stop_music();
        log::info!("Session ended with score {}", self.presentation.hud.score);
        Ok(())
    }

    fn process_actions(&mut self) {
        for action in self.input_manager.actions() {
            match action {
                InputAction::Quit => self.running = false,
                InputAction::Acknowledge => self.state.acknowledge_game_over(),
            }
        }
    }

    /// One simulation tick with this frame's keys
    fn step(&mut self) {
        self.frame_count += 1;
        let input = self.input_manager.input_state();
        tick(
            &mut self.state,
            &input,
            self.game_start.elapsed(),
            &mut self.presentation,
        );
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn hud(&self) -> Hud {
        self.presentation.hud
    }
}
