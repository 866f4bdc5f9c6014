use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::sim::{GamePhase, InputState, Key};

/// How long a key counts as held without a repeat, on terminals that never
/// report key releases
pub const DEFAULT_HOLD_WINDOW: Duration = Duration::from_millis(120);

/// One-shot commands outside the simulation's key table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Dismiss the game-over screen and keep playing
    Acknowledge,
    Quit,
}

/// Map a terminal key to the simulation key it drives
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('!') => Some(Key::ToggleSpecial),
        _ => None,
    }
}

/// Polls crossterm and keeps the held-key table the simulation samples
pub struct InputManager {
    /// Held keys and when they were last pressed or repeated
    held: HashMap<Key, Instant>,
    toggle_pressed: bool,
    oneshot_actions: Vec<InputAction>,
    /// `None` when the terminal reports releases
    hold_window: Option<Duration>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(Some(DEFAULT_HOLD_WINDOW))
    }
}

impl InputManager {
    pub fn new(hold_window: Option<Duration>) -> Self {
        Self {
            held: HashMap::new(),
            toggle_pressed: false,
            oneshot_actions: Vec::new(),
            hold_window,
        }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame, before reading the key table.
    pub fn poll_events(&mut self, phase: &GamePhase) -> color_eyre::Result<()> {
        self.begin_frame();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, phase, Instant::now());
            }
        }

        self.expire_held(Instant::now());
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.oneshot_actions.clear();
        self.toggle_pressed = false;
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, phase: &GamePhase, at: Instant) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.handle_key_press(key_event, phase, at);
            }
            KeyEventKind::Release => {
                if let Some(key) = map_key(key_event.code) {
                    self.held.remove(&key);
                }
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, phase: &GamePhase, at: Instant) {
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        if let GamePhase::GameOver { .. } = phase {
            if matches!(
                key_event.code,
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R')
            ) && key_event.kind == KeyEventKind::Press
            {
                self.oneshot_actions.push(InputAction::Acknowledge);
                self.held.clear();
            }
            return;
        }

        match map_key(key_event.code) {
            Some(Key::ToggleSpecial) => {
                if key_event.kind == KeyEventKind::Press {
                    self.toggle_pressed = true;
                }
            }
            Some(key) => {
                // Opposite directions cancel each other
                let opposite = match key {
                    Key::Left => Some(Key::Right),
                    Key::Right => Some(Key::Left),
                    Key::Up => Some(Key::Down),
                    Key::Down => Some(Key::Up),
                    _ => None,
                };
                if let Some(opposite) = opposite {
                    self.held.remove(&opposite);
                }
                self.held.insert(key, at);
            }
            None => {}
        }
    }

    fn expire_held(&mut self, now: Instant) {
        if let Some(window) = self.hold_window {
            self.held
                .retain(|_, pressed_at| now.saturating_duration_since(*pressed_at) <= window);
        }
    }

    /// The key table for this frame
    pub fn input_state(&self) -> InputState {
        let mut state = InputState::default();
        for &key in self.held.keys() {
            state.set(key, true);
        }
        state.toggle_special = self.toggle_pressed;
        state
    }

    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameOverCause;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    const PLAYING: GamePhase = GamePhase::Playing;
    const GAME_OVER: GamePhase = GamePhase::GameOver {
        final_score: 40,
        cause: GameOverCause::EnemyFire,
    };

    #[test]
    fn test_map_key_covers_arrows_and_wasd() {
        assert_eq!(map_key(KeyCode::Left), Some(Key::Left));
        assert_eq!(map_key(KeyCode::Char('d')), Some(Key::Right));
        assert_eq!(map_key(KeyCode::Char('W')), Some(Key::Up));
        assert_eq!(map_key(KeyCode::Down), Some(Key::Down));
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Key::Fire));
        assert_eq!(map_key(KeyCode::Char('!')), Some(Key::ToggleSpecial));
        assert_eq!(map_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_press_and_release_update_table() {
        let mut input = InputManager::new(None);
        let now = Instant::now();
        input.handle_key_event(press(KeyCode::Left), &PLAYING, now);
        input.handle_key_event(press(KeyCode::Char(' ')), &PLAYING, now);
        assert!(input.input_state().left);
        assert!(input.input_state().fire);

        input.handle_key_event(release(KeyCode::Left), &PLAYING, now);
        assert!(!input.input_state().left);
        assert!(input.input_state().fire);
    }

    #[test]
    fn test_opposite_direction_cancels() {
        let mut input = InputManager::new(None);
        let now = Instant::now();
        input.handle_key_event(press(KeyCode::Left), &PLAYING, now);
        input.handle_key_event(press(KeyCode::Right), &PLAYING, now);
        let state = input.input_state();
        assert!(state.right);
        assert!(!state.left);
    }

    #[test]
    fn test_toggle_lasts_one_frame() {
        let mut input = InputManager::new(None);
        input.handle_key_event(press(KeyCode::Char('!')), &PLAYING, Instant::now());
        assert!(input.input_state().toggle_special);

        input.begin_frame();
        assert!(!input.input_state().toggle_special);
    }

    #[test]
    fn test_held_key_expires_without_repeat() {
        let mut input = InputManager::new(Some(Duration::from_millis(100)));
        let start = Instant::now();
        input.handle_key_event(press(KeyCode::Right), &PLAYING, start);

        input.expire_held(start + Duration::from_millis(50));
        assert!(input.input_state().right);

        input.expire_held(start + Duration::from_millis(150));
        assert!(!input.input_state().right);
    }

    #[test]
    fn test_quit_works_in_any_phase() {
        let mut input = InputManager::new(None);
        input.handle_key_event(press(KeyCode::Char('q')), &GAME_OVER, Instant::now());
        assert_eq!(input.actions(), &[InputAction::Quit]);
    }

    #[test]
    fn test_game_over_acknowledge_clears_held_keys() {
        let mut input = InputManager::new(None);
        let now = Instant::now();
        input.handle_key_event(press(KeyCode::Left), &PLAYING, now);
        input.handle_key_event(press(KeyCode::Enter), &GAME_OVER, now);

        assert_eq!(input.actions(), &[InputAction::Acknowledge]);
        assert_eq!(input.input_state(), InputState::default());
    }

    #[test]
    fn test_movement_ignored_on_game_over_screen() {
        let mut input = InputManager::new(None);
        input.handle_key_event(press(KeyCode::Right), &GAME_OVER, Instant::now());
        assert!(!input.input_state().right);
    }
}
