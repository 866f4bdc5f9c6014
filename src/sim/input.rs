//! Key table read by the simulation once per tick

/// Logical keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    /// Edge-triggered: true only on the tick the toggle was pressed
    ToggleSpecial,
}

impl Key {
    pub const ALL: [Key; 6] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Fire,
        Key::ToggleSpecial,
    ];
}

/// Snapshot of pressed keys. Writers set, the tick only reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub toggle_special: bool,
}

impl InputState {
    pub fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Fire => self.fire,
            Key::ToggleSpecial => self.toggle_special,
        }
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Fire => self.fire = pressed,
            Key::ToggleSpecial => self.toggle_special = pressed,
        }
    }

    /// Builder-style helper, mostly for tests and scripted input
    pub fn with(mut self, key: Key) -> Self {
        self.set(key, true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_nothing_pressed() {
        let input = InputState::default();
        assert!(Key::ALL.iter().all(|&k| !input.is_pressed(k)));
    }

    #[test]
    fn test_set_and_read_each_key() {
        for key in Key::ALL {
            let mut input = InputState::default();
            input.set(key, true);
            assert!(input.is_pressed(key));
            assert_eq!(Key::ALL.iter().filter(|&&k| input.is_pressed(k)).count(), 1);

            input.set(key, false);
            assert!(!input.is_pressed(key));
        }
    }

    #[test]
    fn test_last_write_wins() {
        let input = InputState::default().with(Key::Fire);
        let mut input = input;
        input.set(Key::Fire, false);
        input.set(Key::Fire, true);
        assert!(input.is_pressed(Key::Fire));
    }
}
