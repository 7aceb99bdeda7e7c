//! Input collection
//!
//! Keyboard and on-screen touch buttons feed separate flag sets; a direction
//! is held when any source holds it. Presses that act once (shoot, pause,
//! ability hotkeys) are latched until the next snapshot.

use crate::sim::TickInput;

/// Held direction flags from one source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Touch direction buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Up,
    Down,
    Left,
    Right,
}

/// Accumulated input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: Directions,
    touch: Directions,
    shoot: bool,
    pause: bool,
    ability_slot: Option<u8>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press (DOM `KeyboardEvent.key` names)
    pub fn key_down(&mut self, key: &str) {
        match key {
            "ArrowUp" | "w" | "W" => self.keys.up = true,
            "ArrowDown" | "s" | "S" => self.keys.down = true,
            "ArrowLeft" | "a" | "A" => self.keys.left = true,
            "ArrowRight" | "d" | "D" => self.keys.right = true,
            " " => self.shoot = true,
            "p" | "P" => self.pause = true,
            _ => {
                if let Some(slot) = hotkey_slot(key) {
                    self.ability_slot = Some(slot);
                }
            }
        }
    }

    /// Handle a key release
    pub fn key_up(&mut self, key: &str) {
        match key {
            "ArrowUp" | "w" | "W" => self.keys.up = false,
            "ArrowDown" | "s" | "S" => self.keys.down = false,
            "ArrowLeft" | "a" | "A" => self.keys.left = false,
            "ArrowRight" | "d" | "D" => self.keys.right = false,
            _ => {}
        }
    }

    /// Press or release an on-screen direction button
    pub fn set_touch(&mut self, button: TouchButton, held: bool) {
        match button {
            TouchButton::Up => self.touch.up = held,
            TouchButton::Down => self.touch.down = held,
            TouchButton::Left => self.touch.left = held,
            TouchButton::Right => self.touch.right = held,
        }
    }

    pub fn press_shoot(&mut self) {
        self.shoot = true;
    }

    pub fn press_pause(&mut self) {
        self.pause = true;
    }

    pub fn press_ability(&mut self, slot: u8) {
        self.ability_slot = Some(slot);
    }

    /// Build this tick's input and clear one-shot presses
    pub fn snapshot(&mut self, now_ms: f64) -> TickInput {
        let input = TickInput {
            up: self.keys.up || self.touch.up,
            down: self.keys.down || self.touch.down,
            left: self.keys.left || self.touch.left,
            right: self.keys.right || self.touch.right,
            shoot: self.shoot,
            ability_slot: self.ability_slot,
            pause: self.pause,
            now_ms,
        };
        self.shoot = false;
        self.pause = false;
        self.ability_slot = None;
        input
    }
}

fn hotkey_slot(key: &str) -> Option<u8> {
    match key.as_bytes() {
        [digit @ b'1'..=b'9'] => Some(digit - b'0'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_union_sources() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        input.set_touch(TouchButton::Left, true);
        input.key_up("ArrowLeft");
        assert!(input.snapshot(0.0).left);

        input.set_touch(TouchButton::Left, false);
        assert!(!input.snapshot(0.0).left);

        input.key_down("d");
        input.set_touch(TouchButton::Up, true);
        let tick = input.snapshot(0.0);
        assert!(tick.right && tick.up && !tick.down);
    }

    #[test]
    fn test_one_shot_presses_clear() {
        let mut input = InputState::new();
        input.key_down(" ");
        input.key_down("3");
        input.key_down("P");
        let first = input.snapshot(16.0);
        assert!(first.shoot && first.pause);
        assert_eq!(first.ability_slot, Some(3));
        assert_eq!(first.now_ms, 16.0);

        let second = input.snapshot(32.0);
        assert!(!second.shoot && !second.pause);
        assert_eq!(second.ability_slot, None);
    }

    #[test]
    fn test_out_of_range_hotkeys_pass_through() {
        let mut input = InputState::new();
        input.key_down("8");
        // The sim ignores slots past 6
        assert_eq!(input.snapshot(0.0).ability_slot, Some(8));
        input.key_down("x");
        input.key_down("10");
        assert_eq!(input.snapshot(0.0).ability_slot, None);
    }
}
