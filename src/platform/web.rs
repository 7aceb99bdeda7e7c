//! Browser bindings
//!
//! The page owns the canvas, DOM panels and the animation-frame loop. It
//! forwards events here and calls `frame()` once per animation frame.

use wasm_bindgen::prelude::*;

use super::input::{InputState, TouchButton};
use super::now_ms;
use crate::game::Game;
use crate::persistence::LocalStorage;
use crate::sim::{Ability, Playfield};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Galactic Defender core loaded");
}

/// JS handle to a running game
#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorage>,
    input: InputState,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let now = now_ms();
        let seed = now as u64;
        WebGame {
            game: Game::new(
                seed,
                Playfield::new(width, height),
                Tuning::default(),
                LocalStorage,
                now,
            ),
            input: InputState::new(),
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// `direction` is one of "up", "down", "left", "right"
    pub fn touch(&mut self, direction: &str, held: bool) {
        let button = match direction {
            "up" => TouchButton::Up,
            "down" => TouchButton::Down,
            "left" => TouchButton::Left,
            "right" => TouchButton::Right,
            _ => return,
        };
        self.input.set_touch(button, held);
    }

    pub fn shoot(&mut self) {
        self.input.press_shoot();
    }

    pub fn start(&mut self) {
        self.game.start();
    }

    /// Latched like the P key; applied on the next frame
    pub fn pause(&mut self) {
        self.input.press_pause();
    }

    pub fn toggle_allies(&mut self) {
        // Rejections surface through notifications()
        let _ = self.game.toggle_allies();
    }

    /// Queue an ability hotkey (1-6) for the next frame
    pub fn activate_ability(&mut self, slot: u8) {
        self.input.press_ability(slot);
    }

    pub fn unlock_ability(&mut self, slot: u8) {
        if let Some(ability) = Ability::from_slot(slot) {
            let _ = self.game.unlock_ability(ability);
        }
    }

    pub fn select_skin(&mut self, id: u32) {
        let _ = self.game.select_skin(id);
    }

    /// Run one tick and return the render frame as JSON
    pub fn frame(&mut self) -> Result<String, JsValue> {
        let input = self.input.snapshot(now_ms());
        self.game.step(&input);
        to_json(&self.game.render_frame())
    }

    /// Pending toast texts as a JSON array
    pub fn notifications(&mut self) -> Result<String, JsValue> {
        let texts: Vec<String> = self
            .game
            .drain_notices()
            .iter()
            .map(ToString::to_string)
            .collect();
        to_json(&texts)
    }

    /// Wallet, missions, shop, skins and ranking as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        to_json(&self.game.snapshot())
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
