//! Render sink
//!
//! The core never draws. Each tick it projects the game state into an
//! ordered list of drawables plus HUD values, which the presentation layer
//! paints back to front. Colors are CSS strings so a canvas can use them
//! as-is.

use glam::Vec2;
use serde::Serialize;

use crate::css_color;
use crate::sim::{Ability, GamePhase, GameState, PowerUpKind};

/// One thing to paint, in draw order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Drawable {
    Star {
        pos: Vec2,
        size: f32,
        alpha: f32,
    },
    PowerUp {
        pos: Vec2,
        size: f32,
        kind: PowerUpKind,
        color: String,
    },
    Asteroid {
        pos: Vec2,
        rotation: f32,
        outline: Vec<Vec2>,
        color: String,
        glow: String,
        /// Remaining health fraction; only for asteroids with more than 1 HP
        health_bar: Option<f32>,
    },
    Bullet {
        pos: Vec2,
        width: f32,
        height: f32,
        color: String,
        piercing: bool,
    },
    Particle {
        pos: Vec2,
        size: f32,
        color: String,
        alpha: f32,
    },
    Ally {
        pos: Vec2,
        size: f32,
        color: String,
    },
    Player {
        pos: Vec2,
        width: f32,
        height: f32,
        color: String,
    },
    Shield {
        pos: Vec2,
        radius: f32,
    },
}

/// Ability row in the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityHud {
    pub slot: u8,
    pub name: &'static str,
    pub unlocked: bool,
    pub active: bool,
    pub duration: u32,
    pub cooldown: u32,
}

/// Cosmic event banner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventHud {
    pub name: String,
    pub progress: u32,
    pub target: u32,
    pub remaining_ms: f64,
}

/// Scalar HUD values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub high_score: u64,
    pub coins: u64,
    pub phase: GamePhase,
    pub allies_enabled: bool,
    pub ally_cooldown: u32,
    pub abilities: Vec<AbilityHud>,
    pub event: Option<EventHud>,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub width: f32,
    pub height: f32,
    pub drawables: Vec<Drawable>,
    pub hud: Hud,
}

impl RenderFrame {
    /// Project the state; `high_score` and `coins` come from the driver
    pub fn capture(state: &GameState, high_score: u64, coins: u64, now_ms: f64) -> Self {
        let mut drawables = Vec::with_capacity(
            state.stars.len()
                + state.power_ups.len()
                + state.asteroids.len()
                + state.bullets.len()
                + state.particles.len()
                + state.allies.len()
                + 2,
        );

        drawables.extend(state.stars.iter().map(|s| Drawable::Star {
            pos: s.pos,
            size: s.size,
            alpha: s.brightness as f32 / 255.0,
        }));
        drawables.extend(state.power_ups.iter().map(|p| Drawable::PowerUp {
            pos: p.pos,
            size: p.size,
            kind: p.kind,
            color: css_color(p.color),
        }));
        drawables.extend(state.asteroids.iter().map(|a| Drawable::Asteroid {
            pos: a.pos,
            rotation: a.rotation,
            outline: a.outline.clone(),
            color: css_color(a.color),
            glow: css_rgba(a.glow),
            health_bar: (a.max_health > 1).then(|| a.health as f32 / a.max_health as f32),
        }));
        drawables.extend(state.bullets.iter().map(|b| Drawable::Bullet {
            pos: b.pos,
            width: b.width,
            height: b.height,
            color: css_color(b.color),
            piercing: b.piercing,
        }));
        drawables.extend(state.particles.iter().map(|p| Drawable::Particle {
            pos: p.pos,
            size: p.size,
            color: css_color(p.color),
            alpha: (p.life as f32 / p.kind.fade_base()).clamp(0.0, 1.0),
        }));
        drawables.extend(state.allies.iter().map(|a| Drawable::Ally {
            pos: a.pos,
            size: a.size,
            color: css_color(a.color),
        }));

        let player = &state.player;
        drawables.push(Drawable::Player {
            pos: player.pos,
            width: player.width,
            height: player.height,
            color: css_color(player.color),
        });
        if player.shield {
            drawables.push(Drawable::Shield {
                pos: player.pos,
                radius: player.width * 0.8,
            });
        }

        let abilities = state
            .abilities
            .iter()
            .zip(1u8..)
            .map(|((ability, slot), key)| AbilityHud {
                slot: key,
                name: Ability::name(ability),
                unlocked: slot.unlocked,
                active: slot.active,
                duration: slot.duration,
                cooldown: slot.cooldown,
            })
            .collect();

        let event = state.cosmic_event.as_ref().map(|e| EventHud {
            name: e.name.clone(),
            progress: e.progress,
            target: e.target,
            remaining_ms: e.remaining_ms(now_ms),
        });

        Self {
            width: state.playfield.width,
            height: state.playfield.height,
            drawables,
            hud: Hud {
                score: state.run.score,
                lives: state.run.lives,
                level: state.run.level,
                high_score,
                coins,
                phase: state.phase,
                allies_enabled: state.allies_enabled,
                ally_cooldown: state.ally_cooldown,
                abilities,
                event,
            },
        }
    }
}

/// `0xRRGGBBAA` to a CSS `rgba()` string
fn css_rgba(color: u32) -> String {
    let r = (color >> 24) & 0xff;
    let g = (color >> 16) & 0xff;
    let b = (color >> 8) & 0xff;
    let a = (color & 0xff) as f32 / 255.0;
    format!("rgba({}, {}, {}, {:.2})", r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, AsteroidKind, Playfield};
    use crate::tuning::Tuning;

    fn discriminant(d: &Drawable) -> usize {
        match d {
            Drawable::Star { .. } => 0,
            Drawable::PowerUp { .. } => 1,
            Drawable::Asteroid { .. } => 2,
            Drawable::Bullet { .. } => 3,
            Drawable::Particle { .. } => 4,
            Drawable::Ally { .. } => 5,
            Drawable::Player { .. } => 6,
            Drawable::Shield { .. } => 7,
        }
    }

    fn asteroid(health: u32, max_health: u32) -> Asteroid {
        Asteroid {
            id: 1,
            pos: Vec2::new(100.0, 100.0),
            size: 40.0,
            speed: 1.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            kind: AsteroidKind::Normal,
            health,
            max_health,
            outline: Vec::new(),
            color: 0x808080,
            glow: 0x8b73554c,
            is_event: false,
        }
    }

    #[test]
    fn test_draw_order() {
        let mut state = GameState::new(4, Playfield::default(), Tuning::default());
        state.start_run();
        state.fire_player_bullet();
        state.asteroids.push(asteroid(1, 2));
        state.player.shield = true;

        let frame = RenderFrame::capture(&state, 0, 0, 0.0);
        let order: Vec<usize> = frame.drawables.iter().map(discriminant).collect();
        assert!(order.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(order.last(), Some(&7));
        assert_eq!(frame.drawables.len(), 100 + 1 + 1 + 1 + 1);
    }

    #[test]
    fn test_health_bar_only_for_tough_asteroids() {
        let mut state = GameState::new(4, Playfield::default(), Tuning::default());
        state.asteroids.push(asteroid(1, 2));
        state.asteroids.push(asteroid(1, 1));
        let frame = RenderFrame::capture(&state, 0, 0, 0.0);
        let bars: Vec<Option<f32>> = frame
            .drawables
            .iter()
            .filter_map(|d| match d {
                Drawable::Asteroid { health_bar, .. } => Some(*health_bar),
                _ => None,
            })
            .collect();
        assert_eq!(bars, vec![Some(0.5), None]);
    }

    #[test]
    fn test_hud_values() {
        let mut state = GameState::new(4, Playfield::default(), Tuning::default());
        state.start_run();
        state.run.score = 1234;
        let frame = RenderFrame::capture(&state, 5000, 77, 0.0);
        assert_eq!(frame.hud.score, 1234);
        assert_eq!(frame.hud.high_score, 5000);
        assert_eq!(frame.hud.coins, 77);
        assert_eq!(frame.hud.abilities.len(), 6);
        assert_eq!(frame.hud.abilities[5].slot, 6);
        assert_eq!(frame.hud.abilities[0].name, "Light Shield");
        assert!(frame.hud.event.is_none());
    }

    #[test]
    fn test_css_rgba() {
        assert_eq!(css_rgba(0xffd43b66), "rgba(255, 212, 59, 0.40)");
    }

    #[test]
    fn test_frame_serializes() {
        let state = GameState::new(4, Playfield::default(), Tuning::default());
        let json = serde_json::to_string(&RenderFrame::capture(&state, 0, 0, 0.0)).unwrap();
        assert!(json.contains("\"type\":\"Star\""));
        assert!(json.contains("\"phase\":\"Ready\""));
    }
}
