//! Game state and core simulation types
//!
//! Everything the per-tick simulation reads or mutates lives here. Positions
//! are in playfield pixels with the origin at the top-left, y pointing down.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::abilities::Abilities;
use super::events::GameEvent;
use crate::consts::*;
use crate::random_in;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the menu for a run to start
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused, nothing advances
    Paused,
    /// Run ended
    GameOver,
}

/// Visible play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Base movement per tick
    pub speed: f32,
    pub shield: bool,
    pub shield_ticks: u32,
    /// Color of the equipped skin
    pub color: u32,
}

impl Player {
    /// A fresh ship at the spawn point near the bottom of the playfield
    pub fn new(field: &Playfield, color: u32) -> Self {
        Self {
            pos: Vec2::new(field.width / 2.0, field.height - PLAYER_START_OFFSET),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            shield: false,
            shield_ticks: 0,
            color,
        }
    }

    /// Collision radius (half the ship width)
    #[inline]
    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Ally,
}

/// A bullet travelling straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Upward movement per tick
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub color: u32,
    pub owner: BulletOwner,
    /// Piercing bullets survive hits
    pub piercing: bool,
    /// Asteroid IDs a piercing bullet has already damaged
    #[serde(default)]
    pub struck: Vec<u32>,
}

impl Bullet {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }

    /// Fully above the top edge
    pub fn is_expired(&self) -> bool {
        self.pos.y < -self.height
    }
}

/// Asteroid behaviour/appearance category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidKind {
    Normal,
    /// Drifts sideways on a sine curve
    Moving,
    /// Worth a score bonus
    Spinning,
}

impl AsteroidKind {
    pub const ALL: [AsteroidKind; 3] = [
        AsteroidKind::Normal,
        AsteroidKind::Moving,
        AsteroidKind::Spinning,
    ];

    /// Body color choices
    pub fn palette(self) -> &'static [u32] {
        match self {
            AsteroidKind::Normal => &[0x8b7355, 0xa0522d, 0xcd853f, 0x8b4513, 0xd2691e],
            AsteroidKind::Moving => &[0x696969, 0x808080, 0xa9a9a9, 0x708090, 0x778899],
            AsteroidKind::Spinning => &[0x556b2f, 0x6b8e23, 0x9acd32, 0x7cfc00, 0xadff2f],
        }
    }

    /// Glow color as `0xRRGGBBAA`
    pub fn glow(self) -> u32 {
        match self {
            AsteroidKind::Normal => 0x8b73554c,
            AsteroidKind::Moving => 0x6969694c,
            AsteroidKind::Spinning => 0x556b2f66,
        }
    }
}

/// Glow used by event asteroids (`0xRRGGBBAA`)
pub const EVENT_GLOW: u32 = 0xffd43b66;

/// A falling, rotating asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// Radius; also drives render scale and health
    pub size: f32,
    /// Downward movement per tick
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub kind: AsteroidKind,
    pub health: u32,
    pub max_health: u32,
    /// Jagged outline relative to the center
    pub outline: Vec<Vec2>,
    pub color: u32,
    pub glow: u32,
    /// Flagged during a cosmic event; double score and event progress
    pub is_event: bool,
}

impl Asteroid {
    /// Hit points for an asteroid of this size
    pub fn health_for_size(size: f32) -> u32 {
        (size / 20.0).ceil() as u32
    }

    /// Passed below the bottom edge
    pub fn is_expired(&self, field: &Playfield) -> bool {
        self.pos.y > field.height + self.size * 2.0
    }
}

/// Particle render style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Rock,
    Spark,
    Explosion,
    Generic,
}

impl ParticleKind {
    /// Life value that maps to full opacity
    pub fn fade_base(self) -> f32 {
        match self {
            ParticleKind::Spark => 25.0,
            _ => 30.0,
        }
    }
}

/// A cosmetic particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: u32,
    /// Remaining ticks
    pub life: u32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn is_expired(&self) -> bool {
        self.life == 0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// +1 life (capped)
    Life,
    /// Bonus score
    Score,
    /// Cosmic event item: bonus score and coins
    Event,
}

impl PowerUpKind {
    pub fn color(self) -> u32 {
        match self {
            PowerUpKind::Life => RED,
            PowerUpKind::Score => GREEN,
            PowerUpKind::Event => GOLD,
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    pub kind: PowerUpKind,
    pub color: u32,
}

impl PowerUp {
    pub fn is_expired(&self, field: &Playfield) -> bool {
        self.pos.y > field.height + self.size
    }
}

/// A friendly wingman rising from the bottom edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ally {
    pub id: u32,
    pub pos: Vec2,
    /// Upward movement per tick
    pub speed: f32,
    pub size: f32,
    pub color: u32,
    /// Wall-clock time of the last shot (ms)
    pub last_shot_ms: f64,
}

impl Ally {
    pub fn is_expired(&self) -> bool {
        self.pos.y < -self.size
    }
}

/// Background star (cosmetic)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub brightness: u8,
}

/// A time-boxed global modifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmicEvent {
    pub name: String,
    pub progress: u32,
    pub target: u32,
    /// Wall-clock expiry (ms)
    pub ends_at_ms: f64,
}

impl CosmicEvent {
    /// The standard week-long meteor shower
    pub fn meteor_shower(now_ms: f64) -> Self {
        Self {
            name: "Meteor Shower".to_string(),
            progress: 0,
            target: COSMIC_EVENT_TARGET,
            ends_at_ms: now_ms + COSMIC_EVENT_DURATION_MS,
        }
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms >= self.ends_at_ms
    }

    /// Milliseconds left (0 once expired)
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.ends_at_ms - now_ms).max(0.0)
    }
}

/// Per-run score counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            level: 1,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub phase: GamePhase,
    /// Simulation tick counter (gameplay pacing)
    pub time_ticks: u64,
    pub run: Scoreboard,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub allies: Vec<Ally>,
    pub stars: Vec<Star>,
    pub abilities: Abilities,
    pub allies_enabled: bool,
    /// Ticks before allies can be toggled again
    pub ally_cooldown: u32,
    pub cosmic_event: Option<CosmicEvent>,
    /// Events raised this tick, drained by the driver
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, playfield: Playfield, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            playfield,
            phase: GamePhase::Ready,
            time_ticks: 0,
            run: Scoreboard::default(),
            player: Player::new(&playfield, ALLY_BLUE),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            allies: Vec::new(),
            stars: Vec::new(),
            abilities: Abilities::default(),
            allies_enabled: false,
            ally_cooldown: 0,
            cosmic_event: None,
            events: Vec::new(),
            next_id: 1,
        };

        state.create_stars();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset per-run state and enter Playing.
    ///
    /// Ability unlocks, the ally toggle and the cosmic event survive.
    pub fn start_run(&mut self) {
        let color = self.player.color;
        self.run = Scoreboard::default();
        self.player = Player::new(&self.playfield, color);
        self.bullets.clear();
        self.asteroids.clear();
        self.particles.clear();
        self.power_ups.clear();
        self.allies.clear();
        self.abilities.reset_timers();
        self.events.clear();
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    /// Fire one bullet from the ship's nose
    pub fn fire_player_bullet(&mut self) {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos: self.player.pos - Vec2::new(0.0, 20.0),
            speed: BULLET_SPEED,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            color: self.player.color,
            owner: BulletOwner::Player,
            piercing: false,
            struck: Vec::new(),
        });
    }

    /// Fill the starfield
    fn create_stars(&mut self) {
        let field = self.playfield;
        self.stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    random_in(&mut self.rng, 0.0, field.width),
                    random_in(&mut self.rng, 0.0, field.height),
                ),
                size: random_in(&mut self.rng, 1.0, 3.0),
                speed: random_in(&mut self.rng, 0.5, 2.5),
                brightness: random_in(&mut self.rng, 100.0, 255.0) as u8,
            })
            .collect();
    }
}
