//! Player abilities
//!
//! Six fixed abilities, each with an unlock purchase and a small state
//! machine: locked -> ready -> active (duration) or cooldown -> ready.
//! Sustained abilities count a duration, instantaneous ones a cooldown,
//! never both.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::Fx;
use super::events::{GameEvent, Notice};
use super::state::{Bullet, BulletOwner, GameState};
use crate::consts::*;
use crate::error::CommandError;
use crate::ledger::Economy;
use crate::{circles_overlap, random_in};

/// Ability identities, in hotkey order (1-6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Shield,
    SacredAura,
    LightSpeed,
    Teleport,
    CosmicRay,
    SolarExplosion,
}

/// How an ability's timer behaves after activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityTimer {
    /// Stays active for this many ticks
    Duration(u32),
    /// Fires instantly, then locks out for this many ticks
    Cooldown(u32),
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Shield,
        Ability::SacredAura,
        Ability::LightSpeed,
        Ability::Teleport,
        Ability::CosmicRay,
        Ability::SolarExplosion,
    ];

    /// Map a 1-based hotkey slot to an ability
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1..=6 => Some(Self::ALL[slot as usize - 1]),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Ability::Shield => "Light Shield",
            Ability::SacredAura => "Sacred Aura",
            Ability::LightSpeed => "Light Speed",
            Ability::Teleport => "Teleport",
            Ability::CosmicRay => "Cosmic Ray",
            Ability::SolarExplosion => "Solar Explosion",
        }
    }

    /// Unlock price in coins
    pub fn cost(self) -> u64 {
        match self {
            Ability::Shield => 500,
            Ability::SacredAura => 1000,
            Ability::LightSpeed => 800,
            Ability::Teleport => 1500,
            Ability::CosmicRay => 1200,
            Ability::SolarExplosion => 2000,
        }
    }

    pub fn timer(self) -> AbilityTimer {
        match self {
            Ability::Shield => AbilityTimer::Duration(300),
            Ability::SacredAura => AbilityTimer::Duration(180),
            Ability::LightSpeed => AbilityTimer::Duration(240),
            Ability::Teleport => AbilityTimer::Cooldown(600),
            Ability::CosmicRay => AbilityTimer::Cooldown(300),
            Ability::SolarExplosion => AbilityTimer::Cooldown(900),
        }
    }
}

/// Per-ability state record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub unlocked: bool,
    pub active: bool,
    /// Remaining active ticks (sustained abilities)
    pub duration: u32,
    /// Remaining lockout ticks (instantaneous abilities)
    pub cooldown: u32,
}

/// All six ability slots, indexed by `Ability`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    slots: [AbilitySlot; 6],
}

impl Abilities {
    pub fn slot(&self, ability: Ability) -> &AbilitySlot {
        &self.slots[ability.index()]
    }

    pub fn slot_mut(&mut self, ability: Ability) -> &mut AbilitySlot {
        &mut self.slots[ability.index()]
    }

    pub fn is_active(&self, ability: Ability) -> bool {
        self.slot(ability).active
    }

    /// Abilities in hotkey order with their state
    pub fn iter(&self) -> impl Iterator<Item = (Ability, &AbilitySlot)> {
        Ability::ALL.into_iter().map(move |a| (a, self.slot(a)))
    }

    /// Buy an ability
    pub fn unlock(&mut self, ability: Ability, wallet: &mut Economy) -> Result<(), CommandError> {
        if self.slot(ability).unlocked {
            return Err(CommandError::AlreadyUnlocked(ability));
        }
        wallet.spend(ability.cost())?;
        self.slot_mut(ability).unlocked = true;
        log::info!("Unlocked {}", ability.name());
        Ok(())
    }

    /// Clear every timer, keeping unlocks (new run)
    pub fn reset_timers(&mut self) {
        for slot in &mut self.slots {
            *slot = AbilitySlot {
                unlocked: slot.unlocked,
                ..AbilitySlot::default()
            };
        }
    }
}

/// Activate an ability, applying its effect immediately
pub fn activate(state: &mut GameState, ability: Ability) -> Result<(), CommandError> {
    let slot = *state.abilities.slot(ability);
    if !slot.unlocked {
        return Err(CommandError::AbilityLocked(ability));
    }
    if slot.cooldown > 0 {
        return Err(CommandError::AbilityOnCooldown {
            ability,
            remaining: slot.cooldown,
        });
    }

    match ability {
        Ability::Shield => state.player.shield = true,
        Ability::SacredAura => sacred_aura(state),
        Ability::LightSpeed => {}
        Ability::Teleport => teleport(state),
        Ability::CosmicRay => cosmic_ray(state),
        Ability::SolarExplosion => solar_explosion(state),
    }

    let slot = state.abilities.slot_mut(ability);
    match ability.timer() {
        AbilityTimer::Duration(ticks) => {
            slot.active = true;
            slot.duration = ticks;
        }
        AbilityTimer::Cooldown(ticks) => {
            slot.cooldown = ticks;
        }
    }
    if ability == Ability::Shield {
        state.player.shield_ticks = state.abilities.slot(ability).duration;
    }

    log::debug!("Activated {} at tick {}", ability.name(), state.time_ticks);
    state
        .events
        .push(GameEvent::Notice(Notice::AbilityActivated(ability)));
    Ok(())
}

/// Count every unlocked ability's timers down by one tick
pub fn decay(state: &mut GameState) {
    for ability in Ability::ALL {
        let slot = state.abilities.slot_mut(ability);
        if !slot.unlocked {
            continue;
        }
        if slot.active && slot.duration > 0 {
            slot.duration -= 1;
            if slot.duration == 0 {
                slot.active = false;
                state
                    .events
                    .push(GameEvent::Notice(Notice::AbilityEnded(ability)));
            }
        }
        if slot.cooldown > 0 {
            slot.cooldown -= 1;
        }
    }

    // The ship's shield mirrors the Shield ability
    let shield = state.abilities.slot(Ability::Shield);
    state.player.shield_ticks = shield.duration;
    state.player.shield = shield.active;

    state.ally_cooldown = state.ally_cooldown.saturating_sub(1);
}

/// Destroy every asteroid near the ship
fn sacred_aura(state: &mut GameState) {
    let center = state.player.pos;
    let points = state.tuning.aura_points_per_level * state.run.level as u64;
    let mut fx = Fx::new(&mut state.particles, &mut state.rng);
    let mut destroyed = 0u64;
    state.asteroids.retain(|asteroid| {
        if circles_overlap(center, AURA_RADIUS, asteroid.pos, 0.0) {
            fx.asteroid_explosion(asteroid);
            destroyed += 1;
            false
        } else {
            true
        }
    });
    state.run.score += points * destroyed;
}

/// Jump to a random spot away from the edges
fn teleport(state: &mut GameState) {
    let field = state.playfield;
    let x = random_in(&mut state.rng, 50.0, field.width - 50.0);
    let y = random_in(&mut state.rng, 50.0, field.height - 100.0);
    state.player.pos = Vec2::new(x, y);
    Fx::new(&mut state.particles, &mut state.rng).burst(state.player.pos, PURPLE, 20);
}

/// Fan of piercing bullets ahead of the ship
fn cosmic_ray(state: &mut GameState) {
    let origin = state.player.pos - Vec2::new(0.0, 20.0);
    let mid = (COSMIC_RAY_BULLETS / 2) as f32;
    for i in 0..COSMIC_RAY_BULLETS {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: origin + Vec2::new((i as f32 - mid) * COSMIC_RAY_SPACING, 0.0),
            speed: COSMIC_RAY_SPEED,
            width: COSMIC_RAY_WIDTH,
            height: COSMIC_RAY_HEIGHT,
            color: PURPLE,
            owner: BulletOwner::Player,
            piercing: true,
            struck: Vec::new(),
        });
    }
}

/// Destroy every asteroid on screen
fn solar_explosion(state: &mut GameState) {
    let points = state.tuning.solar_points_per_level * state.run.level as u64;
    let center = state.playfield.center();
    let mut fx = Fx::new(&mut state.particles, &mut state.rng);
    for asteroid in &state.asteroids {
        fx.asteroid_explosion(asteroid);
    }
    fx.burst(center, GOLD, 50);
    state.run.score += points * state.asteroids.len() as u64;
    state.asteroids.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, AsteroidKind, Playfield};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, Playfield::default(), Tuning::default());
        state.start_run();
        state
    }

    fn unlock_all(state: &mut GameState) {
        for ability in Ability::ALL {
            state.abilities.slot_mut(ability).unlocked = true;
        }
    }

    fn asteroid_at(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        state.asteroids.push(Asteroid {
            id,
            pos,
            size: 30.0,
            speed: 1.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            kind: AsteroidKind::Normal,
            health: 2,
            max_health: 2,
            outline: Vec::new(),
            color: 0x808080,
            glow: 0,
            is_event: false,
        });
    }

    #[test]
    fn test_from_slot() {
        assert_eq!(Ability::from_slot(1), Some(Ability::Shield));
        assert_eq!(Ability::from_slot(6), Some(Ability::SolarExplosion));
        assert_eq!(Ability::from_slot(0), None);
        assert_eq!(Ability::from_slot(7), None);
    }

    #[test]
    fn test_locked_ability_is_rejected() {
        let mut state = playing_state();
        let err = activate(&mut state, Ability::Shield).unwrap_err();
        assert_eq!(err, CommandError::AbilityLocked(Ability::Shield));
        assert!(!state.player.shield);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_unlock_spends_coins_once() {
        let mut abilities = Abilities::default();
        let mut wallet = Economy::new(600, 0);
        abilities.unlock(Ability::Shield, &mut wallet).unwrap();
        assert_eq!(wallet.coins, 100);
        assert_eq!(
            abilities.unlock(Ability::Shield, &mut wallet),
            Err(CommandError::AlreadyUnlocked(Ability::Shield))
        );
        assert_eq!(
            abilities.unlock(Ability::Teleport, &mut wallet),
            Err(CommandError::InsufficientCoins {
                cost: 1500,
                available: 100
            })
        );
        assert!(!abilities.slot(Ability::Teleport).unlocked);
        assert_eq!(wallet.coins, 100);
    }

    #[test]
    fn test_shield_sets_player_shield_and_decays() {
        let mut state = playing_state();
        unlock_all(&mut state);
        activate(&mut state, Ability::Shield).unwrap();
        assert!(state.player.shield);
        assert_eq!(state.player.shield_ticks, 300);
        assert_eq!(state.abilities.slot(Ability::Shield).duration, 300);

        decay(&mut state);
        assert_eq!(state.abilities.slot(Ability::Shield).duration, 299);
        assert_eq!(state.player.shield_ticks, 299);

        for _ in 0..299 {
            decay(&mut state);
        }
        assert!(!state.player.shield);
        assert!(!state.abilities.is_active(Ability::Shield));
        assert!(
            state
                .events
                .contains(&GameEvent::Notice(Notice::AbilityEnded(Ability::Shield)))
        );
    }

    #[test]
    fn test_shield_reactivation_refreshes_ship_timer() {
        let mut state = playing_state();
        unlock_all(&mut state);
        activate(&mut state, Ability::Shield).unwrap();
        for _ in 0..10 {
            decay(&mut state);
        }
        assert_eq!(state.player.shield_ticks, 290);

        activate(&mut state, Ability::Shield).unwrap();
        assert_eq!(state.player.shield_ticks, 300);
        assert_eq!(state.abilities.slot(Ability::Shield).duration, 300);
    }

    #[test]
    fn test_cooldown_blocks_reactivation() {
        let mut state = playing_state();
        unlock_all(&mut state);
        activate(&mut state, Ability::CosmicRay).unwrap();
        assert_eq!(state.bullets.len(), COSMIC_RAY_BULLETS);
        assert!(state.bullets.iter().all(|b| b.piercing));

        let err = activate(&mut state, Ability::CosmicRay).unwrap_err();
        assert_eq!(
            err,
            CommandError::AbilityOnCooldown {
                ability: Ability::CosmicRay,
                remaining: 300
            }
        );
        assert_eq!(state.bullets.len(), COSMIC_RAY_BULLETS);

        for _ in 0..300 {
            decay(&mut state);
        }
        assert!(activate(&mut state, Ability::CosmicRay).is_ok());
    }

    #[test]
    fn test_cosmic_ray_fan_is_centered_on_ship() {
        let mut state = playing_state();
        unlock_all(&mut state);
        activate(&mut state, Ability::CosmicRay).unwrap();
        let xs: Vec<f32> = state.bullets.iter().map(|b| b.pos.x).collect();
        let px = state.player.pos.x;
        assert_eq!(xs, vec![px - 20.0, px - 10.0, px, px + 10.0, px + 20.0]);
    }

    #[test]
    fn test_sacred_aura_destroys_only_nearby() {
        let mut state = playing_state();
        unlock_all(&mut state);
        state.run.level = 3;
        let p = state.player.pos;
        asteroid_at(&mut state, p + Vec2::new(100.0, 0.0));
        asteroid_at(&mut state, p + Vec2::new(0.0, -149.0));
        asteroid_at(&mut state, p + Vec2::new(0.0, -300.0));

        activate(&mut state, Ability::SacredAura).unwrap();
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.run.score, 2 * 10 * 3);
        assert!(state.abilities.is_active(Ability::SacredAura));
        assert_eq!(state.abilities.slot(Ability::SacredAura).cooldown, 0);
    }

    #[test]
    fn test_solar_explosion_clears_screen() {
        let mut state = playing_state();
        unlock_all(&mut state);
        state.run.level = 2;
        asteroid_at(&mut state, Vec2::new(100.0, 100.0));
        asteroid_at(&mut state, Vec2::new(300.0, 50.0));
        asteroid_at(&mut state, Vec2::new(700.0, 400.0));

        activate(&mut state, Ability::SolarExplosion).unwrap();
        assert!(state.asteroids.is_empty());
        // 20 per asteroid per level
        assert_eq!(state.run.score, 20 * 2 * 3);
        assert_eq!(state.abilities.slot(Ability::SolarExplosion).cooldown, 900);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_teleport_stays_in_bounds() {
        let mut state = playing_state();
        unlock_all(&mut state);
        for _ in 0..20 {
            state.abilities.slot_mut(Ability::Teleport).cooldown = 0;
            activate(&mut state, Ability::Teleport).unwrap();
            let pos = state.player.pos;
            assert!(pos.x >= 50.0 && pos.x < 750.0);
            assert!(pos.y >= 50.0 && pos.y < 500.0);
        }
    }

    #[test]
    fn test_light_speed_only_sets_duration() {
        let mut state = playing_state();
        unlock_all(&mut state);
        let before = state.player.pos;
        activate(&mut state, Ability::LightSpeed).unwrap();
        assert_eq!(state.player.pos, before);
        assert_eq!(state.abilities.slot(Ability::LightSpeed).duration, 240);
    }

    #[test]
    fn test_ally_cooldown_decays() {
        let mut state = playing_state();
        state.ally_cooldown = 2;
        decay(&mut state);
        decay(&mut state);
        decay(&mut state);
        assert_eq!(state.ally_cooldown, 0);
    }

    proptest! {
        #[test]
        fn prop_duration_and_cooldown_never_both_positive(
            presses in proptest::collection::vec(proptest::option::of(1u8..=8), 0..400)
        ) {
            let mut state = playing_state();
            unlock_all(&mut state);
            for press in presses {
                if let Some(ability) = press.and_then(Ability::from_slot) {
                    let _ = activate(&mut state, ability);
                }
                decay(&mut state);
                for (_, slot) in state.abilities.iter() {
                    prop_assert!(!(slot.duration > 0 && slot.cooldown > 0));
                }
            }
        }
    }
}
