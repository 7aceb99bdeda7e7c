//! Game loop driver
//!
//! Owns the simulation plus everything that outlives a run: wallet and
//! missions, high score and skins, the leaderboard and the storage they are
//! saved to. Each `step` runs one sim tick, then fans the tick's events out
//! to those sinks and collects notifications for the presentation layer.

use serde::Serialize;

use crate::consts::ALLY_TOGGLE_COOLDOWN;
use crate::error::CommandError;
use crate::ledger::{Economy, Ledger, Mission};
use crate::persistence::{self, SaveData, Storage};
use crate::progression::{Progression, Skin};
use crate::ranking::{self, Ranking};
use crate::render::RenderFrame;
use crate::sim::{
    Abilities, Ability, CosmicEvent, GameEvent, GamePhase, GameState, Notice, Playfield,
    TickInput, tick,
};
use crate::tuning::Tuning;

/// Shop row for an ability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityOffer {
    pub ability: Ability,
    pub name: &'static str,
    pub cost: u64,
    pub unlocked: bool,
}

/// Menu-side view of the persistent progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub economy: Economy,
    pub missions: Vec<Mission>,
    pub abilities: Vec<AbilityOffer>,
    pub skins: Vec<Skin>,
    pub selected_skin: u32,
    pub high_score: u64,
    pub estimated_rank: u64,
    pub ranking: Ranking,
}

/// The whole game: sim core plus reactive sinks
pub struct Game<S: Storage> {
    state: GameState,
    ledger: Ledger,
    progression: Progression,
    ranking: Ranking,
    storage: S,
    notices: Vec<Notice>,
    now_ms: f64,
}

impl<S: Storage> Game<S> {
    /// Load saved progress and prepare the first run
    pub fn new(seed: u64, playfield: Playfield, tuning: Tuning, storage: S, now_ms: f64) -> Self {
        let save = SaveData::load(&storage);
        let progression = Progression::new(save.high_score, &save.unlocked_skins);

        let mut state = GameState::new(seed, playfield, tuning);
        state.player.color = progression.selected_skin().color;
        if state.tuning.cosmic_events {
            let event = CosmicEvent::meteor_shower(now_ms);
            log::info!("Cosmic event active: {}", event.name);
            state.cosmic_event = Some(event);
        }

        Self {
            state,
            ledger: Ledger::new(save.economy),
            progression,
            ranking: save.ranking,
            storage,
            notices: Vec::new(),
            now_ms,
        }
    }

    /// Begin a fresh run
    pub fn start(&mut self) {
        self.state.start_run();
        log::info!("Run started (seed {})", self.state.seed);
    }

    /// Run one tick and dispatch what happened
    pub fn step(&mut self, input: &TickInput) {
        self.now_ms = input.now_ms;
        tick(&mut self.state, input);
        for event in std::mem::take(&mut self.state.events) {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Progress { kind, amount } => {
                let finished = self.ledger.record(kind, amount);
                if !finished.is_empty() {
                    persistence::save_economy(&mut self.storage, &self.ledger.economy);
                }
                for mission in finished {
                    self.notices.push(Notice::MissionComplete {
                        title: mission.title,
                        reward: mission.reward,
                    });
                }
            }
            GameEvent::CoinsEarned(coins) => {
                self.ledger.economy.credit(coins);
                persistence::save_economy(&mut self.storage, &self.ledger.economy);
            }
            GameEvent::GameOver { score, level } => self.finish_run(score, level),
            GameEvent::Notice(notice) => self.notices.push(notice),
        }
    }

    /// Pay out and record a finished run
    fn finish_run(&mut self, score: u64, level: u32) {
        let coins = self.state.tuning.coins_for_score(score);
        self.ledger.economy.credit(coins);

        let new_high = self.progression.submit_score(score);
        let unlocked = self.progression.unlock_skins();
        if let Some(rank) = self.ranking.add_run(score, level, self.now_ms) {
            log::info!("Run ranked #{}", rank);
        }

        persistence::save_records(
            &mut self.storage,
            self.progression.high_score,
            &self.progression.unlocked_ids(),
            &self.ranking,
        );
        persistence::save_economy(&mut self.storage, &self.ledger.economy);

        self.notices.push(Notice::GameOver { score, coins });
        if new_high {
            self.notices.push(Notice::NewHighScore(score));
        }
        for skin in unlocked {
            self.notices.push(Notice::SkinUnlocked(skin.name));
        }
    }

    /// Buy an ability with coins
    pub fn unlock_ability(&mut self, ability: Ability) -> Result<(), CommandError> {
        let result = self
            .state
            .abilities
            .unlock(ability, &mut self.ledger.economy);
        if result.is_ok() {
            persistence::save_economy(&mut self.storage, &self.ledger.economy);
            self.notices.push(Notice::AbilityUnlocked(ability));
        }
        self.report(result)
    }

    /// Switch allies on or off
    pub fn toggle_allies(&mut self) -> Result<(), CommandError> {
        let state = &mut self.state;
        let result = if state.ally_cooldown > 0 {
            Err(CommandError::AlliesOnCooldown {
                remaining: state.ally_cooldown,
            })
        } else {
            state.allies_enabled = !state.allies_enabled;
            if state.allies_enabled {
                state.ally_cooldown = ALLY_TOGGLE_COOLDOWN;
                self.notices.push(Notice::AlliesEnabled);
            } else {
                state.allies.clear();
                self.notices.push(Notice::AlliesDisabled);
            }
            Ok(())
        };
        self.report(result)
    }

    /// Equip an unlocked skin
    pub fn select_skin(&mut self, id: u32) -> Result<(), CommandError> {
        let result = self.progression.select(id).map(|skin| (skin.color, skin.name.clone()));
        let result = result.map(|(color, name)| {
            self.state.player.color = color;
            self.notices.push(Notice::SkinEquipped(name));
        });
        self.report(result)
    }

    fn report(&mut self, result: Result<(), CommandError>) -> Result<(), CommandError> {
        if let Err(err) = &result {
            log::debug!("Command rejected: {}", err);
            self.notices.push(Notice::Rejected(err.clone()));
        }
        result
    }

    /// Take the pending notifications
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::capture(
            &self.state,
            self.progression.high_score,
            self.ledger.economy.coins,
            self.now_ms,
        )
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            economy: self.ledger.economy,
            missions: self.ledger.missions().to_vec(),
            abilities: self
                .state
                .abilities
                .iter()
                .map(|(ability, slot)| AbilityOffer {
                    ability,
                    name: ability.name(),
                    cost: ability.cost(),
                    unlocked: slot.unlocked,
                })
                .collect(),
            skins: self.progression.skins().to_vec(),
            selected_skin: self.progression.selected_skin().id,
            high_score: self.progression.high_score,
            estimated_rank: self.estimated_rank(),
            ranking: self.ranking.clone(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn missions(&self) -> &[Mission] {
        self.ledger.missions()
    }

    pub fn abilities(&self) -> &Abilities {
        &self.state.abilities
    }

    pub fn skins(&self) -> &[Skin] {
        self.progression.skins()
    }

    pub fn economy(&self) -> &Economy {
        &self.ledger.economy
    }

    pub fn high_score(&self) -> u64 {
        self.progression.high_score
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    pub fn estimated_rank(&self) -> u64 {
        ranking::estimated_rank(self.progression.high_score)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
