use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::config::GameConfig;
use crate::engine;
use crate::error::{GameError, Result};
use crate::record::RoundRecord;
use crate::scenarios::{self, Scenario};
use crate::scoring::{self, Rating};
use crate::state::GameState;

/// Where the session sits in its lifecycle. Resolution happens inside a
/// single `submit_round` call, so there is no observable resolving phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SessionPhase {
    NotStarted,
    InRound,
    GameOver,
}

/// Owns the one `GameState` and the randomness that drives it. The only
/// writer of game state.
pub struct Session<R = ChaCha20Rng> {
    state: GameState,
    phase: SessionPhase,
    rng: R,
    config: GameConfig,
    /// Incident teaser shown while the player picks cover. Cosmetic: the
    /// resolved scenario is rolled independently at submit time.
    teaser: Option<&'static Scenario>,
}

impl Session<ChaCha20Rng> {
    /// Session seeded from `config.seed`.
    pub fn from_config(config: GameConfig) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(config.seed);
        Session::with_rng(config, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Session {
            state: GameState::new(&config),
            phase: SessionPhase::NotStarted,
            rng,
            config,
            teaser: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn teaser(&self) -> Option<&'static Scenario> {
        self.teaser
    }

    pub fn latest_record(&self) -> Option<&RoundRecord> {
        self.state.latest_record()
    }

    /// Begin a fresh game from any phase.
    pub fn start_game(&mut self) -> &GameState {
        self.state = GameState::new(&self.config);
        self.phase = SessionPhase::InRound;
        self.roll_teaser();
        tracing::debug!(money = self.state.money, health = self.state.health, "game started");
        &self.state
    }

    /// Full reset after a finished game.
    pub fn restart(&mut self) -> Result<&GameState> {
        self.require(SessionPhase::GameOver, "restart")?;
        Ok(self.start_game())
    }

    /// Buy or drop a policy for the coming wave. Rejected outside a round,
    /// and an unknown name leaves the selection untouched.
    pub fn toggle_policy(&mut self, name: &str) -> Result<&GameState> {
        self.require(SessionPhase::InRound, "toggle_policy")?;
        self.state = self.state.toggle_policy(name)?;
        Ok(&self.state)
    }

    /// Roll this wave's incident and resolve it.
    pub fn submit_round(&mut self) -> Result<&RoundRecord> {
        self.require(SessionPhase::InRound, "submit_round")?;
        let scenario = scenarios::pick_scenario(&mut self.rng);
        self.resolve(scenario)
    }

    /// Resolve this wave against a scenario chosen by the caller.
    pub fn submit_round_with(&mut self, scenario: &Scenario) -> Result<&RoundRecord> {
        self.require(SessionPhase::InRound, "submit_round")?;
        self.resolve(scenario)
    }

    /// Score of a finished game.
    pub fn final_score(&self) -> Option<i64> {
        (self.phase == SessionPhase::GameOver)
            .then(|| scoring::final_score(&self.state, &self.config))
    }

    pub fn rating(&self) -> Option<Rating> {
        self.final_score().map(scoring::performance_rating)
    }

    fn resolve(&mut self, scenario: &Scenario) -> Result<&RoundRecord> {
        let (next, record) = engine::resolve_round(&self.state, scenario, &self.config);
        tracing::debug!(
            wave = record.wave.0,
            scenario = ?record.scenario_kind,
            premium = record.premium_total,
            claim = record.claim_cost,
            money = record.money_after,
            health = record.health_after,
            "round resolved"
        );
        self.state = next;

        if self.state.is_game_over {
            self.phase = SessionPhase::GameOver;
            self.teaser = None;
            let score = scoring::final_score(&self.state, &self.config);
            tracing::info!(
                waves = self.state.decision_history.len(),
                money = self.state.money,
                health = self.state.health,
                score,
                rating = %scoring::performance_rating(score),
                "game over"
            );
        } else {
            self.roll_teaser();
        }

        match self.state.latest_record() {
            Some(r) => Ok(r),
            None => unreachable!("resolution appends a record"),
        }
    }

    fn roll_teaser(&mut self) {
        let all = scenarios::list_scenarios();
        self.teaser = Some(&all[self.rng.random_range(0..all.len())]);
    }

    fn require(&self, phase: SessionPhase, operation: &'static str) -> Result<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::InvalidTransition { operation, phase: self.phase })
        }
    }
}
