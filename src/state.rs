use serde::Serialize;

use crate::config::GameConfig;
use crate::error::Result;
use crate::policy::SelectedPolicies;
use crate::record::RoundRecord;
use crate::types::Wave;

/// Durable simulation state. Presentation stages live with the renderer,
/// which only ever sees snapshots of this and the latest `RoundRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub wave: Wave,
    /// Signed: can dip below zero on the wave that ends the game.
    pub money: i64,
    /// Signed for the same reason as `money`.
    pub health: i64,
    pub selected_policies: SelectedPolicies,
    /// One record per resolved wave, oldest first.
    pub decision_history: Vec<RoundRecord>,
    pub is_game_over: bool,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        GameState {
            wave: Wave::FIRST,
            money: config.starting_money,
            health: config.starting_health,
            selected_policies: SelectedPolicies::new(),
            decision_history: Vec::new(),
            is_game_over: false,
        }
    }

    /// Copy of this state with `name` bought or dropped.
    pub fn toggle_policy(&self, name: &str) -> Result<Self> {
        Ok(GameState {
            selected_policies: self.selected_policies.toggled(name)?,
            ..self.clone()
        })
    }

    pub fn latest_record(&self) -> Option<&RoundRecord> {
        self.decision_history.last()
    }

    /// Income this wave minus premiums on the current selection, before
    /// any incident loss.
    pub fn projected_net_income(&self, config: &GameConfig) -> i64 {
        config.income_for(self.wave) - self.selected_policies.premium_total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[test]
    fn new_state_uses_config() {
        let s = GameState::new(&GameConfig::canonical());
        assert_eq!(s.wave, Wave(1));
        assert_eq!(s.money, 10_000);
        assert_eq!(s.health, 100);
        assert!(s.selected_policies.is_empty());
        assert!(s.decision_history.is_empty());
        assert!(!s.is_game_over);
    }

    #[test]
    fn toggle_policy_is_pure() {
        let s = GameState::new(&GameConfig::canonical());
        let t = s.toggle_policy("Basic Home Fortification").unwrap();
        assert!(s.selected_policies.is_empty());
        assert!(t.selected_policies.contains("Basic Home Fortification"));
        assert_eq!(t.money, s.money);
        assert_eq!(t.toggle_policy("Basic Home Fortification").unwrap(), s);
    }

    #[test]
    fn toggle_policy_rejects_unknown_name() {
        let s = GameState::new(&GameConfig::canonical());
        assert!(matches!(
            s.toggle_policy("Zombie Repellent"),
            Err(GameError::UnknownProduct(_))
        ));
    }

    #[test]
    fn projected_net_income_subtracts_premiums() {
        let cfg = GameConfig::canonical();
        let s = GameState::new(&cfg)
            .toggle_policy("Standard Home Fortification")
            .and_then(|s| s.toggle_policy("Basic Supply Protection"))
            .unwrap();
        assert_eq!(s.projected_net_income(&cfg), 1_000 - 500 - 400);
    }
}
