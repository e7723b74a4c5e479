//! Round resolution: one scenario plus the held policies become a money and
//! health outcome, the next game state, and an audit record.

use crate::catalog::{self, InsuranceProduct};
use crate::config::GameConfig;
use crate::policy::SelectedPolicies;
use crate::record::{self, Outcome, RoundRecord};
use crate::scenarios::Scenario;
use crate::state::GameState;

/// Cost of one incident against one selection, before income.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub premium_total: i64,
    pub claim_cost: i64,
    pub health_lost: i64,
    pub outcome: Outcome,
}

impl Assessment {
    pub fn money_lost(&self) -> i64 {
        self.premium_total + self.claim_cost
    }
}

/// Price `scenario` against `selected`.
///
/// Every held premium is paid. Only a policy in the scenario's category
/// mitigates: the claim is its deductible plus the uncovered share of the
/// base loss. With no such policy, the category's Basic-tier loss applies
/// in full.
pub fn assess(selected: &SelectedPolicies, scenario: &Scenario) -> Assessment {
    let premium_total = selected.premium_total();
    match catalog::best_match(scenario.category, selected.iter()) {
        Some(policy) => Assessment {
            premium_total,
            claim_cost: policy.claim_cost(),
            health_lost: policy.health_lost(),
            outcome: protected_by(policy),
        },
        None => {
            let baseline = catalog::baseline_for(scenario.category).base_loss_if_uninsured;
            Assessment {
                premium_total,
                claim_cost: baseline.money,
                health_lost: baseline.health,
                outcome: Outcome::Unprotected { category: scenario.category },
            }
        }
    }
}

fn protected_by(policy: &'static InsuranceProduct) -> Outcome {
    Outcome::Protected {
        product: policy.name,
        tier: policy.tier,
        coverage_percent: policy.coverage_percent,
        deductible: policy.deductible,
    }
}

/// Resolve the current wave of `state` against `scenario`.
///
/// Money and health are not clamped; the game-over flag is raised when the
/// next wave would pass `config.max_waves` or either value reaches zero.
/// The returned state has the wave advanced, the record appended and the
/// selection cleared. Calling this on a finished game is a caller error.
pub fn resolve_round(
    state: &GameState,
    scenario: &Scenario,
    config: &GameConfig,
) -> (GameState, RoundRecord) {
    debug_assert!(!state.is_game_over, "resolve_round called after game over");

    let assessment = assess(&state.selected_policies, scenario);
    let income = config.income_for(state.wave);
    let money = state.money + income - assessment.money_lost();
    let health = state.health - assessment.health_lost;
    let next_wave = state.wave.next();
    let is_game_over = next_wave.0 > config.max_waves || health <= 0 || money <= 0;

    let record = RoundRecord {
        wave: state.wave,
        scenario_kind: scenario.kind,
        scenario: scenario.description,
        policies: state.selected_policies.names(),
        premium_total: assessment.premium_total,
        claim_cost: assessment.claim_cost,
        money_lost: assessment.money_lost(),
        health_lost: assessment.health_lost,
        income,
        money_after: money,
        health_after: health,
        summary: record::summarize(
            &assessment.outcome,
            assessment.claim_cost,
            assessment.health_lost,
            income,
        ),
        outcome: assessment.outcome,
    };

    let mut decision_history = state.decision_history.clone();
    decision_history.push(record.clone());

    let next = GameState {
        wave: next_wave,
        money,
        health,
        selected_policies: SelectedPolicies::new(),
        decision_history,
        is_game_over,
    };
    (next, record)
}
