use serde::Serialize;

use crate::catalog::{Category, Tier};
use crate::scenarios::ScenarioKind;
use crate::types::Wave;

/// How the wave's incident met the player's cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// A held policy answered the claim.
    Protected {
        product: &'static str,
        tier: Tier,
        coverage_percent: u8,
        deductible: i64,
    },
    /// Nothing held for the incident's category; the Basic-tier baseline
    /// loss applies in full.
    Unprotected { category: Category },
}

impl Outcome {
    pub fn is_protected(&self) -> bool {
        matches!(self, Outcome::Protected { .. })
    }
}

/// Audit entry for one resolved wave. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub wave: Wave,
    pub scenario_kind: ScenarioKind,
    pub scenario: &'static str,
    /// Names of the policies held during the wave.
    pub policies: Vec<String>,
    pub premium_total: i64,
    /// Deductible plus uncovered loss, or the uninsured baseline.
    pub claim_cost: i64,
    /// premium_total + claim_cost.
    pub money_lost: i64,
    pub health_lost: i64,
    pub income: i64,
    pub money_after: i64,
    pub health_after: i64,
    pub outcome: Outcome,
    pub summary: String,
}

impl RoundRecord {
    /// income − money_lost.
    pub fn net_money_change(&self) -> i64 {
        self.income - self.money_lost
    }
}

/// Player-facing narrative for a resolved wave.
pub fn summarize(outcome: &Outcome, claim_cost: i64, health_lost: i64, income: i64) -> String {
    match outcome {
        Outcome::Protected { tier, coverage_percent, deductible, .. } => format!(
            "Protected by {tier} insurance! Paid ${claim_cost} ({coverage_percent}% coverage + \
             ${deductible} deductible). Earned ${income} from survival activities."
        ),
        Outcome::Unprotected { .. } => format!(
            "No insurance! Lost ${claim_cost} and {health_lost} health points. \
             Still earned ${income} from survival activities."
        ),
    }
}
