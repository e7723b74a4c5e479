use rand::Rng;
use serde::Serialize;

use crate::catalog::Category;
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScenarioKind {
    HomeAttack,
    Injury,
    SupplyLoss,
    Evacuation,
}

/// An incident type. Exactly one is rolled per wave.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub kind: ScenarioKind,
    /// The policy category that answers this incident.
    pub category: Category,
    pub description: &'static str,
    /// Relative probability; weights across the table sum to 1.0.
    pub selection_weight: f64,
}

// Table order is roll order: cumulative weights 0.3, 0.5, 0.8, 1.0.
static SCENARIOS: [Scenario; 4] = [
    Scenario {
        kind: ScenarioKind::HomeAttack,
        category: Category::HomeFortification,
        description: "A horde of zombies is attempting to break into your safehouse!",
        selection_weight: 0.3,
    },
    Scenario {
        kind: ScenarioKind::Injury,
        category: Category::MedicalTreatment,
        description: "One of your group members has been bitten during a supply run!",
        selection_weight: 0.2,
    },
    Scenario {
        kind: ScenarioKind::SupplyLoss,
        category: Category::SupplyProtection,
        description: "Your supply cache has been discovered by raiders!",
        selection_weight: 0.3,
    },
    Scenario {
        kind: ScenarioKind::Evacuation,
        category: Category::EvacuationCoverage,
        description: "The safe zone has been compromised! Everyone must evacuate immediately!",
        selection_weight: 0.2,
    },
];

pub fn list_scenarios() -> &'static [Scenario] {
    &SCENARIOS
}

pub fn scenario(kind: ScenarioKind) -> &'static Scenario {
    SCENARIOS
        .iter()
        .find(|s| s.kind == kind)
        .unwrap_or_else(|| unreachable!("scenario table covers every kind"))
}

/// Roll probability of the incident answered by `category`.
pub fn weight_of(category: Category) -> f64 {
    SCENARIOS
        .iter()
        .filter(|s| s.category == category)
        .map(|s| s.selection_weight)
        .sum()
}

fn last_scenario() -> &'static Scenario {
    &SCENARIOS[SCENARIOS.len() - 1]
}

/// Map a uniform roll in [0, 1) onto the weighted table.
///
/// Walks the table in order and returns the first scenario whose cumulative
/// weight reaches `roll`. Falls back to the last scenario if rounding leaves
/// the cumulative sum short. A roll outside [0, 1) (including NaN) is logged
/// and also falls back to the last scenario, so the mapping is total.
pub fn scenario_for_roll(roll: f64) -> &'static Scenario {
    if !(0.0..1.0).contains(&roll) {
        let err = GameError::InvalidRandomValue(roll);
        tracing::warn!(%err, "falling back to last scenario");
        return last_scenario();
    }

    let mut cumulative = 0.0;
    for s in &SCENARIOS {
        cumulative += s.selection_weight;
        if cumulative >= roll {
            return s;
        }
    }
    last_scenario()
}

/// Draw this wave's incident from the injected randomness source.
pub fn pick_scenario(rng: &mut impl Rng) -> &'static Scenario {
    let roll: f64 = rng.random();
    scenario_for_roll(roll)
}
