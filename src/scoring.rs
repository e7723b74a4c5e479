use std::fmt;

use serde::Serialize;

use crate::config::GameConfig;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rating {
    InsuranceApprentice,
    RiskManager,
    InsuranceProfessional,
    RiskManagementExpert,
    InsuranceMaster,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::InsuranceApprentice,
        Rating::RiskManager,
        Rating::InsuranceProfessional,
        Rating::RiskManagementExpert,
        Rating::InsuranceMaster,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Rating::InsuranceMaster => "Insurance Master",
            Rating::RiskManagementExpert => "Risk Management Expert",
            Rating::InsuranceProfessional => "Insurance Professional",
            Rating::RiskManager => "Risk Manager",
            Rating::InsuranceApprentice => "Insurance Apprentice",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Inclusive lower bounds, highest first.
const RATING_LADDER: [(i64, Rating); 4] = [
    (25_000, Rating::InsuranceMaster),
    (20_000, Rating::RiskManagementExpert),
    (15_000, Rating::InsuranceProfessional),
    (10_000, Rating::RiskManager),
];

pub fn final_score(state: &GameState, config: &GameConfig) -> i64 {
    state.money + state.health * config.health_score_weight
}

pub fn performance_rating(score: i64) -> Rating {
    RATING_LADDER
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|&(_, rating)| rating)
        .unwrap_or(Rating::InsuranceApprentice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_weights_health_by_fifty() {
        let cfg = GameConfig::canonical();
        let mut s = GameState::new(&cfg);
        assert_eq!(final_score(&s, &cfg), 10_000 + 100 * 50);
        s.money = -200;
        s.health = -3;
        assert_eq!(final_score(&s, &cfg), -200 - 150);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(performance_rating(25_000), Rating::InsuranceMaster);
        assert_eq!(performance_rating(24_999), Rating::RiskManagementExpert);
        assert_eq!(performance_rating(20_000), Rating::RiskManagementExpert);
        assert_eq!(performance_rating(15_000), Rating::InsuranceProfessional);
        assert_eq!(performance_rating(10_000), Rating::RiskManager);
        assert_eq!(performance_rating(9_999), Rating::InsuranceApprentice);
        assert_eq!(performance_rating(-5_000), Rating::InsuranceApprentice);
        assert_eq!(performance_rating(1_000_000), Rating::InsuranceMaster);
    }

    #[test]
    fn rating_is_monotone_in_score() {
        let mut prev = performance_rating(i64::MIN);
        for score in (-1_000..40_000).step_by(250) {
            let r = performance_rating(score);
            assert!(r >= prev, "rating dropped at {score}");
            prev = r;
        }
    }

    #[test]
    fn titles_display() {
        assert_eq!(Rating::InsuranceMaster.to_string(), "Insurance Master");
        assert_eq!(Rating::InsuranceApprentice.to_string(), "Insurance Apprentice");
    }
}
