use crate::types::Wave;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub seed: u64,
    /// Game ends once the wave counter would pass this.
    pub max_waves: u32,
    pub starting_money: i64,
    pub starting_health: i64,
    /// Income in wave 1.
    pub base_income: i64,
    /// Extra income for every wave already survived.
    pub income_per_wave: i64,
    /// Score value of one health point.
    pub health_score_weight: i64,
}

impl GameConfig {
    pub fn canonical() -> Self {
        GameConfig {
            seed: 42,
            max_waves: 20,
            starting_money: 10_000,
            starting_health: 100,
            base_income: 1_000,
            income_per_wave: 100,
            health_score_weight: 50,
        }
    }

    /// Survival income earned in `wave`, independent of the incident.
    pub fn income_for(&self, wave: Wave) -> i64 {
        self.base_income + self.income_per_wave * i64::from(wave.completed())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::canonical()
    }
}
