use serde::Serialize;

/// One round of play. Waves are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Wave(pub u32);

impl Wave {
    pub const FIRST: Wave = Wave(1);

    pub fn next(self) -> Self {
        Wave(self.0 + 1)
    }

    /// Number of waves already resolved before this one started.
    pub fn completed(self) -> u32 {
        self.0.saturating_sub(1)
    }
}

/// Money and health lost to an incident. Money in whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Loss {
    pub money: i64,
    pub health: i64,
}

impl Loss {
    /// The share of this loss left after `coverage_percent` is reimbursed.
    /// Integer floor, so health losses round in the player's favour.
    pub fn uncovered(self, coverage_percent: u8) -> Self {
        let residual = 100 - i64::from(coverage_percent.min(100));
        Loss {
            money: self.money * residual / 100,
            health: self.health * residual / 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_next_and_completed() {
        assert_eq!(Wave::FIRST.next(), Wave(2));
        assert_eq!(Wave::FIRST.completed(), 0);
        assert_eq!(Wave(7).completed(), 6);
        assert_eq!(Wave(0).completed(), 0);
    }

    #[test]
    fn uncovered_floors_health() {
        let loss = Loss { money: 1500, health: 10 };
        assert_eq!(loss.uncovered(90), Loss { money: 150, health: 1 });
        assert_eq!(loss.uncovered(75), Loss { money: 375, health: 2 });
        assert_eq!(loss.uncovered(50), Loss { money: 750, health: 5 });
    }

    #[test]
    fn uncovered_extremes() {
        let loss = Loss { money: 2500, health: 25 };
        assert_eq!(loss.uncovered(0), loss);
        assert_eq!(loss.uncovered(100), Loss { money: 0, health: 0 });
        assert_eq!(loss.uncovered(250), Loss { money: 0, health: 0 });
    }
}
