use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::{self, Category, Tier};
use crate::config::GameConfig;
use crate::error::Result;
use crate::scenarios;
use crate::scoring::{self, Rating};
use crate::session::Session;
use crate::strategy::{self, Strategy};

// ── Per-product expectations ──────────────────────────────────────────────────

/// Expected value of holding one product for one wave, against the weighted
/// incident table.
#[derive(Debug, Clone, Serialize)]
pub struct ProductEconomics {
    pub name: &'static str,
    pub category: Category,
    pub tier: Tier,
    pub premium: i64,
    /// P(incident in this category).
    pub incident_probability: f64,
    /// Expected money lost to this category's incident while holding the product.
    pub expected_claim: f64,
    /// Expected money lost to the same incident with no cover.
    pub expected_uninsured_loss: f64,
    /// Expected money saved per wave after paying the premium. Negative means
    /// the premium costs more than the cover returns on average.
    pub expected_net_saving: f64,
    /// Expected health points spared per wave.
    pub expected_health_saved: f64,
}

pub fn product_economics() -> Vec<ProductEconomics> {
    catalog::list_products()
        .iter()
        .map(|p| {
            let probability = scenarios::weight_of(p.category);
            let baseline = catalog::baseline_for(p.category).base_loss_if_uninsured;
            let expected_claim = probability * p.claim_cost() as f64;
            let expected_uninsured_loss = probability * baseline.money as f64;
            ProductEconomics {
                name: p.name,
                category: p.category,
                tier: p.tier,
                premium: p.premium,
                incident_probability: probability,
                expected_claim,
                expected_uninsured_loss,
                expected_net_saving: expected_uninsured_loss - expected_claim - p.premium as f64,
                expected_health_saved: probability * (baseline.health - p.health_lost()) as f64,
            }
        })
        .collect()
}

// ── Per-game outcomes ─────────────────────────────────────────────────────────

/// Final figures of one finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub seed: u64,
    pub waves_played: u32,
    pub money: i64,
    pub health: i64,
    pub score: i64,
    pub rating: Rating,
    /// Played every wave without running out of money or health.
    pub survived: bool,
    pub premiums_paid: i64,
    pub protected_rounds: u32,
}

impl GameSummary {
    pub fn from_session(session: &Session, seed: u64) -> Self {
        let state = session.state();
        let config = session.config();
        let score = scoring::final_score(state, config);
        let waves_played = state.decision_history.len() as u32;
        GameSummary {
            seed,
            waves_played,
            money: state.money,
            health: state.health,
            score,
            rating: scoring::performance_rating(score),
            survived: waves_played >= config.max_waves && state.money > 0 && state.health > 0,
            premiums_paid: state.decision_history.iter().map(|r| r.premium_total).sum(),
            protected_rounds: state
                .decision_history
                .iter()
                .filter(|r| r.outcome.is_protected())
                .count() as u32,
        }
    }
}

/// Play `runs` games of `strategy` in parallel, seeds `start_seed..start_seed + runs`.
pub fn run_strategy(
    strategy: Strategy,
    base_config: &GameConfig,
    start_seed: u64,
    runs: u64,
) -> Result<Vec<GameSummary>> {
    (0..runs)
        .into_par_iter()
        .map(|i| -> Result<GameSummary> {
            let seed = start_seed + i;
            let config = GameConfig { seed, ..base_config.clone() };
            let session = strategy::play(strategy, config)?;
            Ok(GameSummary::from_session(&session, seed))
        })
        .collect()
}

// ── Cross-run distributions ───────────────────────────────────────────────────

/// Distribution statistics for a continuous metric across N games.
#[derive(Debug, Clone, Serialize)]
pub struct DistStats {
    pub n: usize,
    pub min: f64,
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// How one strategy fared across many seeds.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyStats {
    pub strategy: Strategy,
    pub runs: usize,
    pub score: DistStats,
    pub waves_played: DistStats,
    /// Fraction of games that reached the final wave alive and solvent.
    pub survival_rate: f64,
    pub ratings: BTreeMap<Rating, usize>,
}

fn percentile_stats(values: &mut [f64]) -> Option<DistStats> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();

    let interp = |p: f64| -> f64 {
        let h = p * (n - 1) as f64;
        let lo = h.floor() as usize;
        let hi = (lo + 1).min(n - 1);
        let frac = h - lo as f64;
        values[lo] * (1.0 - frac) + values[hi] * frac
    };

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    Some(DistStats {
        n,
        min: values[0],
        p5: interp(0.05),
        p25: interp(0.25),
        p50: interp(0.50),
        p75: interp(0.75),
        p95: interp(0.95),
        max: values[n - 1],
        mean,
        std_dev: variance.sqrt(),
    })
}

/// Summarise a batch of games. `None` when `games` is empty.
pub fn strategy_stats(strategy: Strategy, games: &[GameSummary]) -> Option<StrategyStats> {
    let mut scores: Vec<f64> = games.iter().map(|g| g.score as f64).collect();
    let mut waves: Vec<f64> = games.iter().map(|g| g.waves_played as f64).collect();
    let score = percentile_stats(&mut scores)?;
    let waves_played = percentile_stats(&mut waves)?;

    let mut ratings: BTreeMap<Rating, usize> = BTreeMap::new();
    for g in games {
        *ratings.entry(g.rating).or_insert(0) += 1;
    }
    let survivors = games.iter().filter(|g| g.survived).count();

    Some(StrategyStats {
        strategy,
        runs: games.len(),
        score,
        waves_played,
        survival_rate: survivors as f64 / games.len() as f64,
        ratings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_home_economics() {
        let econ = product_economics();
        let p = econ.iter().find(|e| e.name == "Premium Home Fortification").unwrap();
        assert_eq!(p.incident_probability, 0.3);
        assert!((p.expected_claim - 75.0).abs() < 1e-9);
        assert!((p.expected_uninsured_loss - 450.0).abs() < 1e-9);
        assert!((p.expected_net_saving - (450.0 - 75.0 - 800.0)).abs() < 1e-9);
        assert!((p.expected_health_saved - 2.7).abs() < 1e-9);
    }

    #[test]
    fn higher_tiers_spare_more_health() {
        let econ = product_economics();
        for category in Category::ALL {
            let mut rows: Vec<&ProductEconomics> =
                econ.iter().filter(|e| e.category == category).collect();
            rows.sort_by_key(|e| e.tier);
            assert!(rows.windows(2).all(|w| w[1].expected_health_saved > w[0].expected_health_saved));
        }
    }

    #[test]
    fn percentiles_of_known_values() {
        let mut v: Vec<f64> = (1..=5).map(f64::from).collect();
        let d = percentile_stats(&mut v).unwrap();
        assert_eq!(d.n, 5);
        assert_eq!(d.min, 1.0);
        assert_eq!(d.p50, 3.0);
        assert_eq!(d.max, 5.0);
        assert_eq!(d.mean, 3.0);
        assert!((d.p25 - 2.0).abs() < 1e-12);
        assert!(percentile_stats(&mut []).is_none());
    }

    #[test]
    fn run_strategy_uses_consecutive_seeds() {
        let games = run_strategy(Strategy::NoInsurance, &GameConfig::canonical(), 100, 8).unwrap();
        let seeds: Vec<u64> = games.iter().map(|g| g.seed).collect();
        assert_eq!(seeds, (100..108).collect::<Vec<_>>());
        assert!(games.iter().all(|g| g.premiums_paid == 0 && g.protected_rounds == 0));
    }

    #[test]
    fn run_strategy_matches_sequential_play() {
        let base = GameConfig::canonical();
        let games = run_strategy(Strategy::Random, &base, 7, 4).unwrap();
        for g in &games {
            let session =
                strategy::play(Strategy::Random, GameConfig { seed: g.seed, ..base.clone() }).unwrap();
            let expected = GameSummary::from_session(&session, g.seed);
            assert_eq!(g.score, expected.score);
            assert_eq!(g.waves_played, expected.waves_played);
        }
    }

    #[test]
    fn strategy_stats_aggregates() {
        let games = run_strategy(Strategy::FullCover(Tier::Basic), &GameConfig::canonical(), 1, 16)
            .unwrap();
        let stats = strategy_stats(Strategy::FullCover(Tier::Basic), &games).unwrap();
        assert_eq!(stats.runs, 16);
        assert_eq!(stats.ratings.values().sum::<usize>(), 16);
        assert!((0.0..=1.0).contains(&stats.survival_rate));
        assert!(stats.waves_played.max <= 20.0);
        assert!(strategy_stats(Strategy::Random, &[]).is_none());
    }
}
