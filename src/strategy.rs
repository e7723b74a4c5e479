//! Automated players. Used by the CLI, the analysis runner and the benches to
//! compare cover choices over many seeded games.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::catalog::{self, Category, Tier};
use crate::config::GameConfig;
use crate::error::Result;
use crate::scenarios;
use crate::session::{Session, SessionPhase};

/// Mixed into the game seed so strategy choices don't share a stream with
/// scenario rolls.
const CHOICE_SEED_SALT: u64 = 0x5eed_c0de;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    /// Never buy anything.
    NoInsurance,
    /// Every category at one tier.
    FullCover(Tier),
    /// Only the most likely incidents, at one tier.
    Targeted(Tier),
    /// Each category independently: 50% skip, else a uniform tier.
    Random,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::NoInsurance,
        Strategy::FullCover(Tier::Basic),
        Strategy::FullCover(Tier::Standard),
        Strategy::FullCover(Tier::Premium),
        Strategy::Targeted(Tier::Standard),
        Strategy::Random,
    ];

    /// Products to buy for the coming wave.
    pub fn choose(&self, rng: &mut impl Rng) -> Vec<&'static str> {
        match self {
            Strategy::NoInsurance => vec![],
            Strategy::FullCover(tier) => Category::ALL
                .iter()
                .map(|&c| catalog::product(c, *tier).name)
                .collect(),
            Strategy::Targeted(tier) => most_likely_categories()
                .into_iter()
                .map(|c| catalog::product(c, *tier).name)
                .collect(),
            Strategy::Random => Category::ALL
                .iter()
                .filter_map(|&c| {
                    if rng.random_bool(0.5) {
                        return None;
                    }
                    let tier = Tier::ALL[rng.random_range(0..Tier::ALL.len())];
                    Some(catalog::product(c, tier).name)
                })
                .collect(),
        }
    }
}

/// Categories sharing the highest incident weight.
fn most_likely_categories() -> Vec<Category> {
    let max = Category::ALL
        .iter()
        .map(|&c| scenarios::weight_of(c))
        .fold(0.0, f64::max);
    Category::ALL
        .into_iter()
        .filter(|&c| scenarios::weight_of(c) >= max)
        .collect()
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::NoInsurance => f.write_str("none"),
            Strategy::FullCover(Tier::Basic) => f.write_str("basic"),
            Strategy::FullCover(Tier::Standard) => f.write_str("standard"),
            Strategy::FullCover(Tier::Premium) => f.write_str("premium"),
            Strategy::Targeted(Tier::Basic) => f.write_str("targeted-basic"),
            Strategy::Targeted(Tier::Standard) => f.write_str("targeted"),
            Strategy::Targeted(Tier::Premium) => f.write_str("targeted-premium"),
            Strategy::Random => f.write_str("random"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(Strategy::NoInsurance),
            "basic" => Ok(Strategy::FullCover(Tier::Basic)),
            "standard" => Ok(Strategy::FullCover(Tier::Standard)),
            "premium" => Ok(Strategy::FullCover(Tier::Premium)),
            "targeted-basic" => Ok(Strategy::Targeted(Tier::Basic)),
            "targeted" => Ok(Strategy::Targeted(Tier::Standard)),
            "targeted-premium" => Ok(Strategy::Targeted(Tier::Premium)),
            "random" => Ok(Strategy::Random),
            other => Err(format!(
                "unknown strategy {other:?} (expected none, basic, standard, premium, \
                 targeted, targeted-basic, targeted-premium or random)"
            )),
        }
    }
}

/// Play one game to completion with `strategy`, seeded from `config.seed`.
pub fn play(strategy: Strategy, config: GameConfig) -> Result<Session> {
    let mut choices = ChaCha20Rng::seed_from_u64(config.seed ^ CHOICE_SEED_SALT);
    let mut session = Session::from_config(config);
    session.start_game();
    while session.phase() == SessionPhase::InRound {
        for name in strategy.choose(&mut choices) {
            session.toggle_policy(name)?;
        }
        session.submit_round()?;
    }
    Ok(session)
}
