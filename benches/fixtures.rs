use zins::catalog::{self, Category, Tier};
use zins::config::GameConfig;
use zins::state::GameState;

/// Selection sizes exercised by the resolution benches.
pub const SELECTION_SIZES: [usize; 3] = [0, 2, 4];

/// Fresh wave-1 state holding Premium cover in the first `n` categories.
pub fn state_holding(n: usize) -> GameState {
    let mut state = GameState::new(&GameConfig::canonical());
    for &category in Category::ALL.iter().take(n) {
        let name = catalog::product(category, Tier::Premium).name;
        state = state.toggle_policy(name).expect("catalog name");
    }
    state
}

/// Mid-game state with `waves` uninsured home attacks already in history.
pub fn state_after(waves: u32) -> GameState {
    let config = GameConfig {
        max_waves: u32::MAX,
        starting_health: i64::MAX / 2,
        ..GameConfig::canonical()
    };
    let attack = zins::scenarios::scenario(zins::scenarios::ScenarioKind::HomeAttack);
    let mut state = GameState::new(&config);
    state.money = i64::MAX / 2;
    for _ in 0..waves {
        state = zins::engine::resolve_round(&state, attack, &config).0;
    }
    state
}
