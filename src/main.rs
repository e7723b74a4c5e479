//! Play the survival-insurance game with an automated strategy.
//!
//! Usage: `zins [--strategy NAME] [--seed N] [--runs N] [--compare] [--output PATH] [--csv PATH] [--quiet]`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use zins::analysis::{self, GameSummary, StrategyStats};
use zins::config::GameConfig;
use zins::record::RoundRecord;
use zins::strategy::{self, Strategy};

#[derive(Parser, Debug)]
#[command(name = "zins")]
#[command(about = "Resolve zombie-apocalypse insurance rounds with an automated player")]
struct Args {
    /// none, basic, standard, premium, targeted, targeted-basic, targeted-premium, random
    #[arg(long, default_value = "standard")]
    strategy: Strategy,

    /// Seed for the first game (defaults to the canonical config seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Play N games on consecutive seeds and print score distributions
    #[arg(long)]
    runs: Option<u64>,

    /// With --runs, evaluate every built-in strategy instead of one
    #[arg(long)]
    compare: bool,

    /// NDJSON file for the round records of a single game
    #[arg(long, default_value = "rounds.ndjson")]
    output: PathBuf,

    /// CSV file for per-game summaries in multi-run mode
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Suppress the printed tables
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    zins::init_logging();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = GameConfig::canonical();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    match args.runs {
        Some(n) => {
            let strategies: Vec<Strategy> =
                if args.compare { Strategy::ALL.to_vec() } else { vec![args.strategy] };

            let mut all_games: Vec<(Strategy, Vec<GameSummary>)> = Vec::new();
            let mut all_stats: Vec<StrategyStats> = Vec::new();
            for s in strategies {
                let games = analysis::run_strategy(s, &config, config.seed, n)?;
                if let Some(stats) = analysis::strategy_stats(s, &games) {
                    all_stats.push(stats);
                }
                all_games.push((s, games));
            }

            if let Some(ref path) = args.csv {
                write_games_csv(&all_games, path)?;
            }
            if !args.quiet {
                print_strategy_stats(&all_stats, n);
            }
        }
        None => {
            let seed = config.seed;
            let session = strategy::play(args.strategy, config)?;
            let history = &session.state().decision_history;
            write_records(history, &args.output)?;

            if !args.quiet {
                print_rounds(history);
                let summary = GameSummary::from_session(&session, seed);
                println!(
                    "\nStrategy {}: {} waves, ${} and {} health → score {} ({})",
                    args.strategy,
                    summary.waves_played,
                    summary.money,
                    summary.health,
                    summary.score,
                    summary.rating,
                );
                println!("Round records → {}", args.output.display());
            }
        }
    }
    Ok(())
}

fn write_records(records: &[RoundRecord], path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for r in records {
        serde_json::to_writer(&mut writer, r)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_games_csv(all_games: &[(Strategy, Vec<GameSummary>)], path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "strategy,seed,waves,money,health,score,rating,survived,premiums_paid,protected_rounds")?;
    for (strategy, games) in all_games {
        for g in games {
            writeln!(
                w,
                "{},{},{},{},{},{},{},{},{},{}",
                strategy,
                g.seed,
                g.waves_played,
                g.money,
                g.health,
                g.score,
                g.rating,
                g.survived,
                g.premiums_paid,
                g.protected_rounds,
            )?;
        }
    }
    w.flush()?;
    Ok(())
}

fn print_rounds(history: &[RoundRecord]) {
    println!(
        "{:>4} | {:<11} | {:>7} | {:>6} | {:>6} | {:>6} | {:>7} | {:>6} | {:<9}",
        "Wave", "Incident", "Premium", "Claim", "Income", "HP-", "Money", "Health", "Cover"
    );
    println!("{}", "-".repeat(84));
    for r in history {
        println!(
            "{:>4} | {:<11} | {:>7} | {:>6} | {:>6} | {:>6} | {:>7} | {:>6} | {:<9}",
            r.wave.0,
            format!("{:?}", r.scenario_kind),
            r.premium_total,
            r.claim_cost,
            r.income,
            r.health_lost,
            r.money_after,
            r.health_after,
            if r.outcome.is_protected() { "protected" } else { "exposed" },
        );
    }
}

fn print_strategy_stats(all_stats: &[StrategyStats], n_runs: u64) {
    println!("\n=== Strategy comparison (N={n_runs} games each) ===");
    println!(
        "{:<16} | {:>8} | {:>8} | {:>8} | {:>8} | {:>8} | {:>6} | {:>9}",
        "Strategy", "p5", "p50", "p95", "mean", "stddev", "Waves", "Survived"
    );
    println!("{}", "-".repeat(92));
    for s in all_stats {
        println!(
            "{:<16} | {:>8.0} | {:>8.0} | {:>8.0} | {:>8.0} | {:>8.0} | {:>6.1} | {:>8.1}%",
            s.strategy.to_string(),
            s.score.p5,
            s.score.p50,
            s.score.p95,
            s.score.mean,
            s.score.std_dev,
            s.waves_played.mean,
            s.survival_rate * 100.0,
        );
    }

    println!("\n--- Ratings ---");
    for s in all_stats {
        let line: Vec<String> = s
            .ratings
            .iter()
            .rev()
            .map(|(rating, count)| format!("{rating}: {count}"))
            .collect();
        println!("{:<16} | {}", s.strategy.to_string(), line.join(", "));
    }
}
