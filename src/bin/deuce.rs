use std::env;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use deuce::config::Config;
use deuce::domain::{Score, Stage};
use deuce::file::FromJsonFile;
use deuce::model;
use deuce::print::{tabulate_breakdown, tabulate_stages, StageEstimate};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// probability of the player about to serve winning a point on their serve
    #[clap(long = "p-a")]
    p_a: f64,

    /// probability of the opponent winning a point on their serve
    #[clap(long = "p-b")]
    p_b: f64,

    /// sets won by each player, e.g. 1-0
    #[clap(long, default_value = "0-0")]
    sets: Score,

    /// games won by each player in the current set
    #[clap(long, default_value = "0-0")]
    games: Score,

    /// points won by each player in the current game, or in the tiebreak at 6-6
    #[clap(long, default_value = "0-0")]
    points: Score,

    /// number of sets in the match; overrides the config
    #[clap(short = 'b', long)]
    best_of: Option<u8>,

    /// config file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// cross-check each stage against a Monte Carlo simulation
    #[clap(short = 's', long)]
    simulate: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        for (name, p) in [("--p-a", self.p_a), ("--p-b", self.p_b)] {
            if !(0.0..=1.0).contains(&p) {
                bail!("{name} must lie in [0, 1]");
            }
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let mut config = match &args.config {
        None => Config::default(),
        Some(path) => Config::from_json_file(path)?,
    };
    if let Some(best_of) = args.best_of {
        config.best_of = best_of;
    }
    config.validate()?;
    debug!("config: {config:?}");

    let (p_a, p_b, best_of) = (args.p_a, args.p_b, config.best_of);
    let simulator = args.simulate.then(|| config.simulation.simulator());
    let mut estimates = Vec::with_capacity(4);
    for stage in Stage::iter() {
        let exact = match stage {
            Stage::Game => model::win_game_probability(p_a)?,
            Stage::Tiebreak => model::win_tiebreak_probability(p_a, p_b, 0, 0)?.probability,
            Stage::Set => model::win_set_probability(p_a, p_b, 0, 0)?,
            Stage::Match => model::win_match_probability(p_a, p_b, 0, 0, 0, 0, 0, 0, best_of)?,
        };
        let simulated = match &simulator {
            None => None,
            Some(simulator) => Some(simulator.estimate(stage, p_a, p_b, best_of)?),
        };
        estimates.push(StageEstimate {
            stage,
            exact,
            simulated,
        });
    }
    info!("from the start of play:\n{}", Console::default().render(&tabulate_stages(&estimates)));

    let (sets, games, points) = (args.sets, args.games, args.points);
    let prob = model::win_match_probability(
        p_a, p_b, sets.a, sets.b, games.a, games.b, points.a, points.b, best_of,
    )?;
    info!("best of {best_of}, sets {sets}, games {games}, points {points}: match won with probability {prob:.6}");

    if games == Score::new(6, 6) {
        let tiebreak = model::win_tiebreak_probability(p_a, p_b, points.a, points.b)?;
        if tiebreak.is_decomposed() {
            info!("tiebreak:\n{}", Console::default().render(&tabulate_breakdown("Points", &tiebreak)));
        }
    }

    let p_set = model::win_set_probability(p_a, p_b, 0, 0)?;
    let outcomes = model::win_match_outcome_probability(p_set, sets.a, sets.b, best_of)?;
    if outcomes.is_decomposed() {
        info!("match from {sets} in sets:\n{}", Console::default().render(&tabulate_breakdown("Sets", &outcomes)));
    }
    Ok(())
}
