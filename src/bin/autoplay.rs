use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use game_2048::config::AutoplayConfig;
use game_2048::policy::PolicyKind;
use game_2048::selfplay::{play_batch, BatchSummary};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

#[derive(Parser, Debug)]
#[command(
    name = "autoplay",
    version,
    about = "Play many 2048 games in parallel with a simple policy and summarize the results"
)]
struct Args {
    /// TOML file with defaults for the options below
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Base seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,
    /// Number of games
    #[arg(short = 'n', long)]
    games: Option<usize>,
    /// Per-game cap on effective moves
    #[arg(long)]
    max_moves: Option<u64>,
    #[arg(long, value_enum)]
    policy: Option<PolicyKind>,
    /// Rayon worker threads
    #[arg(long)]
    threads: Option<usize>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

impl Args {
    fn resolve(&self) -> anyhow::Result<AutoplayConfig> {
        let mut cfg = match &self.config {
            Some(path) => AutoplayConfig::from_toml(path)?,
            None => AutoplayConfig::default(),
        };
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(games) = self.games {
            cfg.games = games;
        }
        if self.max_moves.is_some() {
            cfg.max_moves = self.max_moves;
        }
        if let Some(policy) = self.policy {
            cfg.policy = policy;
        }
        if self.threads.is_some() {
            cfg.threads = self.threads;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let cfg = args.resolve()?;
    if let Some(n) = cfg.threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }
    info!(
        "playing {} games with policy {} (seed {}, max_moves {:?})",
        cfg.games, cfg.policy, cfg.seed, cfg.max_moves
    );

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(cfg.games as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} games ({eta})")?
                .progress_chars("=>-"),
        );
        pb
    };
    let games = play_batch(&cfg, |_| pb.inc(1));
    pb.finish_and_clear();

    let summary = BatchSummary::from_games(&games);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Games: {}, Moves: {}, Mean score: {:.1}, Min/Max score: {}/{}, Highest tile: {}",
            summary.games,
            summary.total_moves,
            summary.mean_score,
            summary.min_score,
            summary.max_score,
            summary.highest_tile
        );
        for (tile, count) in &summary.tile_histogram {
            println!("  {tile:>6}: {count}");
        }
    }
    Ok(())
}
