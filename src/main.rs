use std::io::{self, BufRead, Write};

use clap::Parser;
use env_logger::Env;
use game_2048::engine::{GameStatus, GridEngine, Move};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "game-2048", version, about = "Play 2048 in the terminal")]
struct Args {
    /// Seed for tile spawns (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

const HELP: &str = "moves: w/a/s/d, h/j/k/l or up/down/left/right | n: new game | q: quit";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let mut game = match args.seed {
        Some(seed) => GridEngine::seeded(seed),
        None => GridEngine::from_entropy(),
    };
    info!("starting game (seed {:?})", args.seed);

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}")?;
    render(&mut out, &game)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = line.trim();
        match cmd {
            "" => continue,
            "q" | "quit" => break,
            "n" | "new" => game.new_game(),
            "?" | "help" => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            _ => match cmd.parse::<Move>() {
                Ok(dir) => {
                    let step = game.step(dir);
                    if !step.moved.changed && step.status == GameStatus::Playing {
                        writeln!(out, "(nothing moves {dir})")?;
                    }
                }
                Err(e) => {
                    writeln!(out, "{e}; {HELP}")?;
                    continue;
                }
            },
        }
        render(&mut out, &game)?;
    }
    Ok(())
}

fn render<W: Write>(out: &mut W, game: &GridEngine) -> io::Result<()> {
    write!(out, "\n{}", game.board())?;
    writeln!(out, "score: {}", game.score())?;
    if game.is_game_over() {
        writeln!(out, "game over!")?;
    }
    out.flush()
}
