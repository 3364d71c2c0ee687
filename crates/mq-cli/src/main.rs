//! Terminal frontend for the MathQuest text adventure.

mod store;
mod terminal;

use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;
use mq_engine::{BattleTimer, Engine, Player, ProblemGenerator};
use mq_world::WorldMap;

use crate::store::JsonFileStore;
use crate::terminal::TerminalIo;

/// The world shipped with the game.
const DEFAULT_WORLD: &str = include_str!("../assets/world.json");

const MAX_NAME_LEN: usize = 20;

#[derive(Parser)]
#[command(
    name = "mathquest",
    about = "MathQuest — a text adventure that trains mental arithmetic",
    version
)]
struct Cli {
    /// Play a custom world file instead of the built-in one
    #[arg(short, long)]
    world: Option<PathBuf>,

    /// Where to save and load the game
    #[arg(short, long, default_value = "mathquest-save.json")]
    save: PathBuf,

    /// Fix the problem generator seed (for reproducible sessions)
    #[arg(long)]
    seed: Option<u64>,

    /// Player name (skips the name prompt)
    #[arg(short, long)]
    name: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(message) = run(cli) {
        eprintln!("{} {message}", "error:".red().bold());
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let data = match &cli.world {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("cannot read {}: {err}", path.display()))?,
        None => DEFAULT_WORLD.to_string(),
    };
    let world = WorldMap::from_json(&data).map_err(|err| format!("invalid world: {err}"))?;

    banner();
    let name = match cli.name {
        Some(name) => name,
        None => ask_name()?,
    };

    let player = Player::new(name, world.start_room().clone());
    let generator = match cli.seed {
        Some(seed) => ProblemGenerator::seeded(seed),
        None => ProblemGenerator::new(),
    };
    let mut engine = Engine::with_parts(
        world,
        player,
        generator,
        BattleTimer::new(),
        Box::new(TerminalIo),
        Box::new(JsonFileStore::new(cli.save)),
    )
    .map_err(|err| err.to_string())?;

    engine.start();

    let stdin = std::io::stdin();
    let mut line = String::new();
    while engine.is_running() {
        prompt(engine.awaiting_answer())?;
        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|err| format!("cannot read input: {err}"))?;
        if read == 0 {
            // EOF: leave cleanly.
            engine.handle("quit");
            break;
        }
        engine.handle(&line);
    }
    Ok(())
}

fn banner() {
    println!("{}", "  __  __       _   _      ___                  _   ".cyan());
    println!("{}", " |  \\/  | __ _| |_| |__  / _ \\ _   _  ___  ___| |_ ".cyan());
    println!("{}", " | |\\/| |/ _` | __| '_ \\| | | | | | |/ _ \\/ __| __|".cyan());
    println!("{}", " | |  | | (_| | |_| | | | |_| | |_| |  __/\\__ \\ |_ ".cyan());
    println!("{}", " |_|  |_|\\__,_|\\__|_| |_|\\__\\_\\\\__,_|\\___||___/\\__|".cyan());
    println!();
    println!("{}", "        An adventure for sharp heads!".bold());
    println!();
}

fn ask_name() -> Result<String, String> {
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("{} ", "What's your name, adventurer?".green());
        std::io::stdout()
            .flush()
            .map_err(|err| format!("cannot write to terminal: {err}"))?;
        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|err| format!("cannot read input: {err}"))?;
        if read == 0 {
            return Ok("Adventurer".to_string());
        }
        let name = line.trim();
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            println!("Pick a name between 1 and {MAX_NAME_LEN} characters!");
            continue;
        }
        return Ok(name.to_string());
    }
}

fn prompt(awaiting_answer: bool) -> Result<(), String> {
    if awaiting_answer {
        print!("{} ", "?>".yellow().bold());
    } else {
        print!("{} ", ">".green().bold());
    }
    std::io::stdout()
        .flush()
        .map_err(|err| format!("cannot write to terminal: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_world_is_valid() {
        let world = WorldMap::from_json(DEFAULT_WORLD).unwrap();
        assert!(world.len() >= 10);
        assert_eq!(world.start_room().as_str(), "village");
    }

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["mathquest"]);
        assert!(cli.world.is_none());
        assert_eq!(cli.save, PathBuf::from("mathquest-save.json"));
        assert!(cli.seed.is_none());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "mathquest",
            "--seed",
            "42",
            "--name",
            "Kim",
            "--save",
            "/tmp/s.json",
        ]);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.name.as_deref(), Some("Kim"));
    }
}
