mod console;
mod scripted;

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use engine::agent::Agent;
use engine::catalog;
use engine::config::GameConfig;
use engine::controller::{Outcome, TurnController};
use engine::events::EngineEvent;
use tokio::sync::watch;

/// Splendor arena
///
/// Run a local Splendor match between scripted players, optionally
/// taking the first seat yourself. Every engine event is printed as
/// one JSON line.
#[derive(Parser, Debug)]
struct Args {
    /// Number of players (2 to 4).
    #[clap(short, long, default_value = "4")]
    players: usize,
    /// Maximum number of rounds before the game is declared a draw.
    #[clap(long, default_value = "30")]
    max_rounds: u32,
    /// Budget in milliseconds for each agent to answer; slower agents
    /// forfeit the turn.
    #[clap(long, default_value = "5000")]
    turn_timeout_ms: u64,
    /// Take seat 1 yourself, entering actions as JSON on stdin.
    #[clap(short, long)]
    interactive: bool,
    /// Grant nobles automatically when a player qualifies.
    #[clap(long)]
    auto_nobles: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let names: Vec<String> = (1..=args.players).map(|n| format!("Player {n}")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let Some(state) = catalog::starter_state(&name_refs, args.max_rounds) else {
        bail!("the starter game seats 2 to 4 players, got {}", args.players);
    };

    let mut agents: Vec<Box<dyn Agent>> = Vec::with_capacity(args.players);
    for seat in 0..args.players {
        if seat == 0 && args.interactive {
            agents.push(Box::new(console::ConsoleAgent::spawn()));
        } else {
            agents.push(Box::new(scripted::GreedyAgent));
        }
    }

    let config = GameConfig {
        turn_timeout: Duration::from_millis(args.turn_timeout_ms),
        noble_auto_award: args.auto_nobles,
        ..GameConfig::default()
    };

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let controller = TurnController::new(state, agents, config);
    match controller.run(cancel_rx, print_event).await {
        Some(Outcome::Winner { player, score }) => {
            println!("> game over: {player} wins with {score} points")
        }
        Some(Outcome::Draw { tied }) if tied.is_empty() => {
            println!("> game over: round cap reached, the game is a draw")
        }
        Some(Outcome::Draw { tied }) => {
            println!("> game over: draw between {}", tied.join(", "))
        }
        None => println!("> cancelled"),
    }

    Ok(())
}

fn print_event(event: &EngineEvent) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(encoding_error) => eprintln!("could not encode event: {encoding_error}"),
    }
}
