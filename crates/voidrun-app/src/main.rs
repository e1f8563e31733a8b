//! Headless VOIDRUN driver.
//!
//! Runs the simulation for a fixed number of ticks with a simple
//! scripted pilot, populating each level when the engine announces it.
//! Useful for balancing runs and for watching the engine's behaviour
//! without a frontend.

use clap::Parser;

use voidrun_core::commands::PlayerCommand;
use voidrun_core::constants::{MAX_FORMATION_WIDTH, SPEED_X, TICK_RATE};
use voidrun_core::enums::{RunMode, Tier};
use voidrun_core::events::GameEvent;
use voidrun_core::state::GameStateSnapshot;
use voidrun_sim::{GameEngine, SimConfig};

#[derive(Parser, Debug)]
#[command(name = "voidrun", about = "Headless VOIDRUN simulation driver")]
struct Args {
    /// Random seed for the run.
    #[arg(long, default_value_t = 93)]
    seed: u64,

    /// How many ticks to simulate.
    #[arg(long, default_value_t = 60 * TICK_RATE as u64)]
    ticks: u64,

    /// Fire the primary laser every N ticks.
    #[arg(long, default_value_t = 10)]
    fire_every: u64,

    /// Print the final state as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut engine = GameEngine::new(SimConfig { seed: args.seed });
    engine.queue_command(PlayerCommand::StartGame);

    let mut last = GameStateSnapshot::default();
    for tick in 0..args.ticks {
        if tick % args.fire_every == 0 {
            engine.queue_command(PlayerCommand::FireLaser);
        }
        // Dumb pilot: drift toward the centre of the field.
        let lateral = last.ship.position.0.x;
        engine.queue_command(PlayerCommand::SteerShip {
            velocity_x: -lateral.signum() * SPEED_X * 0.2,
        });

        last = engine.tick();
        for event in &last.events {
            if let GameEvent::LevelCleared { next_level } = event {
                populate_level(&mut engine, *next_level);
            }
        }
        if last.run_mode == RunMode::MainMenu && tick > 0 {
            log::info!("run ended after {tick} ticks");
            break;
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&last) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("failed to serialize snapshot: {err}"),
        }
        return;
    }

    println!("--- VOIDRUN run summary ---");
    println!("seed:            {}", args.seed);
    println!("ticks simulated: {}", last.time.tick);
    println!("final mode:      {:?}", last.run_mode);
    println!("level reached:   {}", last.level);
    println!("score:           {:.0}", last.score.score);
    println!("best resource:   {:.0}", last.score.best_resource);
    println!("enemies killed:  {}", last.score.enemies_killed);
    println!(
        "shots fired/missed: {}/{}",
        last.score.shots_fired, last.score.shots_missed
    );
}

/// One formation per tier up to the level number: later levels field
/// more and stronger formations.
fn populate_level(engine: &mut GameEngine, level: u32) {
    let formations = (level as usize).min(Tier::ALL.len());
    for (index, tier) in Tier::ALL.iter().take(formations).enumerate() {
        let width = (2 + index).min(MAX_FORMATION_WIDTH);
        let amount = width * width;
        engine.spawn_formation(*tier, width, amount, formations.max(1), 0.0);
    }
}
