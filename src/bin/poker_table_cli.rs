// src/bin/poker_table_cli.rs
//
// Dev-хост для одного стола: сажает игроков, гоняет раздачи ботом
// check/call и печатает снапшоты в stdout по одному JSON на строку.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use poker_table::domain::{Chips, Player, TableConfig};
use poker_table::engine::{Move, PokerTable, StepStatus};
use poker_table::infra::DeterministicRng;
use poker_table::rules::HoldemDealer;

/// Прогон раздач на одном столе.
#[derive(Parser, Debug)]
#[command(name = "poker_table_cli")]
struct Args {
    /// Сколько игроков посадить (если не задан --config).
    #[arg(long, default_value_t = 3)]
    players: usize,

    /// Сколько раздач сыграть.
    #[arg(long, default_value_t = 1)]
    hands: u64,

    /// Seed для перемешивания колоды.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON-файл с конфигом стола.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Стартовый стек каждого игрока.
    #[arg(long, default_value_t = 100_000)]
    stack: u64,

    /// Печатать журнал раздачи целиком после каждой раздачи.
    #[arg(long)]
    log: bool,
}

/// Страховка от зацикливания бота.
const MAX_STEPS_PER_HAND: usize = 10_000;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TableConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => TableConfig {
            player_count: args.players,
            ..TableConfig::default()
        },
    };
    config.validate()?;

    let players: Vec<Player> = (0..config.player_count)
        .map(|i| Player::new(format!("bot-{i}"), Chips(args.stack)))
        .collect();

    let dealer = HoldemDealer::new(DeterministicRng::from_seed(args.seed));
    let mut table = PokerTable::with_factory(config, players, dealer)?.with_logging(args.log);
    table.reset()?;

    info!(hands = args.hands, seed = args.seed, "simulation started");

    let mut finished = 0;
    while finished < args.hands {
        let mut steps = 0;
        loop {
            steps += 1;
            if steps > MAX_STEPS_PER_HAND {
                return Err("bot is stuck: too many steps in one hand".into());
            }

            let mv = table.whose_turn().map(|_| Move::Call);
            match table.step(mv)? {
                StepStatus::HandFinished(summary) => {
                    println!("{}", serde_json::to_string(&summary)?);
                    finished += 1;
                    if !summary.next_hand_ready {
                        warn!("table cannot continue, stopping");
                        return Ok(());
                    }
                    break;
                }
                StepStatus::Progressed(_) | StepStatus::Waiting => {
                    if let Some(snapshot) = table.game_state() {
                        println!("{}", snapshot.to_json()?);
                    }
                }
            }
        }
    }

    info!(hands = finished, "simulation finished");
    Ok(())
}
