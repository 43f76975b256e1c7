//! Покерный стол с пошаговым планировщиком фаз.
//!
//! Слои:
//!   - `domain` – карты, фишки, колода, игроки, конфиг стола;
//!   - `rules` – контракт движка правил и встроенный No-Limit Hold'em;
//!   - `engine` – планировщик фаз, поворот мест, снапшоты, журнал;
//!   - `infra` – RNG для перемешивания колоды.

pub mod domain;
pub mod engine;
pub mod infra;
pub mod rules;

pub use domain::{Card, Chips, Player, TableConfig};
pub use engine::{
    EngineError, EngineFault, GamePhase, HandSummary, Move, PokerTable, Snapshot, StepStatus,
};
pub use rules::{HoldemDealer, HoldemState, RandomSource, RulesEngine, RulesError, RulesFactory};
