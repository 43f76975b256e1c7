//! Ядро стола: планировщик фаз, поворот мест, снапшоты, журнал.
//!
//! Высокоуровневый объект: `PokerTable`
//! Основные операции:
//!   - `reset` – подготовить раздачу;
//!   - `step` – одна единица прогресса (фаза дилера или ход игрока);
//!   - `game_state` / `get_log` – снапшот и журнал в порядке игроков.

pub mod clock;
pub mod errors;
pub mod history;
pub mod moves;
pub mod phase;
pub mod scheduler;
pub mod seats;
pub mod snapshot;
pub mod table;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{EngineError, EngineFault};
pub use history::HistoryLog;
pub use moves::{dispatch, Move};
pub use phase::GamePhase;
pub use scheduler::{advance, pending_phase, Advance};
pub use seats::{absolute_index, relative_index, to_absolute, to_relative, DealerButton};
pub use snapshot::{snapshot, Snapshot};
pub use table::{HandSummary, PokerTable, StepStatus};
