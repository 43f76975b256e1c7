use thiserror::Error;

use crate::domain::SeatIndex;
use crate::rules::RulesError;

/// Ошибки стола (планировщика фаз).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("За столом {actual} игроков, а конфиг требует {expected}")]
    SeatCountMismatch { expected: usize, actual: usize },

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Раздача уже идёт")]
    HandInProgress,

    #[error("Стол заполнен: уже {0} игроков")]
    TableFull(usize),

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Некорректный конфиг стола: {0}")]
    InvalidConfig(String),

    #[error("Стол остановлен: {0}")]
    Fault(EngineFault),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Неустранимое состояние раздачи: шагать дальше нельзя до `reset()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineFault {
    #[error("нет ни обязательной фазы, ни игрока, который должен ходить")]
    NoActor,

    #[error("раздача закончилась вне выплаты банка")]
    HandEndedUnexpectedly,
}
