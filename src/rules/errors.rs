use thiserror::Error;

/// Ошибки движка правил (состояние одной раздачи).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("Нужно хотя бы 2 места за столом, передано {0}")]
    InvalidPlayerCount(usize),

    #[error("Стеков передано {actual}, а мест за столом {expected}")]
    StackCountMismatch { expected: usize, actual: usize },

    #[error("Недостаточно игроков с фишками для раздачи")]
    NotEnoughPlayers,

    #[error("В колоде закончились карты")]
    DeckExhausted,

    #[error("Операция недопустима в текущем состоянии раздачи: {0}")]
    IllegalOperation(&'static str),
}
