use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Chips;
use crate::rules::{RulesEngine, RulesError};

/// Ход игрока.
///
/// `Bet`/`Raise` несут прибавку к текущей максимальной ставке, а не итоговую сумму:
/// `Raise(20)` при ставке 50 означает "рейз до 70".
/// В JSON: `{"type": "BET", "value": 20}`, `{"type": "FOLD"}`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "UPPERCASE")]
pub enum Move {
    Fold,
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
}

/// Применить ход к раздаче.
///
/// `Ok(true)` – ход принят, `Ok(false)` – ход недопустим и проигнорирован
/// (состояние раздачи не меняется).
pub fn dispatch<S: RulesEngine + ?Sized>(mv: &Move, state: &mut S) -> Result<bool, RulesError> {
    match *mv {
        Move::Fold => {
            if !state.can_fold() {
                debug!(?mv, "move ignored");
                return Ok(false);
            }
            state.fold()?;
        }
        Move::Check | Move::Call => {
            if !state.can_check_or_call() {
                debug!(?mv, "move ignored");
                return Ok(false);
            }
            state.check_or_call()?;
        }
        Move::Bet(amount) | Move::Raise(amount) => {
            if amount.is_zero() {
                debug!(?mv, "zero-sized bet ignored");
                return Ok(false);
            }
            let target = max_bet(state) + amount;
            if !state.can_complete_bet_or_raise_to(target) {
                debug!(?mv, target = %target, "move ignored");
                return Ok(false);
            }
            state.complete_bet_or_raise_to(target)?;
        }
    }
    Ok(true)
}

/// Максимальная ставка на текущей улице.
pub(crate) fn max_bet<S: RulesEngine + ?Sized>(state: &S) -> Chips {
    state.bets().iter().copied().max().unwrap_or(Chips::ZERO)
}
