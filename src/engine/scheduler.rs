//! Планировщик фаз: "что должно случиться дальше?".
//!
//! За один вызов выполняется не больше одного действия движка правил.
//! Обязательные фазы проверяются в фиксированном порядке, ход игрока –
//! только когда ни одна из них не готова.

use tracing::debug;

use crate::domain::CardSlot;
use crate::engine::moves::{dispatch, Move};
use crate::engine::phase::GamePhase;
use crate::rules::{RulesEngine, RulesError};

/// Итог одного продвижения раздачи.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Выполнено ровно одно действие.
    Executed(GamePhase),
    /// Ждём ход игрока (хода нет или он недопустим).
    Waiting,
    /// Ни обязательной фазы, ни игрока, который должен ходить.
    Stalled,
}

/// Порядок проверки обязательных фаз. Менять нельзя.
const AUTOMATIC_PHASES: [GamePhase; 9] = [
    GamePhase::PostingAnte,
    GamePhase::CollectingBets,
    GamePhase::PostingBlind,
    GamePhase::BurningCard,
    GamePhase::DealingHole,
    GamePhase::DealingBoard,
    GamePhase::KillingHand,
    GamePhase::PushingChips,
    GamePhase::PullingChips,
];

fn is_ready<S: RulesEngine + ?Sized>(phase: GamePhase, state: &S) -> bool {
    match phase {
        GamePhase::PostingAnte => state.can_post_ante(),
        GamePhase::CollectingBets => state.can_collect_bets(),
        GamePhase::PostingBlind => state.can_post_blind_or_straddle(),
        GamePhase::BurningCard => state.can_burn_card(),
        GamePhase::DealingHole => state.can_deal_hole(),
        GamePhase::DealingBoard => state.can_deal_board(),
        GamePhase::KillingHand => state.can_kill_hand(),
        GamePhase::PushingChips => state.can_push_chips(),
        GamePhase::PullingChips => state.can_pull_chips(None),
        GamePhase::WaitingMove | GamePhase::MakingMove => false,
    }
}

fn execute<S: RulesEngine + ?Sized>(phase: GamePhase, state: &mut S) -> Result<(), RulesError> {
    match phase {
        GamePhase::PostingAnte => state.post_ante(),
        GamePhase::CollectingBets => state.collect_bets(),
        GamePhase::PostingBlind => state.post_blind_or_straddle(),
        GamePhase::BurningCard => state.burn_card(CardSlot::FaceDown),
        GamePhase::DealingHole => state.deal_hole(),
        GamePhase::DealingBoard => state.deal_board(),
        GamePhase::KillingHand => state.kill_hand(),
        GamePhase::PushingChips => state.push_chips(),
        GamePhase::PullingChips => state.pull_chips(),
        GamePhase::WaitingMove | GamePhase::MakingMove => {
            Err(RulesError::IllegalOperation("ход игрока не является фазой дилера"))
        }
    }
}

/// Первая готовая обязательная фаза, если есть.
pub fn pending_phase<S: RulesEngine + ?Sized>(state: &S) -> Option<GamePhase> {
    AUTOMATIC_PHASES
        .iter()
        .copied()
        .find(|&phase| is_ready(phase, state))
}

/// Продвинуть раздачу на один шаг.
///
/// Ход `mv` используется только если обязательных фаз нет; иначе он отбрасывается.
pub fn advance<S: RulesEngine + ?Sized>(
    state: &mut S,
    mv: Option<&Move>,
) -> Result<Advance, RulesError> {
    if let Some(phase) = pending_phase(&*state) {
        if let Some(mv) = mv {
            debug!(?mv, %phase, "move discarded: dealer phase pending");
        }
        execute(phase, state)?;
        return Ok(Advance::Executed(phase));
    }

    if state.actor_index().is_none() {
        return Ok(Advance::Stalled);
    }

    let Some(mv) = mv else {
        return Ok(Advance::Waiting);
    };
    if dispatch(mv, state)? {
        Ok(Advance::Executed(GamePhase::MakingMove))
    } else {
        Ok(Advance::Waiting)
    }
}
