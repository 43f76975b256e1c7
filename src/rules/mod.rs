//! Движок правил покера – внешний по отношению к планировщику фаз.
//!
//! Планировщик (`engine`) видит раздачу только через трейт [`RulesEngine`]:
//!   - предикаты готовности фаз (`can_*`);
//!   - действия, продвигающие раздачу ровно на одну операцию;
//!   - аксессоры состояния (стеки, ставки, карты, банк).
//!
//! Все индексы здесь table-absolute: место 0 – всегда дилер текущей раздачи.
//!
//! В комплекте одна реализация: No-Limit Hold'em (`holdem::HoldemState`).

pub mod errors;
pub mod eval;
pub mod holdem;
pub mod pots;

pub use errors::RulesError;
pub use holdem::{HoldemDealer, HoldemState};
pub use pots::Pot;

use crate::domain::{Card, CardSlot, Chips, SeatIndex, TableConfig};

/// RNG интерфейс для перемешивания колоды.
/// Реализации – в `infra::rng`.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

/// Состояние одной раздачи с точки зрения правил.
pub trait RulesEngine {
    /// Идёт ли ещё раздача.
    fn status(&self) -> bool;

    fn player_count(&self) -> usize;

    /// Чей ход (table-absolute), если кто-то должен действовать.
    fn actor_index(&self) -> Option<SeatIndex>;

    // --- обязательные фазы ---

    fn can_post_ante(&self) -> bool;
    fn post_ante(&mut self) -> Result<(), RulesError>;

    fn can_collect_bets(&self) -> bool;
    fn collect_bets(&mut self) -> Result<(), RulesError>;

    fn can_post_blind_or_straddle(&self) -> bool;
    fn post_blind_or_straddle(&mut self) -> Result<(), RulesError>;

    fn can_burn_card(&self) -> bool;
    fn burn_card(&mut self, card: CardSlot) -> Result<(), RulesError>;

    fn can_deal_hole(&self) -> bool;
    fn deal_hole(&mut self) -> Result<(), RulesError>;

    fn can_deal_board(&self) -> bool;
    fn deal_board(&mut self) -> Result<(), RulesError>;

    fn can_kill_hand(&self) -> bool;
    fn kill_hand(&mut self) -> Result<(), RulesError>;

    fn can_push_chips(&self) -> bool;
    fn push_chips(&mut self) -> Result<(), RulesError>;

    /// `None` – может ли забрать фишки хоть кто-нибудь.
    fn can_pull_chips(&self, player: Option<SeatIndex>) -> bool;
    fn pull_chips(&mut self) -> Result<(), RulesError>;

    // --- действия игрока ---

    fn can_fold(&self) -> bool;
    fn fold(&mut self) -> Result<(), RulesError>;

    fn can_check_or_call(&self) -> bool;
    fn check_or_call(&mut self) -> Result<(), RulesError>;

    /// `amount` – итоговая ставка игрока на улице ("raise to"), а не прибавка.
    fn can_complete_bet_or_raise_to(&self, amount: Chips) -> bool;
    fn complete_bet_or_raise_to(&mut self, amount: Chips) -> Result<(), RulesError>;

    // --- аксессоры ---

    fn hole_cards(&self) -> &[Vec<Card>];
    fn board_cards(&self) -> &[Card];
    fn stacks(&self) -> &[Chips];
    fn bets(&self) -> &[Chips];

    /// Весь банк, включая ещё не собранные ставки.
    fn total_pot_amount(&self) -> Chips;

    fn min_completion_betting_or_raising_to_amount(&self) -> Option<Chips>;
    fn max_completion_betting_or_raising_to_amount(&self) -> Option<Chips>;
}

/// Фабрика раздач: создаёт новое состояние правил для очередной раздачи.
pub trait RulesFactory {
    type State: RulesEngine;

    /// `starting_stacks` – в table-absolute порядке, место 0 = дилер.
    fn create(
        &mut self,
        config: &TableConfig,
        starting_stacks: &[Chips],
    ) -> Result<Self::State, RulesError>;
}
