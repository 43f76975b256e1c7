//! Снапшот стола: неизменяемая проекция состояния раздачи в порядке игроков.
//!
//! Весь пересчёт индексов (table-absolute → player-relative) живёт здесь,
//! планировщик и хост видят только готовый `Snapshot`.

use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, Player, SeatIndex, TableConfig, HIDDEN_CARD_CODE};
use crate::engine::moves::max_bet;
use crate::engine::phase::GamePhase;
use crate::engine::seats::{relative_index, to_relative};
use crate::rules::RulesEngine;

/// Состояние стола на момент шага.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub timestamp: u64,
    pub config: TableConfig,
    pub players: Vec<Player>,
    /// Индекс игрока на баттоне.
    pub dealer: SeatIndex,
    pub phase: Option<GamePhase>,
    /// Чей ход (индекс игрока), `None` – никто не ходит.
    pub turn: Option<SeatIndex>,
    /// Карманные карты по игрокам; пусто после фолда/сброса.
    pub hands: Vec<Vec<String>>,
    pub board: Vec<String>,
    pub stacks: Vec<Chips>,
    pub bets: Vec<Chips>,
    /// Весь банк, включая ставки текущей улицы.
    pub pot: Chips,
    /// Минимальная прибавка для `Bet`/`Raise` (0 – ставить нельзя).
    pub min_bet: Chips,
    /// Максимальная прибавка для `Bet`/`Raise` (олл-ин).
    pub max_bet: Chips,
}

impl Snapshot {
    /// Вид стола глазами игрока `viewer`: чужие карманные карты закрыты.
    pub fn masked_for(&self, viewer: SeatIndex) -> Snapshot {
        let mut masked = self.clone();
        for (seat, hand) in masked.hands.iter_mut().enumerate() {
            if seat != viewer {
                for code in hand.iter_mut() {
                    *code = HIDDEN_CARD_CODE.to_string();
                }
            }
        }
        masked
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Снять снапшот с раздачи. Ничего не меняет.
///
/// `dealer` – смещение баттона, `players` – в порядке игроков.
pub fn snapshot<S: RulesEngine + ?Sized>(
    state: &S,
    config: &TableConfig,
    players: &[Player],
    dealer: usize,
    phase: Option<GamePhase>,
    timestamp: u64,
) -> Snapshot {
    let n = state.player_count();

    let hands: Vec<Vec<String>> = state
        .hole_cards()
        .iter()
        .map(|cards| cards.iter().map(Card::code).collect())
        .collect();

    let current = max_bet(state);
    let increment = |target: Option<Chips>| match (state.actor_index(), target) {
        (Some(_), Some(to)) => to - current,
        _ => Chips::ZERO,
    };

    Snapshot {
        timestamp,
        config: config.clone(),
        players: players.to_vec(),
        dealer: relative_index(0, dealer, n),
        phase,
        turn: state.actor_index().map(|a| relative_index(a, dealer, n)),
        hands: to_relative(&hands, dealer),
        board: state.board_cards().iter().map(Card::code).collect(),
        stacks: to_relative(state.stacks(), dealer),
        bets: to_relative(state.bets(), dealer),
        pot: state.total_pot_amount(),
        min_bet: increment(state.min_completion_betting_or_raising_to_amount()),
        max_bet: increment(state.max_completion_betting_or_raising_to_amount()),
    }
}
