use core::fmt;

use serde::{Deserialize, Serialize};

/// Фаза стола: последнее, что сделал планировщик (или ожидание хода).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GamePhase {
    #[serde(rename = "POSTING_ANTES")]
    PostingAnte,
    #[serde(rename = "COLLECTING_BETS")]
    CollectingBets,
    #[serde(rename = "POSTING_BLIND")]
    PostingBlind,
    #[serde(rename = "BURNING_CARD")]
    BurningCard,
    #[serde(rename = "DEALING_HOLE")]
    DealingHole,
    #[serde(rename = "DEALING_BOARD")]
    DealingBoard,
    #[serde(rename = "KILLING_HAND")]
    KillingHand,
    #[serde(rename = "PUSHING_CHIPS")]
    PushingChips,
    #[serde(rename = "PULLING_CHIPS")]
    PullingChips,
    #[serde(rename = "WAITING_MOVE")]
    WaitingMove,
    #[serde(rename = "MAKING_MOVE")]
    MakingMove,
}

impl GamePhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            GamePhase::PostingAnte => "POSTING_ANTES",
            GamePhase::CollectingBets => "COLLECTING_BETS",
            GamePhase::PostingBlind => "POSTING_BLIND",
            GamePhase::BurningCard => "BURNING_CARD",
            GamePhase::DealingHole => "DEALING_HOLE",
            GamePhase::DealingBoard => "DEALING_BOARD",
            GamePhase::KillingHand => "KILLING_HAND",
            GamePhase::PushingChips => "PUSHING_CHIPS",
            GamePhase::PullingChips => "PULLING_CHIPS",
            GamePhase::WaitingMove => "WAITING_MOVE",
            GamePhase::MakingMove => "MAKING_MOVE",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
