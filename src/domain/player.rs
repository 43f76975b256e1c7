use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Игрок за столом: кто он и сколько у него фишек.
///
/// `money` – единственное поле, которое меняет движок (синхронизация стеков
/// после сбора ставок и после выплаты банка). Между раздачами это стартовый стек.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub identity: String,
    pub money: Chips,
}

impl Player {
    pub fn new(identity: impl Into<String>, money: Chips) -> Self {
        Self {
            identity: identity.into(),
            money,
        }
    }

    pub fn is_busted(&self) -> bool {
        self.money.is_zero()
    }
}
