//! Доменная модель стола: карты, фишки, колода, улицы, игроки и конфиг.

pub mod card;
pub mod chips;
pub mod config;
pub mod deck;
pub mod hand;
pub mod player;

/// Индекс места за столом (table-absolute или player-relative – зависит от контекста).
pub type SeatIndex = usize;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use config::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
