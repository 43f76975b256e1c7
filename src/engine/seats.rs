//! Два порядка мест.
//!
//! * table-absolute – порядок движка правил, место 0 = баттон текущей раздачи;
//! * player-relative – порядок `players` стола, стабилен для игрока между раздачами.
//!
//! Баттон хранится как смещение `dealer`: абсолютное место 0 – это
//! игрок с относительным индексом `dealer`.

use serde::{Deserialize, Serialize};

use crate::domain::SeatIndex;

/// table-absolute → player-relative (сдвиг вправо на `dealer`).
pub fn to_relative<T: Clone>(xs: &[T], dealer: usize) -> Vec<T> {
    if xs.is_empty() {
        return Vec::new();
    }
    let mut out = xs.to_vec();
    out.rotate_right(dealer % xs.len());
    out
}

/// player-relative → table-absolute (сдвиг влево на `dealer`).
pub fn to_absolute<T: Clone>(xs: &[T], dealer: usize) -> Vec<T> {
    if xs.is_empty() {
        return Vec::new();
    }
    let mut out = xs.to_vec();
    out.rotate_left(dealer % xs.len());
    out
}

/// Абсолютный индекс места → индекс игрока.
pub fn relative_index(absolute: SeatIndex, dealer: usize, n: usize) -> SeatIndex {
    if n == 0 {
        return 0;
    }
    (absolute + dealer) % n
}

/// Индекс игрока → абсолютный индекс места.
pub fn absolute_index(relative: SeatIndex, dealer: usize, n: usize) -> SeatIndex {
    if n == 0 {
        return 0;
    }
    (relative % n + n - dealer % n) % n
}

/// Смещение баттона относительно порядка игроков.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealerButton(pub usize);

impl DealerButton {
    pub fn offset(self) -> usize {
        self.0
    }

    /// Сдвинуть баттон на одно место по кругу из `n` мест.
    pub fn advance(&mut self, n: usize) {
        self.0 = if n == 0 { 0 } else { (self.0 + 1) % n };
    }
}
