use serde::{Deserialize, Serialize};

/// Улица раздачи Hold'em.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Порядок улиц в раздаче.
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Сжигается ли карта перед сдачей на этой улице.
    pub const fn burns_card(self) -> bool {
        !matches!(self, Street::Preflop)
    }

    /// Сколько закрытых карт получает каждый игрок.
    pub const fn hole_cards(self) -> usize {
        match self {
            Street::Preflop => 2,
            _ => 0,
        }
    }

    /// Сколько карт открывается на борде (одной операцией).
    pub const fn board_cards(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    pub const fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    pub const fn is_last(self) -> bool {
        self.next().is_none()
    }
}

/// Сила руки: чем больше число, тем сильнее рука.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandRank(pub u32);
