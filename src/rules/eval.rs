//! Оценка силы покерных рук (Texas Hold'em).
//!
//! Основная функция: `evaluate_best_hand(hole, board) -> Option<HandRank>`.
//!
//! Схема кодирования `HandRank` (u32):
//!   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
//! где r0..r4 – значимые ранги (2..14) от старшего к младшему, 0 – пусто.

use crate::domain::card::Card;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

impl HandRank {
    fn encode(category: HandCategory, ranks: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, r) in ranks.iter().take(5).enumerate() {
            value |= u32::from(*r & 0x0F) << (16 - 4 * i as u32);
        }
        HandRank(value)
    }

    pub fn category(&self) -> HandCategory {
        HandCategory::from_bits((self.0 >> 20) & 0x0F)
    }
}

/// Лучшая 5-карточная рука из hole + board.
/// `None`, если карт меньше пяти (например, до флопа).
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Option<HandRank> {
    let cards: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
    if cards.len() < 5 {
        return None;
    }

    let n = cards.len();
    let mut best: Option<HandRank> = None;
    // Перебор всех сочетаний по 5 через индексы.
    let mut idx = [0usize, 1, 2, 3, 4];
    loop {
        let five = [
            cards[idx[0]],
            cards[idx[1]],
            cards[idx[2]],
            cards[idx[3]],
            cards[idx[4]],
        ];
        let rank = evaluate_five(&five);
        if best.map_or(true, |b| rank > b) {
            best = Some(rank);
        }

        // Следующее сочетание в лексикографическом порядке.
        let Some(pos) = (0..5).rev().find(|&i| idx[i] < n - 5 + i) else {
            break;
        };
        idx[pos] += 1;
        for j in pos + 1..5 {
            idx[j] = idx[j - 1] + 1;
        }
    }
    best
}

fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let mut counts = [0u8; 15];
    let mut mask: u16 = 0;
    for card in cards {
        let v = card.rank.value();
        counts[v as usize] += 1;
        mask |= 1 << v;
    }

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(mask);

    // (количество, ранг), от самых больших групп к меньшим.
    let mut groups: Vec<(u8, u8)> = (2u8..=14)
        .filter(|&r| counts[r as usize] > 0)
        .map(|r| (counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let ordered: Vec<u8> = groups.iter().map(|&(_, r)| r).collect();
    let top = groups[0].0;
    let second = groups.get(1).map_or(0, |g| g.0);

    match (is_flush, straight) {
        (true, Some(high)) => return HandRank::encode(HandCategory::StraightFlush, &[high]),
        (false, Some(high)) if top == 1 => {
            return HandRank::encode(HandCategory::Straight, &[high]);
        }
        _ => {}
    }

    let category = match (top, second) {
        (4, _) => HandCategory::FourOfAKind,
        (3, 2) => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        (3, _) => HandCategory::ThreeOfAKind,
        (2, 2) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };
    HandRank::encode(category, &ordered)
}

/// Старшая карта стрита по битовой маске рангов (бит = значение ранга).
/// Wheel (A2345) → 5.
fn straight_high(mask: u16) -> Option<u8> {
    let mut m = mask;
    if m & (1 << 14) != 0 {
        m |= 1 << 1; // туз как единица
    }
    (5u8..=14).rev().find(|&high| {
        let need: u16 = 0b1_1111 << (high - 4);
        m & need == need
    })
}

/// Человеческое описание руки по категории.
pub fn describe_hand(rank: HandRank) -> &'static str {
    match rank.category() {
        HandCategory::HighCard => "High card",
        HandCategory::OnePair => "One pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
    }
}
