use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};

/// Банк (основной или сайд-пот): сумма и места, которые могут его выиграть.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    pub eligible_seats: Vec<SeatIndex>,
}

/// Разложить вклады игроков на основной банк и сайд-поты.
///
/// Вход: `contributions[seat]` – сколько seat внёс в банк за раздачу,
/// `live[seat]` – остался ли seat в раздаче (не сфолдил).
/// Выход: банки "от младших к старшим"; соседние банки с одинаковым
/// набором претендентов склеиваются (непоставленный остаток рейза
/// достаётся тому же игроку в том же банке).
pub fn build_pots(contributions: &[Chips], live: &[bool]) -> Vec<Pot> {
    let mut levels: Vec<Chips> = contributions
        .iter()
        .copied()
        .filter(|c| !c.is_zero())
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    // Фишки уровня, на который не претендует ни один живой игрок,
    // уходят в ближайший банк с претендентами.
    let mut orphaned = Chips::ZERO;
    let mut prev = Chips::ZERO;

    for &level in &levels {
        let step = level - prev;
        let mut amount = Chips::ZERO;
        let mut eligible = Vec::new();

        for (seat, &contrib) in contributions.iter().enumerate() {
            // Уровни – это все различные вклады, поэтому вклад либо покрывает
            // уровень целиком, либо не доходит до него вовсе.
            if contrib >= level {
                amount += step;
                if live.get(seat).copied().unwrap_or(false) {
                    eligible.push(seat);
                }
            }
        }
        prev = level;

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(last) => last.amount += amount,
                None => orphaned += amount,
            }
            continue;
        }

        amount += orphaned;
        orphaned = Chips::ZERO;

        match pots.last_mut() {
            Some(last) if last.eligible_seats == eligible => last.amount += amount,
            _ => pots.push(Pot {
                amount,
                eligible_seats: eligible,
            }),
        }
    }

    if !orphaned.is_zero() {
        let eligible: Vec<SeatIndex> = (0..live.len()).filter(|&s| live[s]).collect();
        if !eligible.is_empty() {
            pots.push(Pot {
                amount: orphaned,
                eligible_seats: eligible,
            });
        }
    }

    pots
}
