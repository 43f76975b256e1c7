//! No-Limit Texas Hold'em без автоматизаций.
//!
//! Каждое действие продвигает раздачу ровно на одну операцию
//! (одно анте, один блайнд, одна карта в руку, одна улица борда, один банк...).
//! Решать, что делать дальше, – задача планировщика фаз.
//!
//! Места table-absolute: 0 – баттон. Блайнды ставят первые места с фишками
//! слева от баттона; если фишки есть только у двоих, SB ставит баттон
//! (или ближайший к нему слева, если баттон без фишек).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Card, CardSlot, Chips, Deck, SeatIndex, Street, TableConfig};
use crate::rules::errors::RulesError;
use crate::rules::eval::evaluate_best_hand;
use crate::rules::pots::{build_pots, Pot};
use crate::rules::{RandomSource, RulesEngine, RulesFactory};

/// Внутренний этап раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
enum Stage {
    AntePosting,
    BetCollection,
    BlindPosting,
    Dealing,
    Betting,
    HandKilling,
    ChipsPushing,
    ChipsPulling,
    Finished,
}

/// Состояние одной раздачи.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HoldemState {
    player_count: usize,
    ante: Chips,
    big_blind: Chips,
    /// Номинальные блайнды по местам.
    blinds: Vec<Chips>,
    bb_seat: SeatIndex,
    starting_stacks: Vec<Chips>,

    deck: Deck,
    burned: Vec<Card>,
    mucked: Vec<Card>,
    hole_cards: Vec<Vec<Card>>,
    board: Vec<Card>,

    stacks: Vec<Chips>,
    /// Ставки текущей улицы; после шоудауна – выигрыш, ждущий pull.
    bets: Vec<Chips>,
    /// Сколько каждое место уже внесло в банк (собранные ставки).
    contributions: Vec<Chips>,
    /// Сколько из собранного банка уже раздано победителям.
    pushed: Chips,
    /// Место ещё в раздаче (не сфолдило и не сидит без фишек).
    statuses: Vec<bool>,

    street: Option<Street>,
    stage: Stage,

    ante_pending: Vec<bool>,
    blind_pending: Vec<bool>,
    burn_pending: bool,
    hole_pending: Vec<usize>,
    board_pending: usize,

    /// Очередь ходящих на текущей улице.
    actors: VecDeque<SeatIndex>,
    /// Размер последнего полного повышения (минимум – BB).
    last_raise: Chips,
    /// Место уже ходило после последнего полного повышения: неполный олл-ин
    /// оставляет ему только call или fold.
    acted: Vec<bool>,

    pots: Vec<Pot>,
    winners: Vec<Vec<SeatIndex>>,
    next_pot: usize,
}

impl HoldemState {
    /// Создать раздачу с уже перемешанной колодой.
    pub fn new(
        config: &TableConfig,
        starting_stacks: &[Chips],
        deck: Deck,
    ) -> Result<Self, RulesError> {
        let n = config.player_count;
        if n < 2 {
            return Err(RulesError::InvalidPlayerCount(n));
        }
        if starting_stacks.len() != n {
            return Err(RulesError::StackCountMismatch {
                expected: n,
                actual: starting_stacks.len(),
            });
        }

        let statuses: Vec<bool> = starting_stacks.iter().map(|s| !s.is_zero()).collect();
        let active = statuses.iter().filter(|&&s| s).count();
        if active < 2 {
            return Err(RulesError::NotEnoughPlayers);
        }

        let needed: usize = Street::ALL
            .iter()
            .map(|s| active * s.hole_cards() + usize::from(s.burns_card()) + s.board_cards())
            .sum();
        if deck.len() < needed {
            return Err(RulesError::DeckExhausted);
        }

        let mut blinds = vec![Chips::ZERO; n];
        let (sb_seat, bb_seat) = blind_seats(&statuses).ok_or(RulesError::NotEnoughPlayers)?;
        blinds[sb_seat] = config.small_blind;
        blinds[bb_seat] = config.big_blind;

        let mut state = Self {
            player_count: n,
            ante: config.ante,
            big_blind: config.big_blind,
            blinds,
            bb_seat,
            starting_stacks: starting_stacks.to_vec(),
            deck,
            burned: Vec::new(),
            mucked: Vec::new(),
            hole_cards: vec![Vec::new(); n],
            board: Vec::new(),
            stacks: starting_stacks.to_vec(),
            bets: vec![Chips::ZERO; n],
            contributions: vec![Chips::ZERO; n],
            pushed: Chips::ZERO,
            statuses,
            street: None,
            stage: Stage::AntePosting,
            ante_pending: vec![false; n],
            blind_pending: vec![false; n],
            burn_pending: false,
            hole_pending: vec![0; n],
            board_pending: 0,
            actors: VecDeque::new(),
            last_raise: config.big_blind,
            acted: vec![false; n],
            pots: Vec::new(),
            winners: Vec::new(),
            next_pot: 0,
        };

        state.begin_ante_posting();
        Ok(state)
    }

    pub fn street(&self) -> Option<Street> {
        self.street
    }

    pub fn burned_cards(&self) -> &[Card] {
        &self.burned
    }

    /// Сброшенные карманные карты (фолд и проигравшие на шоудауне).
    pub fn mucked_cards(&self) -> &[Card] {
        &self.mucked
    }

    /// Живые места (не сфолдили).
    pub fn statuses(&self) -> &[bool] {
        &self.statuses
    }

    /// Банки, посчитанные к шоудауну (пусто до него).
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    // ------------------------------------------------------------------
    // Вспомогательное
    // ------------------------------------------------------------------

    fn effective_ante(&self, seat: SeatIndex) -> Chips {
        if !self.statuses[seat] {
            return Chips::ZERO;
        }
        self.ante.min(self.starting_stacks[seat])
    }

    fn effective_blind(&self, seat: SeatIndex) -> Chips {
        if !self.statuses[seat] {
            return Chips::ZERO;
        }
        let left = self.starting_stacks[seat] - self.effective_ante(seat);
        self.blinds[seat].min(left)
    }

    fn live_count(&self) -> usize {
        self.statuses.iter().filter(|&&s| s).count()
    }

    fn max_bet(&self) -> Chips {
        self.bets.iter().copied().max().unwrap_or(Chips::ZERO)
    }

    /// Порядок по кругу, начиная с места `start`.
    fn seats_from(&self, start: SeatIndex) -> impl Iterator<Item = SeatIndex> {
        let n = self.player_count;
        (0..n).map(move |k| (start + k) % n)
    }

    /// Может ли место ещё что-то ставить.
    fn can_act(&self, seat: SeatIndex) -> bool {
        self.statuses[seat] && !self.stacks[seat].is_zero()
    }

    /// Сдача идёт слева от баттона; кому сдавать – тому, у кого больше всего
    /// несданных карт, при равенстве – раньше по кругу.
    fn hole_dealee(&self) -> Option<SeatIndex> {
        let most = self.hole_pending.iter().copied().max().unwrap_or(0);
        if most == 0 {
            return None;
        }
        self.seats_from(1 % self.player_count)
            .find(|&s| self.hole_pending[s] == most)
    }

    fn raise_bounds(&self) -> Option<(Chips, Chips)> {
        let actor = self.actor_index()?;
        if self.acted[actor] {
            return None;
        }
        let max_bet = self.max_bet();
        let all_in_to = self.bets[actor] + self.stacks[actor];
        if all_in_to <= max_bet {
            return None;
        }
        let min_to = (max_bet + self.last_raise).min(all_in_to);
        Some((min_to, all_in_to))
    }

    fn muck(&mut self, seat: SeatIndex) {
        self.statuses[seat] = false;
        let cards = std::mem::take(&mut self.hole_cards[seat]);
        self.mucked.extend(cards);
    }

    fn require(&self, ok: bool, what: &'static str) -> Result<(), RulesError> {
        if ok {
            Ok(())
        } else {
            Err(RulesError::IllegalOperation(what))
        }
    }

    // ------------------------------------------------------------------
    // Переходы между этапами
    // ------------------------------------------------------------------

    fn begin_ante_posting(&mut self) {
        self.stage = Stage::AntePosting;
        for seat in 0..self.player_count {
            self.ante_pending[seat] = !self.effective_ante(seat).is_zero();
        }
        if !self.ante_pending.iter().any(|&p| p) {
            self.begin_bet_collection();
        }
    }

    fn begin_bet_collection(&mut self) {
        self.stage = Stage::BetCollection;
        if self.bets.iter().all(|b| b.is_zero()) {
            self.end_bet_collection();
        }
    }

    fn end_bet_collection(&mut self) {
        if self.live_count() <= 1 {
            self.begin_chips_pushing();
            return;
        }
        match self.street {
            None => self.begin_blind_posting(),
            Some(street) if street.is_last() => self.begin_showdown(),
            Some(_) => self.begin_dealing(),
        }
    }

    fn begin_blind_posting(&mut self) {
        self.stage = Stage::BlindPosting;
        for seat in 0..self.player_count {
            self.blind_pending[seat] = !self.effective_blind(seat).is_zero();
        }
        if !self.blind_pending.iter().any(|&p| p) {
            self.begin_dealing();
        }
    }

    fn begin_dealing(&mut self) {
        let street = match self.street {
            None => Street::Preflop,
            Some(s) => s.next().unwrap_or(Street::River),
        };
        self.street = Some(street);
        self.stage = Stage::Dealing;

        self.burn_pending = street.burns_card();
        for seat in 0..self.player_count {
            self.hole_pending[seat] = if self.statuses[seat] {
                street.hole_cards()
            } else {
                0
            };
        }
        self.board_pending = street.board_cards();
        debug!(?street, "dealing started");
        self.check_dealing_done();
    }

    fn check_dealing_done(&mut self) {
        let done = !self.burn_pending
            && self.hole_pending.iter().all(|&p| p == 0)
            && self.board_pending == 0;
        if done {
            self.begin_betting();
        }
    }

    fn begin_betting(&mut self) {
        self.stage = Stage::Betting;
        self.last_raise = self.big_blind;
        self.acted.fill(false);

        let n = self.player_count;
        let opener = match self.street {
            Some(Street::Preflop) | None => (self.bb_seat + 1) % n,
            Some(_) => 1 % n,
        };
        let queue: VecDeque<SeatIndex> =
            self.seats_from(opener).filter(|&s| self.can_act(s)).collect();
        self.actors = queue;

        // Если ходить может максимум один и он никому ничего не должен – торговли нет.
        let max_bet = self.max_bet();
        if self.actors.len() <= 1 && self.actors.iter().all(|&s| self.bets[s] >= max_bet) {
            self.actors.clear();
        }
        if self.actors.is_empty() {
            self.end_betting();
        }
    }

    fn after_action(&mut self) {
        if self.live_count() <= 1 || self.actors.is_empty() {
            self.end_betting();
        }
    }

    fn end_betting(&mut self) {
        self.actors.clear();
        self.begin_bet_collection();
    }

    fn begin_showdown(&mut self) {
        self.stage = Stage::HandKilling;
        self.pots = build_pots(&self.contributions, &self.statuses);

        let ranks: Vec<_> = (0..self.player_count)
            .map(|s| {
                if self.statuses[s] {
                    evaluate_best_hand(&self.hole_cards[s], &self.board)
                } else {
                    None
                }
            })
            .collect();

        self.winners = self
            .pots
            .iter()
            .map(|pot| {
                let best = pot.eligible_seats.iter().filter_map(|&s| ranks[s]).max();
                pot.eligible_seats
                    .iter()
                    .copied()
                    .filter(|&s| best.is_some() && ranks[s] == best)
                    .collect()
            })
            .collect();

        if !self.can_kill_hand() {
            self.begin_chips_pushing();
        }
    }

    /// Живое место, которое не выигрывает ни одного банка.
    /// Без победителей (пустой банк) и при последней живой руке – никого.
    fn killable_seat(&self) -> Option<SeatIndex> {
        if self.stage != Stage::HandKilling || self.live_count() <= 1 {
            return None;
        }
        if self.winners.iter().all(|w| w.is_empty()) {
            return None;
        }
        (0..self.player_count)
            .find(|&s| self.statuses[s] && !self.winners.iter().any(|w| w.contains(&s)))
    }

    fn begin_chips_pushing(&mut self) {
        self.stage = Stage::ChipsPushing;
        if self.pots.is_empty() {
            // Без шоудауна: банки забирает единственный оставшийся.
            self.pots = build_pots(&self.contributions, &self.statuses);
            self.winners = self
                .pots
                .iter()
                .map(|pot| pot.eligible_seats.clone())
                .collect();
        }
        self.next_pot = 0;
        if self.pots.is_empty() {
            self.begin_chips_pulling();
        }
    }

    fn begin_chips_pulling(&mut self) {
        self.stage = Stage::ChipsPulling;
        if self.bets.iter().all(|b| b.is_zero()) {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.stage = Stage::Finished;
        debug!(stacks = ?self.stacks, "hand finished");
    }
}

/// Места (SB, BB) среди мест с фишками (баттон = 0).
fn blind_seats(funded: &[bool]) -> Option<(SeatIndex, SeatIndex)> {
    let n = funded.len();
    let order: Vec<SeatIndex> = (1..=n).map(|k| k % n).filter(|&s| funded[s]).collect();
    match order.as_slice() {
        // Хедз-ап: баттон с фишками ставит SB и стоит в order последним.
        [first, 0] => Some((0, *first)),
        [first, second, ..] => Some((*first, *second)),
        _ => None,
    }
}

impl RulesEngine for HoldemState {
    fn status(&self) -> bool {
        self.stage != Stage::Finished
    }

    fn player_count(&self) -> usize {
        self.player_count
    }

    fn actor_index(&self) -> Option<SeatIndex> {
        if self.stage == Stage::Betting {
            self.actors.front().copied()
        } else {
            None
        }
    }

    fn can_post_ante(&self) -> bool {
        self.stage == Stage::AntePosting && self.ante_pending.iter().any(|&p| p)
    }

    fn post_ante(&mut self) -> Result<(), RulesError> {
        self.require(self.can_post_ante(), "post_ante")?;
        let Some(seat) = self.ante_pending.iter().position(|&p| p) else {
            return Err(RulesError::IllegalOperation("post_ante"));
        };
        let amount = self.effective_ante(seat);
        self.ante_pending[seat] = false;
        self.stacks[seat] -= amount;
        self.bets[seat] += amount;

        if !self.ante_pending.iter().any(|&p| p) {
            self.begin_bet_collection();
        }
        Ok(())
    }

    fn can_collect_bets(&self) -> bool {
        self.stage == Stage::BetCollection && self.bets.iter().any(|b| !b.is_zero())
    }

    fn collect_bets(&mut self) -> Result<(), RulesError> {
        self.require(self.can_collect_bets(), "collect_bets")?;
        for seat in 0..self.player_count {
            let bet = std::mem::take(&mut self.bets[seat]);
            self.contributions[seat] += bet;
        }
        self.end_bet_collection();
        Ok(())
    }

    fn can_post_blind_or_straddle(&self) -> bool {
        self.stage == Stage::BlindPosting && self.blind_pending.iter().any(|&p| p)
    }

    fn post_blind_or_straddle(&mut self) -> Result<(), RulesError> {
        self.require(self.can_post_blind_or_straddle(), "post_blind_or_straddle")?;
        let Some(seat) = self.blind_pending.iter().position(|&p| p) else {
            return Err(RulesError::IllegalOperation("post_blind_or_straddle"));
        };
        let amount = self.effective_blind(seat);
        self.blind_pending[seat] = false;
        self.stacks[seat] -= amount;
        self.bets[seat] += amount;

        if !self.blind_pending.iter().any(|&p| p) {
            self.begin_dealing();
        }
        Ok(())
    }

    fn can_burn_card(&self) -> bool {
        self.stage == Stage::Dealing && self.burn_pending
    }

    fn burn_card(&mut self, card: CardSlot) -> Result<(), RulesError> {
        self.require(self.can_burn_card(), "burn_card")?;
        let burned = match card {
            CardSlot::Known(c) => {
                if !self.deck.remove(c) {
                    return Err(RulesError::IllegalOperation("burn_card: карты нет в колоде"));
                }
                c
            }
            CardSlot::FaceDown => self.deck.draw_one().ok_or(RulesError::DeckExhausted)?,
        };
        self.burned.push(burned);
        self.burn_pending = false;
        self.check_dealing_done();
        Ok(())
    }

    fn can_deal_hole(&self) -> bool {
        self.stage == Stage::Dealing && !self.burn_pending && self.hole_dealee().is_some()
    }

    fn deal_hole(&mut self) -> Result<(), RulesError> {
        self.require(self.can_deal_hole(), "deal_hole")?;
        let seat = self
            .hole_dealee()
            .ok_or(RulesError::IllegalOperation("deal_hole"))?;
        let card = self.deck.draw_one().ok_or(RulesError::DeckExhausted)?;
        self.hole_cards[seat].push(card);
        self.hole_pending[seat] -= 1;
        self.check_dealing_done();
        Ok(())
    }

    fn can_deal_board(&self) -> bool {
        self.stage == Stage::Dealing
            && !self.burn_pending
            && self.board_pending > 0
            && self.hole_dealee().is_none()
    }

    fn deal_board(&mut self) -> Result<(), RulesError> {
        self.require(self.can_deal_board(), "deal_board")?;
        let cards = self
            .deck
            .draw_exact(self.board_pending)
            .ok_or(RulesError::DeckExhausted)?;
        self.board.extend(cards);
        self.board_pending = 0;
        self.check_dealing_done();
        Ok(())
    }

    fn can_kill_hand(&self) -> bool {
        self.killable_seat().is_some()
    }

    fn kill_hand(&mut self) -> Result<(), RulesError> {
        let seat = self
            .killable_seat()
            .ok_or(RulesError::IllegalOperation("kill_hand"))?;
        self.muck(seat);
        if !self.can_kill_hand() {
            self.begin_chips_pushing();
        }
        Ok(())
    }

    fn can_push_chips(&self) -> bool {
        self.stage == Stage::ChipsPushing && self.next_pot < self.pots.len()
    }

    fn push_chips(&mut self) -> Result<(), RulesError> {
        self.require(self.can_push_chips(), "push_chips")?;
        let pot = self.pots[self.next_pot].clone();
        let n = self.player_count;

        // Лишние фишки сплита – первым победителям слева от баттона.
        let mut winners = self.winners[self.next_pot].clone();
        winners.sort_by_key(|&s| (s + n - 1) % n);
        if winners.is_empty() {
            return Err(RulesError::IllegalOperation("push_chips: у банка нет победителя"));
        }

        let k = winners.len() as u64;
        let share = pot.amount.0 / k;
        let mut remainder = pot.amount.0 % k;
        for &seat in &winners {
            let mut prize = share;
            if remainder > 0 {
                prize += 1;
                remainder -= 1;
            }
            self.bets[seat] += Chips(prize);
        }
        self.pushed += pot.amount;
        self.next_pot += 1;
        debug!(amount = %pot.amount, ?winners, "pot pushed");

        if self.next_pot >= self.pots.len() {
            self.begin_chips_pulling();
        }
        Ok(())
    }

    fn can_pull_chips(&self, player: Option<SeatIndex>) -> bool {
        if self.stage != Stage::ChipsPulling {
            return false;
        }
        match player {
            Some(seat) => self.bets.get(seat).is_some_and(|b| !b.is_zero()),
            None => self.bets.iter().any(|b| !b.is_zero()),
        }
    }

    fn pull_chips(&mut self) -> Result<(), RulesError> {
        self.require(self.can_pull_chips(None), "pull_chips")?;
        let Some(seat) = self.bets.iter().position(|b| !b.is_zero()) else {
            return Err(RulesError::IllegalOperation("pull_chips"));
        };
        let won = std::mem::take(&mut self.bets[seat]);
        self.stacks[seat] += won;

        if self.bets.iter().all(|b| b.is_zero()) {
            self.finish();
        }
        Ok(())
    }

    fn can_fold(&self) -> bool {
        match self.actor_index() {
            Some(actor) => self.bets[actor] < self.max_bet(),
            None => false,
        }
    }

    fn fold(&mut self) -> Result<(), RulesError> {
        self.require(self.can_fold(), "fold")?;
        let Some(actor) = self.actors.pop_front() else {
            return Err(RulesError::IllegalOperation("fold"));
        };
        self.muck(actor);
        self.after_action();
        Ok(())
    }

    fn can_check_or_call(&self) -> bool {
        self.actor_index().is_some()
    }

    fn check_or_call(&mut self) -> Result<(), RulesError> {
        self.require(self.can_check_or_call(), "check_or_call")?;
        let Some(actor) = self.actors.pop_front() else {
            return Err(RulesError::IllegalOperation("check_or_call"));
        };
        let amount = (self.max_bet() - self.bets[actor]).min(self.stacks[actor]);
        self.stacks[actor] -= amount;
        self.bets[actor] += amount;
        self.acted[actor] = true;
        self.after_action();
        Ok(())
    }

    fn can_complete_bet_or_raise_to(&self, amount: Chips) -> bool {
        match self.raise_bounds() {
            Some((min_to, max_to)) => min_to <= amount && amount <= max_to,
            None => false,
        }
    }

    fn complete_bet_or_raise_to(&mut self, amount: Chips) -> Result<(), RulesError> {
        self.require(
            self.can_complete_bet_or_raise_to(amount),
            "complete_bet_or_raise_to",
        )?;
        let Some(actor) = self.actor_index() else {
            return Err(RulesError::IllegalOperation("complete_bet_or_raise_to"));
        };
        let previous_max = self.max_bet();
        let delta = amount - self.bets[actor];
        self.stacks[actor] -= delta;
        self.bets[actor] = amount;

        let raise = amount - previous_max;
        if raise >= self.last_raise {
            self.last_raise = raise;
            self.acted.fill(false);
        }
        self.acted[actor] = true;

        // Ходить снова должны все, кто ещё может ставить.
        let n = self.player_count;
        let queue: VecDeque<SeatIndex> = self
            .seats_from((actor + 1) % n)
            .filter(|&s| s != actor && self.can_act(s))
            .collect();
        self.actors = queue;
        self.after_action();
        Ok(())
    }

    fn hole_cards(&self) -> &[Vec<Card>] {
        &self.hole_cards
    }

    fn board_cards(&self) -> &[Card] {
        &self.board
    }

    fn stacks(&self) -> &[Chips] {
        &self.stacks
    }

    fn bets(&self) -> &[Chips] {
        &self.bets
    }

    fn total_pot_amount(&self) -> Chips {
        let collected: Chips = self.contributions.iter().sum();
        let outstanding: Chips = self.bets.iter().sum();
        collected - self.pushed + outstanding
    }

    fn min_completion_betting_or_raising_to_amount(&self) -> Option<Chips> {
        self.raise_bounds().map(|(min_to, _)| min_to)
    }

    fn max_completion_betting_or_raising_to_amount(&self) -> Option<Chips> {
        self.raise_bounds().map(|(_, max_to)| max_to)
    }
}

/// Фабрика раздач Hold'em: свежая колода на каждую раздачу, перемешанная `rng`.
#[derive(Clone, Debug, Default)]
pub struct HoldemDealer<R> {
    rng: R,
}

impl<R: RandomSource> HoldemDealer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource> RulesFactory for HoldemDealer<R> {
    type State = HoldemState;

    fn create(
        &mut self,
        config: &TableConfig,
        starting_stacks: &[Chips],
    ) -> Result<HoldemState, RulesError> {
        let mut deck = Deck::standard_52();
        self.rng.shuffle(&mut deck.cards);
        HoldemState::new(config, starting_stacks, deck)
    }
}
