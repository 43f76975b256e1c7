//! `PokerTable` – один стол, одна раздача за раз.
//!
//! Хост вызывает `step()` в цикле: каждый вызов делает одну единицу прогресса
//! (одну фазу дилера или один ход игрока) и обновляет метку времени, фазу и журнал.
//! Когда раздача выплачена, стол сам сдвигает баттон и готовит следующую раздачу.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{Chips, Player, SeatIndex, TableConfig};
use crate::engine::clock::{next_timestamp, Clock, SystemClock};
use crate::engine::errors::{EngineError, EngineFault};
use crate::engine::history::HistoryLog;
use crate::engine::moves::Move;
use crate::engine::phase::GamePhase;
use crate::engine::scheduler::{advance, Advance};
use crate::engine::seats::{relative_index, to_absolute, to_relative, DealerButton};
use crate::engine::snapshot::{snapshot, Snapshot};
use crate::infra::rng::SystemRng;
use crate::rules::{HoldemDealer, RulesEngine, RulesFactory};

/// Итог одного вызова `step()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// Выполнена фаза (дилера или ход игрока).
    Progressed(GamePhase),
    /// Ждём ход игрока.
    Waiting,
    /// Раздача выплачена, следующая уже подготовлена (если получилось).
    HandFinished(HandSummary),
}

/// Итоги завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    /// Порядковый номер раздачи за этим столом (с 1).
    pub hand_number: u64,
    /// Смещение баттона в этой раздаче.
    pub dealer: usize,
    /// Деньги игроков после раздачи, в порядке игроков.
    pub final_money: Vec<Chips>,
    /// Журнал раздачи (`None`, если журнал выключен).
    pub log: Option<Vec<Snapshot>>,
    /// Удалось ли сразу подготовить следующую раздачу.
    pub next_hand_ready: bool,
}

/// Стол с планировщиком фаз поверх движка правил `F`.
pub struct PokerTable<F: RulesFactory = HoldemDealer<SystemRng>> {
    factory: F,
    config: TableConfig,
    /// Новый конфиг, ждущий следующей раздачи.
    pending_config: Option<TableConfig>,
    players: Vec<Player>,
    button: DealerButton,
    state: Option<F::State>,
    phase: Option<GamePhase>,
    timestamp: u64,
    clock: Box<dyn Clock>,
    history: HistoryLog,
    fault: Option<EngineFault>,
    /// Текущая раздача сделала хотя бы один шаг.
    running: bool,
    hands_played: u64,
}

impl PokerTable {
    /// Стол с Hold'em и системным RNG.
    pub fn new(config: TableConfig, players: Vec<Player>) -> Result<Self, EngineError> {
        Self::with_factory(config, players, HoldemDealer::new(SystemRng))
    }
}

impl<F: RulesFactory> PokerTable<F> {
    pub fn with_factory(
        config: TableConfig,
        players: Vec<Player>,
        factory: F,
    ) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        Ok(Self {
            factory,
            config,
            pending_config: None,
            players,
            button: DealerButton::default(),
            state: None,
            phase: None,
            timestamp: 0,
            clock: Box::new(SystemClock),
            history: HistoryLog::new(false),
            fault: None,
            running: false,
            hands_played: 0,
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.history.set_enabled(enabled);
        self
    }

    // ------------------------------------------------------------------
    // Аксессоры
    // ------------------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Смещение баттона: игрок с этим индексом сидит на баттоне.
    pub fn dealer(&self) -> usize {
        self.button.offset()
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.phase
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn fault(&self) -> Option<EngineFault> {
        self.fault
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Состояние движка правил (table-absolute порядок).
    pub fn rules_state(&self) -> Option<&F::State> {
        self.state.as_ref()
    }

    /// Чей ход, в порядке игроков.
    pub fn whose_turn(&self) -> Option<SeatIndex> {
        let state = self.state.as_ref()?;
        let actor = state.actor_index()?;
        Some(relative_index(actor, self.dealer(), state.player_count()))
    }

    /// Текущий снапшот стола (`None`, если раздача не подготовлена).
    pub fn game_state(&self) -> Option<Snapshot> {
        let state = self.state.as_ref()?;
        Some(snapshot(
            state,
            &self.config,
            &self.players,
            self.dealer(),
            self.phase,
            self.timestamp,
        ))
    }

    /// Журнал снапшотов текущей раздачи; `None` – журнал выключен.
    pub fn get_log(&self) -> Option<&[Snapshot]> {
        self.history.entries()
    }

    pub fn set_logging(&mut self, enabled: bool) {
        self.history.set_enabled(enabled);
    }

    // ------------------------------------------------------------------
    // Состав и конфиг
    // ------------------------------------------------------------------

    /// Конфиг, по которому будет создана следующая раздача.
    fn effective_config(&self) -> &TableConfig {
        self.pending_config.as_ref().unwrap_or(&self.config)
    }

    pub fn add_player(&mut self, player: Player) -> Result<(), EngineError> {
        if self.running {
            return Err(EngineError::HandInProgress);
        }
        let capacity = self.effective_config().player_count;
        if self.players.len() >= capacity {
            return Err(EngineError::TableFull(self.players.len()));
        }
        debug!(identity = %player.identity, "player added");
        self.players.push(player);
        self.discard_hand();
        Ok(())
    }

    pub fn remove_player(&mut self, index: SeatIndex) -> Result<Player, EngineError> {
        if self.running {
            return Err(EngineError::HandInProgress);
        }
        if index >= self.players.len() {
            return Err(EngineError::InvalidSeat(index));
        }
        let player = self.players.remove(index);
        debug!(identity = %player.identity, "player removed");
        self.discard_hand();
        Ok(player)
    }

    /// Новый конфиг вступает в силу со следующей раздачи.
    pub fn set_config(&mut self, config: TableConfig) -> Result<(), EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        self.pending_config = Some(config);
        Ok(())
    }

    fn discard_hand(&mut self) {
        self.state = None;
        self.phase = None;
    }

    // ------------------------------------------------------------------
    // Жизненный цикл раздачи
    // ------------------------------------------------------------------

    /// Подготовить раздачу на текущем баттоне (баттон не двигается).
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.fault = None;
        self.running = false;
        self.apply_pending_config();
        self.create_hand()
    }

    fn apply_pending_config(&mut self) {
        if let Some(config) = self.pending_config.take() {
            info!(?config, "table config replaced");
            self.config = config;
        }
    }

    fn create_hand(&mut self) -> Result<(), EngineError> {
        self.discard_hand();
        self.history.clear();

        let expected = self.config.player_count;
        if self.players.len() != expected {
            return Err(EngineError::SeatCountMismatch {
                expected,
                actual: self.players.len(),
            });
        }

        self.button = DealerButton(self.button.offset() % expected);
        let money: Vec<Chips> = self.players.iter().map(|p| p.money).collect();
        let stacks = to_absolute(&money, self.dealer());

        let state = self.factory.create(&self.config, &stacks)?;
        self.state = Some(state);
        self.stamp();
        let busted = self.players.iter().filter(|p| p.is_busted()).count();
        info!(
            hand = self.hands_played + 1,
            dealer = self.dealer(),
            busted,
            "hand created"
        );
        Ok(())
    }

    /// Сделать одну единицу прогресса.
    ///
    /// `mv` учитывается, только если обязательных фаз нет и кто-то должен ходить.
    /// Недопустимый ход просто игнорируется: фаза остаётся `WaitingMove`.
    pub fn step(&mut self, mv: Option<Move>) -> Result<StepStatus, EngineError> {
        if let Some(fault) = self.fault {
            return Err(EngineError::Fault(fault));
        }

        let (outcome, hand_over) = {
            let state = self.state.as_mut().ok_or(EngineError::NoActiveHand)?;
            if !state.status() {
                (None, true)
            } else {
                let outcome = advance(state, mv.as_ref())?;
                (Some(outcome), !state.status())
            }
        };
        self.running = true;

        let Some(outcome) = outcome else {
            return self.fail(EngineFault::HandEndedUnexpectedly);
        };

        match outcome {
            Advance::Stalled => self.fail(EngineFault::NoActor),
            Advance::Waiting => {
                if self.phase != Some(GamePhase::WaitingMove) {
                    self.phase = Some(GamePhase::WaitingMove);
                    self.stamp();
                }
                self.record();
                Ok(StepStatus::Waiting)
            }
            Advance::Executed(phase) => {
                self.phase = Some(phase);
                self.stamp();
                debug!(%phase, "phase executed");

                if matches!(phase, GamePhase::CollectingBets | GamePhase::PullingChips) {
                    self.sync_money();
                }

                if hand_over {
                    return match phase {
                        GamePhase::PushingChips | GamePhase::PullingChips => {
                            Ok(StepStatus::HandFinished(self.finish_hand()))
                        }
                        _ => self.fail(EngineFault::HandEndedUnexpectedly),
                    };
                }

                self.record();
                Ok(StepStatus::Progressed(phase))
            }
        }
    }

    /// Закрыть выплаченную раздачу и сразу подготовить следующую.
    fn finish_hand(&mut self) -> HandSummary {
        self.sync_money();
        self.record();
        self.hands_played += 1;

        let dealer = self.dealer();
        let final_money: Vec<Chips> = self.players.iter().map(|p| p.money).collect();
        let log = self.history.take();
        info!(
            hand = self.hands_played,
            dealer,
            money = ?final_money,
            "hand finished"
        );

        self.button.advance(self.players.len());
        self.running = false;
        self.apply_pending_config();

        let next_hand_ready = match self.create_hand() {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "next hand was not created");
                false
            }
        };

        HandSummary {
            hand_number: self.hands_played,
            dealer,
            final_money,
            log,
            next_hand_ready,
        }
    }

    fn fail(&mut self, fault: EngineFault) -> Result<StepStatus, EngineError> {
        warn!(%fault, phase = ?self.phase, "table faulted");
        self.fault = Some(fault);
        Err(EngineError::Fault(fault))
    }

    /// Стеки движка → `Player.money` (в порядке игроков).
    fn sync_money(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let stacks = to_relative(state.stacks(), self.button.offset());
        for (player, stack) in self.players.iter_mut().zip(stacks) {
            player.money = stack;
        }
    }

    fn stamp(&mut self) {
        self.timestamp = next_timestamp(self.clock.as_ref(), self.timestamp);
    }

    fn record(&mut self) {
        if !self.history.is_enabled() {
            return;
        }
        if let Some(snapshot) = self.game_state() {
            self.history.push(snapshot);
        }
    }
}
