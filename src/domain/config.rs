use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Параметры стола. Живут всю раздачу без изменений:
/// новая версия конфига подменяет старую целиком и только между раздачами.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Анте с каждого игрока (0 – без анте).
    pub ante: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Сколько игроков должно сидеть за столом перед стартом раздачи.
    pub player_count: usize,
}

impl TableConfig {
    pub fn new(ante: Chips, small_blind: Chips, big_blind: Chips, player_count: usize) -> Self {
        Self {
            ante,
            small_blind,
            big_blind,
            player_count,
        }
    }

    /// Загрузить конфиг из JSON вида
    /// `{"ante": 0, "small_blind": 1, "big_blind": 2, "player_count": 3}`.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let config: TableConfig =
            serde_json::from_str(raw).map_err(|e| format!("TableConfig: bad json: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.player_count < 2 {
            return Err(format!(
                "TableConfig: player_count = {}, нужно хотя бы 2",
                self.player_count
            ));
        }
        if self.big_blind.is_zero() {
            return Err("TableConfig: big_blind = 0".to_string());
        }
        if self.small_blind > self.big_blind {
            return Err(format!(
                "TableConfig: small_blind ({}) > big_blind ({})",
                self.small_blind, self.big_blind
            ));
        }
        Ok(())
    }
}

impl Default for TableConfig {
    /// 500 / 1000 / 2000 на троих.
    fn default() -> Self {
        Self::new(Chips(500), Chips(1000), Chips(2000), 3)
    }
}
