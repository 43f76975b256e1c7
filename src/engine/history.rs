use serde::{Deserialize, Serialize};

use crate::engine::snapshot::Snapshot;

/// Журнал снапшотов текущей раздачи.
///
/// Пока журнал выключен, записи не копятся, а `entries()` возвращает `None`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    enabled: bool,
    entries: Vec<Snapshot>,
}

impl HistoryLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.entries.clear();
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.enabled {
            self.entries.push(snapshot);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> Option<&[Snapshot]> {
        self.enabled.then_some(self.entries.as_slice())
    }

    /// Забрать записи (журнал остаётся включённым, но пустым).
    pub fn take(&mut self) -> Option<Vec<Snapshot>> {
        if self.enabled {
            Some(std::mem::take(&mut self.entries))
        } else {
            None
        }
    }
}
