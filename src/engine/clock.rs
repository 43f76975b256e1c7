use std::time::{SystemTime, UNIX_EPOCH};

/// Источник времени для меток снапшотов (миллисекунды).
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Системные часы: миллисекунды с UNIX epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Часы, которые всегда показывают одно и то же время (тесты, реплей).
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

/// Следующая метка времени: строго больше предыдущей, даже если часы стоят
/// или ушли назад.
pub fn next_timestamp(clock: &dyn Clock, last: u64) -> u64 {
    clock.now_ms().max(last.saturating_add(1))
}
