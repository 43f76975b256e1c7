//! Инфраструктура вокруг стола: реализации RNG для перемешивания колоды.

pub mod rng;

pub use rng::*;
