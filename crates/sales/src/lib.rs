//! `storelens-sales` — the order entity.

pub mod order;

pub use order::{Order, OrderId};
