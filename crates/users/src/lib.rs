//! `storelens-users` — the shopper entity.

pub mod user;

pub use user::{User, UserId};
