//! `storelens-catalog` — the product model and the redemption-code registry.

pub mod product;
pub mod registry;

pub use product::{Product, ProductId, ProductKind};
pub use registry::CodeRegistry;
