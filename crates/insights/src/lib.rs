//! `storelens-insights` — aggregate queries over a fixed order list.
//!
//! Every query is a pure read: it recomputes its result from scratch, never
//! mutates its input, and signals "no applicable data" with `None` or a zero
//! default rather than an error.

pub mod queries;

pub use queries::{
    average_buyer_age, most_expensive_product, most_popular_product, order_weights,
    product_buyers, sort_orders_by_age_desc, sort_products_by_price,
};
