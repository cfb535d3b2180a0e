use std::sync::Arc;

use serde::{Deserialize, Serialize};

use storelens_catalog::Product;
use storelens_core::{Entity, EntityId};
use storelens_users::User;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl OrderId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One user's order: a product sequence bought by a single user.
///
/// Users and products are shared across orders via `Arc`; the same product
/// instance appearing in several orders (or several times within one order)
/// is the normal case, and the grouping queries count those occurrences by
/// identity.
///
/// ## Identity contract
///
/// Equality and hashing are by [`OrderId`] only, so orders can key the
/// per-order weight map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user: Arc<User>,
    products: Vec<Arc<Product>>,
}

impl Order {
    pub fn new(user: Arc<User>, products: Vec<Arc<Product>>) -> Self {
        Self {
            id: OrderId::new(EntityId::new()),
            user,
            products,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn user(&self) -> &Arc<User> {
        &self.user
    }

    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Whether any product in this order is `product` (identity equality).
    pub fn contains(&self, product: &Product) -> bool {
        self.products.iter().any(|p| p.as_ref() == product)
    }

    pub fn set_user(&mut self, user: Arc<User>) {
        self.user = user;
    }

    pub fn set_products(&mut self, products: Vec<Arc<Product>>) {
        self.products = products;
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Order {}

impl core::hash::Hash for Order {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
