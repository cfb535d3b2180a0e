use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use storelens_core::{DomainError, DomainResult, Entity, EntityId};

use crate::registry::CodeRegistry;

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Closed set of product variants.
///
/// Real products are physical goods with a parcel size and a shipping
/// weight; virtual products are identified by a redemption code and an
/// experience date and never contribute weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProductKind {
    Real { size: u32, weight: u32 },
    Virtual { code: String, experienced_date: NaiveDate },
}

/// Catalogue entry: a real or virtual product.
///
/// ## Identity contract
///
/// Equality and hashing are by [`ProductId`] only. Two products with
/// identical name/price/variant are still distinct catalogue entries, and
/// clones of one instance compare equal. The grouping queries depend on this:
/// value equality would silently merge logically distinct products.
///
/// Prices are assumed non-negative; the constructors do not enforce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    #[serde(flatten)]
    kind: ProductKind,
}

impl Product {
    /// Create a physical product.
    pub fn new_real(name: impl Into<String>, price: f64, size: u32, weight: u32) -> Self {
        Self {
            id: ProductId::new(EntityId::new()),
            name: name.into(),
            price,
            kind: ProductKind::Real { size, weight },
        }
    }

    /// Create a virtual product.
    ///
    /// **Contract**: the redemption code is recorded in `registry` as part of
    /// construction, unconditionally. The registry parameter keeps that side
    /// effect visible at the call site.
    pub fn new_virtual(
        name: impl Into<String>,
        price: f64,
        code: impl Into<String>,
        experienced_date: NaiveDate,
        registry: &CodeRegistry,
    ) -> Self {
        let code = code.into();
        registry.use_code(&code);
        Self {
            id: ProductId::new(EntityId::new()),
            name: name.into(),
            price,
            kind: ProductKind::Virtual { code, experienced_date },
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.kind, ProductKind::Virtual { .. })
    }

    /// Redemption code, for virtual products.
    pub fn code(&self) -> Option<&str> {
        match &self.kind {
            ProductKind::Virtual { code, .. } => Some(code),
            ProductKind::Real { .. } => None,
        }
    }

    /// Experience date, for virtual products.
    pub fn experienced_date(&self) -> Option<NaiveDate> {
        match &self.kind {
            ProductKind::Virtual { experienced_date, .. } => Some(*experienced_date),
            ProductKind::Real { .. } => None,
        }
    }

    /// Parcel size, for real products.
    pub fn size(&self) -> Option<u32> {
        match &self.kind {
            ProductKind::Real { size, .. } => Some(*size),
            ProductKind::Virtual { .. } => None,
        }
    }

    /// Weight this product contributes to an order's shipping weight.
    ///
    /// Virtual products weigh nothing.
    pub fn shipping_weight(&self) -> u32 {
        match &self.kind {
            ProductKind::Real { weight, .. } => *weight,
            ProductKind::Virtual { .. } => 0,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    /// Re-assign a virtual product's redemption code.
    ///
    /// **Contract**: the new code is recorded in `registry`, unconditionally.
    /// The previously recorded code stays in the registry (append-only list).
    /// Calling this on a real product is a validation error.
    pub fn set_code(
        &mut self,
        code: impl Into<String>,
        registry: &CodeRegistry,
    ) -> DomainResult<()> {
        match &mut self.kind {
            ProductKind::Virtual { code: current, .. } => {
                let code = code.into();
                registry.use_code(&code);
                *current = code;
                Ok(())
            }
            ProductKind::Real { .. } => Err(DomainError::validation(
                "real products have no redemption code",
            )),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl core::hash::Hash for Product {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.kind {
            ProductKind::Real { size, weight } => write!(
                f,
                "{} (${:.2}, real, size {size}, weight {weight})",
                self.name, self.price
            ),
            ProductKind::Virtual { code, experienced_date } => write!(
                f,
                "{} (${:.2}, virtual, code {code}, experienced {experienced_date})",
                self.name, self.price
            ),
        }
    }
}
