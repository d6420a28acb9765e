//! Product entity and its candidate forms.

/// Store-assigned product identifier.
///
/// Assigned by the backing store on insert and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw identifier value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted product.
///
/// Every persisted product satisfies the catalog validation rules at the
/// moment it was written; see [`crate::domain::validate_product`].
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    /// Stock-keeping unit code; unique across the catalog.
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// A validated candidate ready to be written to the store.
///
/// Only the validation pass constructs these, so holding one is proof the
/// field rules held at validation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Raw, untrusted product input prior to validation.
///
/// Every field is optional, mirroring a JSON body where any field may be
/// absent or null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}
