use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::InventoryError;

/// Identifier of a product (e.g. `sku-42`).
///
/// 空文字列は受け付けない。`ProductId` が存在する時点で非空であることが保証される。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    pub fn new(s: impl Into<String>) -> Result<Self, InventoryError> {
        let s = s.into();
        if s.is_empty() {
            return Err(InventoryError::product_id_required());
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductId {
    type Error = InventoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
