//! Inventory record and its canonical JSON encoding.

use serde::{Deserialize, Serialize};

use super::errors::InventoryError;
use super::product::ProductId;

/// Quantity written when nothing else is configured.
pub const DEFAULT_QUANTITY: u32 = 100;

/// The document persisted for one inventory update.
///
/// Field names are part of the stored format: `productID` / `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "productID")]
    product_id: ProductId,
    quantity: u32,
}

impl InventoryRecord {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// JSON bytes として書き出す
    pub fn encode(&self) -> Result<Vec<u8>, InventoryError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// InventoryRecordBuilder は検証済みの ProductId から record を組み立てる
///
/// quantity はリクエストからではなく設定から来る。
#[derive(Debug, Clone, Copy)]
pub struct InventoryRecordBuilder {
    quantity: u32,
}

impl InventoryRecordBuilder {
    pub fn new(quantity: u32) -> Self {
        Self { quantity }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn build(&self, product_id: ProductId) -> InventoryRecord {
        InventoryRecord::new(product_id, self.quantity)
    }

    /// Build and serialize in one step.
    pub fn build_payload(&self, product_id: ProductId) -> Result<Vec<u8>, InventoryError> {
        self.build(product_id).encode()
    }
}

impl Default for InventoryRecordBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_QUANTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_builder_uses_placeholder_quantity() {
        let record = InventoryRecordBuilder::default().build(ProductId::new("sku-42").unwrap());
        assert_eq!(record.product_id().as_str(), "sku-42");
        assert_eq!(record.quantity(), 100);
    }

    #[test]
    fn payload_uses_stored_field_names() {
        let payload = InventoryRecordBuilder::new(7)
            .build_payload(ProductId::new("sku-42").unwrap())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(value, json!({ "productID": "sku-42", "quantity": 7 }));
    }

    #[test]
    fn payload_decodes_back_into_record() {
        let builder = InventoryRecordBuilder::default();
        let payload = builder
            .build_payload(ProductId::new("widget/α").unwrap())
            .unwrap();
        let record: InventoryRecord = serde_json::from_slice(&payload).unwrap();
        assert_eq!(record, builder.build(ProductId::new("widget/α").unwrap()));
    }

    #[test]
    fn negative_quantity_is_not_a_valid_record() {
        let result: Result<InventoryRecord, _> =
            serde_json::from_value(json!({ "productID": "sku-1", "quantity": -1 }));
        assert!(result.is_err());
    }
}
