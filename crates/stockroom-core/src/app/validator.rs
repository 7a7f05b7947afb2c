//! RequestValidator - 唯一の入力検証ゲート
//!
//! ここを通った後の ProductId は非空であることが保証される。

use crate::domain::{InventoryError, ProductId};

/// Query parameter carrying the product id.
pub const PRODUCT_ID_PARAM: &str = "id";

pub struct RequestValidator;

impl RequestValidator {
    /// Extract `id` from query parameters.
    ///
    /// 同じキーが複数あるときは最初の値を使う。欠落・空文字は `InvalidInput`。
    pub fn product_id<'a, I>(params: I) -> Result<ProductId, InventoryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let value = params
            .into_iter()
            .find_map(|(k, v)| (k == PRODUCT_ID_PARAM).then_some(v))
            .unwrap_or_default();
        ProductId::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use rstest::rstest;

    #[test]
    fn extracts_id() {
        let id = RequestValidator::product_id([("id", "sku-42")]).unwrap();
        assert_eq!(id.as_str(), "sku-42");
    }

    #[test]
    fn ignores_other_params() {
        let id = RequestValidator::product_id([("quantity", "5"), ("id", "sku-42")]).unwrap();
        assert_eq!(id.as_str(), "sku-42");
    }

    #[rstest]
    #[case::no_params(vec![])]
    #[case::other_params_only(vec![("sku", "sku-42")])]
    #[case::empty_value(vec![("id", "")])]
    #[case::first_value_empty(vec![("id", ""), ("id", "sku-42")])]
    #[case::case_sensitive_key(vec![("ID", "sku-42")])]
    fn missing_or_empty_id_is_invalid(#[case] params: Vec<(&str, &str)>) {
        let err = RequestValidator::product_id(params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "Product ID is required");
    }

    #[test]
    fn first_value_wins() {
        let id = RequestValidator::product_id([("id", "a"), ("id", "b")]).unwrap();
        assert_eq!(id.as_str(), "a");
    }
}
