//! InventoryService - inventory write path のオーケストレーション
//!
//! # 状態遷移
//! ```text
//! Validating -> Building -> Persisting -> Responding
//!     |            |            |
//!     +------------+------------+--> Responding (error)
//! ```
//! - Validating: RequestValidator（失敗 → 400）
//! - Building: record の組み立てとキー導出（失敗 → 500）
//! - Persisting: StoragePort::store を 1 回だけ呼ぶ（失敗 → 500、リトライしない）
//! - Responding: 成功時は固定の確認メッセージ。backend の応答は捨てる

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::validator::RequestValidator;
use crate::domain::{
    InventoryError, InventoryRecordBuilder, KeyDeriver, KeyStrategy, ObjectKey, ProductId,
    StorageRequest,
};
use crate::ports::{Clock, IdGenerator, StoragePort};

/// Body returned on success.
pub const CONFIRMATION: &str = "Inventory in store";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Validating,
    Building,
    Persisting,
    Responding,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Validating => "validating",
            Phase::Building => "building",
            Phase::Persisting => "persisting",
            Phase::Responding => "responding",
        };
        f.write_str(s)
    }
}

/// What was written. Useful for logs and tests; not part of the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    pub container: String,
    pub key: ObjectKey,
    pub bytes: usize,
}

/// InventoryService は 1 リクエスト分の write path を実行する
///
/// 全フィールドは起動時に決まり、以後は読み取り専用。
/// リクエスト間で共有される可変状態はない。
pub struct InventoryService {
    pub(super) storage: Arc<dyn StoragePort>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) ids: Arc<dyn IdGenerator>,
    pub(super) records: InventoryRecordBuilder,
    pub(super) keys: KeyDeriver,
    pub(super) container: String,
    pub(super) store_timeout: Duration,
}

impl InventoryService {
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    pub fn backend(&self) -> &'static str {
        self.storage.backend()
    }

    /// Full write path starting from raw query parameters.
    pub async fn handle<'a, I>(&self, params: I) -> Result<StoredItem, InventoryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let product_id = RequestValidator::product_id(params).inspect_err(|err| {
            warn!(phase = %Phase::Validating, error = %err, "rejected inventory request");
        })?;
        self.record(product_id).await
    }

    /// Building + Persisting for an already validated product id.
    pub async fn record(&self, product_id: ProductId) -> Result<StoredItem, InventoryError> {
        let key = self.derive_key(&product_id);
        let payload = self.records.build_payload(product_id).inspect_err(|err| {
            warn!(phase = %Phase::Building, error = %err, "failed to encode inventory record");
        })?;
        debug!(key = %key, "derived object key");

        let bytes = payload.len();
        let request = StorageRequest::create(self.container.clone(), key.clone(), payload);
        self.persist(request).await.inspect_err(|err| {
            warn!(
                phase = %Phase::Persisting,
                backend = self.storage.backend(),
                container = %self.container,
                key = %key,
                kind = ?err.kind(),
                error = %err,
                "failed to store inventory record"
            );
        })?;

        info!(container = %self.container, key = %key, bytes, "stored inventory record");
        Ok(StoredItem {
            container: self.container.clone(),
            key,
            bytes,
        })
    }

    fn derive_key(&self, product_id: &ProductId) -> ObjectKey {
        let now = self.clock.now();
        match self.keys.strategy() {
            KeyStrategy::Unique => self
                .keys
                .derive_unique(now, self.ids.generate_token(), product_id),
            KeyStrategy::Seconds | KeyStrategy::Millis => self.keys.derive(now, product_id),
        }
    }

    /// store_timeout を超えたら StorageUnavailable。future は drop されて打ち切られる。
    async fn persist(&self, request: StorageRequest) -> Result<(), InventoryError> {
        match tokio::time::timeout(self.store_timeout, self.storage.store(request)).await {
            Ok(Ok(_response)) => Ok(()),
            Ok(Err(err)) => Err(err.into()),
            Err(_elapsed) => Err(InventoryError::StorageUnavailable(format!(
                "storage call timed out after {}ms",
                self.store_timeout.as_millis()
            ))),
        }
    }
}
