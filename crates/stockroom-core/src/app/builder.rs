//! ServiceBuilder - InventoryService の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - グローバル参照ではなく、依存を明示的に渡す

use std::sync::Arc;
use std::time::Duration;

use super::inventory::InventoryService;
use crate::domain::{InventoryRecordBuilder, KeyDeriver, KeyStrategy, DEFAULT_QUANTITY};
use crate::ports::{Clock, IdGenerator, StoragePort, SystemClock, UlidGenerator};

/// Logical container (binding name) written to when nothing else is configured.
pub const DEFAULT_CONTAINER: &str = "inventory";

/// Deadline for a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// ServiceBuilder は InventoryService を構築
///
/// # 使用例
/// ```ignore
/// let service = ServiceBuilder::new()
///     .storage(Arc::new(InMemoryStorage::new()))
///     .container("inventory")
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - storage が未設定なら BuildError::MissingStorage
/// - container 名が空なら BuildError::EmptyContainer
/// - timeout が 0 なら BuildError::ZeroTimeout
pub struct ServiceBuilder {
    storage: Option<Arc<dyn StoragePort>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    container: String,
    quantity: u32,
    key_strategy: KeyStrategy,
    store_timeout: Duration,
}

/// BuildError はサービス構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no storage backend configured")]
    MissingStorage,

    #[error("container name must not be empty")]
    EmptyContainer,

    #[error("store timeout must be greater than zero")]
    ZeroTimeout,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self {
            storage: None,
            clock: None,
            ids: None,
            container: DEFAULT_CONTAINER.to_string(),
            quantity: DEFAULT_QUANTITY,
            key_strategy: KeyStrategy::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn storage(mut self, storage: Arc<dyn StoragePort>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Only consulted with [`KeyStrategy::Unique`]. Defaults to a ULID generator.
    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn key_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.key_strategy = strategy;
        self
    }

    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<InventoryService, BuildError> {
        let storage = self.storage.ok_or(BuildError::MissingStorage)?;
        if self.container.trim().is_empty() {
            return Err(BuildError::EmptyContainer);
        }
        if self.store_timeout.is_zero() {
            return Err(BuildError::ZeroTimeout);
        }

        Ok(InventoryService {
            storage,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            ids: self
                .ids
                .unwrap_or_else(|| Arc::new(UlidGenerator::new(SystemClock))),
            records: InventoryRecordBuilder::new(self.quantity),
            keys: KeyDeriver::new(self.key_strategy),
            container: self.container,
            store_timeout: self.store_timeout,
        })
    }
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
