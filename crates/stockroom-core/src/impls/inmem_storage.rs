//! InMemoryStorage - 開発用・テスト用の StoragePort
//!
//! # 学習ポイント
//! - tokio::sync::Mutex による排他制御（ロックを跨いで await しない）
//! - 呼び出し履歴の記録（リトライしていないことをテストで確認できる）。
//!   サーバーで `backend = "memory"` を使うときは `without_call_log` で履歴を持たない
//! - 失敗の注入（`failing` / `fail_with`）

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::{BindingResponse, StorageRequest};
use crate::ports::{BindingError, StoragePort};

#[derive(Default)]
struct InMemoryState {
    /// container -> key -> payload
    objects: HashMap<String, HashMap<String, Vec<u8>>>,
    /// store() に渡された全リクエスト（失敗したものも含む）。record_calls が false なら空
    calls: Vec<StorageRequest>,
    call_count: usize,
    record_calls: bool,
    /// Some のとき、store() は保存せずにこのエラーを返す
    fail_with: Option<BindingError>,
}

/// InMemoryStorage は container ごとに HashMap で payload を保持
///
/// # 使用例
/// ```ignore
/// let storage = Arc::new(InMemoryStorage::new());
/// let service = ServiceBuilder::new().storage(storage.clone()).build()?;
/// service.handle([("id", "sku-42")]).await?;
/// assert_eq!(storage.call_count().await, 1);
/// ```
pub struct InMemoryStorage {
    state: Mutex<InMemoryState>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::with_state(InMemoryState {
            record_calls: true,
            ..Default::default()
        })
    }

    /// Keeps objects and the call count, but not a copy of every request.
    pub fn without_call_log() -> Self {
        Self::with_state(InMemoryState::default())
    }

    /// A storage whose every call fails with `err`.
    pub fn failing(err: BindingError) -> Self {
        Self::with_state(InMemoryState {
            record_calls: true,
            fail_with: Some(err),
            ..Default::default()
        })
    }

    fn with_state(state: InMemoryState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Switch failure injection on (`Some`) or off (`None`).
    pub async fn fail_with(&self, err: Option<BindingError>) {
        self.state.lock().await.fail_with = err;
    }

    pub async fn calls(&self) -> Vec<StorageRequest> {
        self.state.lock().await.calls.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.state.lock().await.call_count
    }

    pub async fn get(&self, container: &str, key: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .await
            .objects
            .get(container)
            .and_then(|objects| objects.get(key))
            .cloned()
    }

    pub async fn len(&self, container: &str) -> usize {
        self.state
            .lock()
            .await
            .objects
            .get(container)
            .map_or(0, HashMap::len)
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoragePort for InMemoryStorage {
    async fn store(&self, request: StorageRequest) -> Result<BindingResponse, BindingError> {
        let mut state = self.state.lock().await;
        state.call_count += 1;
        if state.record_calls {
            state.calls.push(request.clone());
        }

        if let Some(err) = &state.fail_with {
            return Err(err.clone());
        }

        let key = request
            .blob_name()
            .ok_or_else(|| BindingError::Rejected("blobName metadata is required".to_string()))?
            .to_string();

        state
            .objects
            .entry(request.container)
            .or_default()
            .insert(key, request.payload);

        Ok(BindingResponse::default())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
