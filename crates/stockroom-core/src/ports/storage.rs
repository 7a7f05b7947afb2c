//! StoragePort - 名前付きコンテナへの bytes 書き込み
//!
//! Dapr output binding / ローカル FS / InMemory のどれでも差し替え可能な継ぎ目。
//! 実装は `crate::impls` を参照。

use async_trait::async_trait;

use crate::domain::{BindingResponse, StorageRequest};

/// BindingError はバックエンドの失敗を 2 種類に分類
///
/// メッセージはそのままクライアントに返るので、`Display` は中身だけ。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// 一時的（タイムアウト、接続失敗、5xx など）
    #[error("{0}")]
    Unavailable(String),

    /// 恒久的（不正なキー、存在しないコンテナなど）
    #[error("{0}")]
    Rejected(String),
}

/// StoragePort stores one payload under `metadata["blobName"]` in
/// `request.container`.
///
/// # 契約
/// - 成功: payload はキーに対して永続化済み
/// - 失敗: 部分的な書き込みは見えない
/// - リトライするかどうかは実装次第（呼び出し側はリトライしない）
#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn store(&self, request: StorageRequest) -> Result<BindingResponse, BindingError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
