//! Errors - エラー型と分類
//!
//! `Display` はメッセージそのもの。HTTP レスポンスの body にそのまま載せるため、
//! プレフィックスは付けない。

use crate::ports::storage::BindingError;

/// ErrorKind は inventory write path のエラー分類
///
/// # 分類
/// - InvalidInput: クライアントエラー（400）
/// - EncodingFailure: payload のシリアライズ失敗（500）
/// - StorageUnavailable: 一時的なストレージ障害（500）
/// - StorageRejected: ストレージが恒久的に拒否（500）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    EncodingFailure,
    StorageUnavailable,
    StorageRejected,
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    EncodingFailure(String),

    #[error("{0}")]
    StorageUnavailable(String),

    #[error("{0}")]
    StorageRejected(String),
}

impl InventoryError {
    pub(crate) fn product_id_required() -> Self {
        Self::InvalidInput("Product ID is required".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::EncodingFailure(_) => ErrorKind::EncodingFailure,
            Self::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            Self::StorageRejected(_) => ErrorKind::StorageRejected,
        }
    }

    /// HTTP ステータスコードに変換
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidInput => 400,
            ErrorKind::EncodingFailure
            | ErrorKind::StorageUnavailable
            | ErrorKind::StorageRejected => 500,
        }
    }

    /// Transient failures may succeed if the client tries again later.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::StorageUnavailable
    }
}

impl From<BindingError> for InventoryError {
    fn from(err: BindingError) -> Self {
        match err {
            BindingError::Unavailable(msg) => Self::StorageUnavailable(msg),
            BindingError::Rejected(msg) => Self::StorageRejected(msg),
        }
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::EncodingFailure(err.to_string())
    }
}
