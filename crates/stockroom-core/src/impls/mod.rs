//! Impls - StoragePort の実装
//!
//! # 含まれる実装
//! - **InMemoryStorage**: テスト・開発用（呼び出し履歴を記録、失敗を注入可能）
//! - **LocalFsStorage**: ローカルディスクに `<root>/<container>/<blobName>` で保存
//! - **DaprBindingStorage**: Dapr sidecar の output binding（HTTP API）経由で保存

pub mod inmem_storage;
pub mod local_fs;
pub mod dapr;

// 主要な型を再エクスポート
pub use self::inmem_storage::InMemoryStorage;
pub use self::local_fs::LocalFsStorage;
pub use self::dapr::DaprBindingStorage;
