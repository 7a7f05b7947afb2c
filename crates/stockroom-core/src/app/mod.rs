//! App - アプリケーション層
//!
//! ports を組み合わせて inventory write path を実装します。
//!
//! # 主要コンポーネント
//! - **RequestValidator**: クエリパラメータから ProductId を取り出す
//! - **InventoryService**: Validating → Building → Persisting → Responding
//! - **ServiceBuilder**: ワイヤリングと起動時検証

pub mod validator;
pub mod inventory;
pub mod builder;

// 主要な型を再エクスポート
pub use self::validator::{RequestValidator, PRODUCT_ID_PARAM};
pub use self::inventory::{InventoryService, Phase, StoredItem, CONFIRMATION};
pub use self::builder::{BuildError, ServiceBuilder, DEFAULT_CONTAINER, DEFAULT_STORE_TIMEOUT};
