//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! ストレージ（Dapr binding / ローカル FS / InMemory）、時刻、ID 生成を
//! trait として切り出し、handler から実装の詳細を隠蔽します。

pub mod storage;
pub mod clock;
pub mod id_generator;

// 主要な trait を再エクスポート
pub use self::storage::{BindingError, StoragePort};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
