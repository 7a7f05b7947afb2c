//! stockroom-core
//!
//! Inventory write path for the Stockroom service.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ProductId, InventoryRecord, ObjectKey, StorageRequest, errors）
//! - **ports**: 抽象化レイヤー（StoragePort, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（RequestValidator, InventoryService, ServiceBuilder）
//! - **impls**: StoragePort の実装（InMemory, LocalFs, Dapr）

pub mod domain;
pub mod ports;
pub mod app;
pub mod impls;
