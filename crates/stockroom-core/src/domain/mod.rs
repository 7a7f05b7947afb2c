//! Domain model (product ids, records, object keys, storage requests, errors).

pub mod product;
pub mod record;
pub mod key;
pub mod request;
pub mod errors;

pub use self::product::ProductId;
pub use self::record::{InventoryRecord, InventoryRecordBuilder, DEFAULT_QUANTITY};
pub use self::key::{KeyDeriver, KeyStrategy, ObjectKey, RECORD_SEGMENT};
pub use self::request::{BindingOperation, BindingResponse, StorageRequest, BLOB_NAME_KEY};
pub use self::errors::{ErrorKind, InventoryError};
