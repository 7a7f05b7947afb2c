//! 設定から StoragePort を 1 つだけ組み立てる（起動時に 1 回）

use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};
use stockroom_core::impls::{DaprBindingStorage, InMemoryStorage, LocalFsStorage};
use stockroom_core::ports::{BindingError, StoragePort};

use crate::config::{BackendKind, BindingConfig};

pub fn build_storage(config: &BindingConfig) -> Result<Arc<dyn StoragePort>, BindingError> {
    let storage: Arc<dyn StoragePort> = match config.backend {
        BackendKind::Dapr => {
            let mut dapr = DaprBindingStorage::new(config.dapr.endpoint.clone())?;
            if let Some(token) = &config.dapr.api_token {
                dapr = dapr.with_api_token(Secret::new(token.expose_secret().clone()));
            }
            Arc::new(dapr)
        }
        BackendKind::Local => Arc::new(LocalFsStorage::new(&config.local.root)),
        BackendKind::Memory => Arc::new(InMemoryStorage::without_call_log()),
    };
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::dapr(BackendKind::Dapr, "dapr")]
    #[case::local(BackendKind::Local, "local")]
    #[case::memory(BackendKind::Memory, "memory")]
    fn builds_configured_backend(#[case] kind: BackendKind, #[case] expected: &str) {
        let config = BindingConfig {
            backend: kind,
            ..Default::default()
        };
        let storage = build_storage(&config).unwrap();
        assert_eq!(storage.backend(), expected);
    }
}
