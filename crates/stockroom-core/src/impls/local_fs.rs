//! LocalFsStorage - ローカルディスクへの保存
//!
//! `<root>/<container>/<blobName>` に書き込む。一時ファイルに書いて fsync してから rename するので、
//! 途中まで書かれたファイルが見えることはない。

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use ulid::Ulid;

use crate::domain::{BindingResponse, StorageRequest};
use crate::ports::{BindingError, StoragePort};

/// Response metadata field holding the written path.
pub const PATH_KEY: &str = "path";

pub struct LocalFsStorage {
    root: PathBuf,
}

impl LocalFsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where `key` in `container` ends up on disk.
    pub fn path_for(&self, container: &str, key: &str) -> Result<PathBuf, BindingError> {
        check_segment("container", container)?;
        check_segment("blobName", key)?;
        Ok(self.root.join(container).join(key))
    }
}

/// container / key は 1 つのパス要素でなければならない
fn check_segment(what: &str, segment: &str) -> Result<(), BindingError> {
    let invalid = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);
    if invalid {
        return Err(BindingError::Rejected(format!(
            "invalid {what} for local storage: {segment:?}"
        )));
    }
    Ok(())
}

/// ファイルシステムが受け付けない名前（長すぎる等）は Rejected
fn io_error(action: &str, path: &Path, err: std::io::Error) -> BindingError {
    let message = format!("failed to {action} {}: {err}", path.display());
    match err.kind() {
        ErrorKind::InvalidFilename | ErrorKind::InvalidInput => BindingError::Rejected(message),
        _ => BindingError::Unavailable(message),
    }
}

/// 一時ファイル名はキーに依存しない（キーが長くても名前の上限を超えない）
fn temp_path(dir: &Path) -> PathBuf {
    dir.join(format!(".{}.tmp", Ulid::new()))
}

async fn write_synced(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(payload).await?;
    file.sync_all().await
}

/// rename をディスクに残すためのディレクトリ fsync（失敗しても書き込み自体は成功扱い）
async fn sync_dir(dir: &Path) {
    let synced = match File::open(dir).await {
        Ok(handle) => handle.sync_all().await,
        Err(e) => Err(e),
    };
    if let Err(e) = synced {
        debug!(dir = %dir.display(), error = %e, "directory fsync skipped");
    }
}

#[async_trait]
impl StoragePort for LocalFsStorage {
    async fn store(&self, request: StorageRequest) -> Result<BindingResponse, BindingError> {
        let key = request
            .blob_name()
            .ok_or_else(|| BindingError::Rejected("blobName metadata is required".to_string()))?;
        let path = self.path_for(&request.container, key)?;
        let dir = self.root.join(&request.container);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error("create directory", &dir, e))?;

        let tmp = temp_path(&dir);
        if let Err(e) = write_synced(&tmp, &request.payload).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error("write", &tmp, e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error("rename into", &path, e));
        }
        sync_dir(&dir).await;

        debug!(path = %path.display(), bytes = request.payload.len(), "wrote object");

        let mut metadata = BTreeMap::new();
        metadata.insert(PATH_KEY.to_string(), path.display().to_string());
        Ok(BindingResponse {
            data: Vec::new(),
            metadata,
        })
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}
