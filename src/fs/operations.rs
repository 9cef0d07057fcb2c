use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::{self, File},
    io,
};
use tracing::debug;

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("data"));
    name.push(suffix);
    path.with_file_name(name)
}

async fn open_lock_file(path: &Path) -> Result<File, io::Error> {
    File::options()
        .write(true)
        .create(true)
        .read(true)
        .truncate(false)
        .open(sibling_path(path, ".lock"))
        .await
}

/// Reads a whole file while holding a shared lock, so a concurrent [write_file_atomic] is never
/// observed half way. Returns `None` if the file doesn't exist yet.
pub async fn read_file_locked(path: &Path) -> Result<Option<String>, io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let lock = open_lock_file(path).await?;
    lock.lock_shared()?;
    let result = match fs::read_to_string(path).await {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    };
    lock.unlock_async().await?;
    result
}

/// Replaces contents of a file. The data is first written to a temporary sibling and then renamed
/// over the target, all under an exclusive lock.
pub async fn write_file_atomic(path: &Path, contents: &[u8]) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let lock = open_lock_file(path).await?;
    lock.lock_exclusive()?;
    let result = async {
        let tmp = sibling_path(path, ".tmp");
        debug!("Writing {} bytes to {tmp:?}", contents.len());
        fs::write(&tmp, contents).await?;
        fs::rename(&tmp, path).await
    }
    .await;
    lock.unlock_async().await?;
    result
}
