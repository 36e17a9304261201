//! On-disk image store with archive-before-overwrite.
//!
//! Files live under a single images root. Before a file takes a name, every
//! sibling sharing its stem (any extension) is moved into the directory's
//! hidden `.trash` folder and recorded in `.trash/trash.log`, a JSON array
//! of [`TrashEntry`] values. Nothing is destroyed until
//! [`AssetStore::purge_trash`] runs.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::types::Timestamp;
use crate::upload::UploadTarget;

/// Name of the hidden archive folder inside each upload directory.
pub const TRASH_DIR: &str = ".trash";

/// Name of the recovery log inside [`TRASH_DIR`].
pub const TRASH_LOG: &str = "trash.log";

/// URL prefix under which the images root is served.
pub const PUBLIC_PREFIX: &str = "/images/";

/// Errors raised by [`AssetStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Ongeldige bestandsnaam: {0}")]
    InvalidName(String),

    #[error("Bestand niet gevonden: {0}")]
    NotFound(String),

    #[error("Prullenbaklogboek is beschadigd: {0}")]
    CorruptLog(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One archived file, as recorded in `trash.log`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashEntry {
    pub original_name: String,
    pub archived_name: String,
    pub reason: String,
    pub archived_at: Timestamp,
}

/// A file currently stored in an upload directory.
#[derive(Debug, Clone, Serialize)]
pub struct AssetInfo {
    pub name: String,
    pub path: String,
    pub size_bytes: u64,
}

/// Result of a successful [`AssetStore::store`].
#[derive(Debug, Clone, Serialize)]
pub struct StoredAsset {
    pub file_name: String,
    pub path: String,
    pub size_bytes: u64,
    pub archived: Vec<TrashEntry>,
}

/// Result of [`AssetStore::purge_trash`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct PurgeReport {
    pub files_deleted: u32,
    pub bytes_reclaimed: u64,
    pub errors: Vec<String>,
}

/// Filesystem-backed image store rooted at one directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` to `target`, archiving same-stem siblings first.
    ///
    /// The bytes are first written under a generated name and then renamed
    /// to the clean name. If the clean name is still occupied (a sibling
    /// could not be archived) or the rename fails, the generated name is
    /// kept so no existing file is overwritten.
    pub async fn store(&self, target: &UploadTarget, data: &[u8]) -> Result<StoredAsset, AssetError> {
        validate_file_name(&target.file_name)?;
        let rel_dir = sanitize_relative(&target.dir)?;
        let dir = self.root.join(&rel_dir);
        fs::create_dir_all(&dir).await?;

        let (stem, ext) = split_name(&target.file_name);
        let now = chrono::Utc::now();
        let generated = match ext {
            Some(ext) => format!("{stem}-{}.{ext}", now.timestamp_millis()),
            None => format!("{stem}-{}", now.timestamp_millis()),
        };
        fs::write(dir.join(&generated), data).await?;

        let archived = match self
            .archive_matching(&dir, |name| split_name(name).0 == stem, "overschreven door upload")
            .await
        {
            Ok(archived) => archived,
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(dir.join(&generated)).await {
                    tracing::warn!(file = %generated, error = %cleanup, "Failed to remove pending upload");
                }
                return Err(e);
            }
        };

        let clean_path = dir.join(&target.file_name);
        let file_name = if fs::try_exists(&clean_path).await.unwrap_or(true) {
            tracing::warn!(
                path = %clean_path.display(),
                kept = %generated,
                "Target name still occupied after archiving, keeping generated name",
            );
            generated
        } else {
            match fs::rename(dir.join(&generated), &clean_path).await {
                Ok(()) => target.file_name.clone(),
                Err(e) => {
                    tracing::warn!(error = %e, kept = %generated, "Rename to clean name failed");
                    generated
                }
            }
        };

        tracing::info!(
            dir = %rel_dir.display(),
            file = %file_name,
            bytes = data.len(),
            archived = archived.len(),
            "Stored upload",
        );

        Ok(StoredAsset {
            path: public_path(&rel_dir, &file_name),
            file_name,
            size_bytes: data.len() as u64,
            archived,
        })
    }

    /// List the files (not folders, not hidden entries) in `dir`.
    pub async fn list(&self, dir: &Path) -> Result<Vec<AssetInfo>, AssetError> {
        let rel_dir = sanitize_relative(dir)?;
        let full = self.root.join(&rel_dir);
        let mut entries = match fs::read_dir(&full).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut assets = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let meta = entry.metadata().await?;
            if !meta.is_file() || name.starts_with('.') {
                continue;
            }
            assets.push(AssetInfo {
                path: public_path(&rel_dir, &name),
                name,
                size_bytes: meta.len(),
            });
        }
        assets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(assets)
    }

    /// Move `name` out of `dir` into the trash folder.
    pub async fn delete(&self, dir: &Path, name: &str) -> Result<TrashEntry, AssetError> {
        validate_file_name(name)?;
        let rel_dir = sanitize_relative(dir)?;
        let full = self.root.join(&rel_dir);
        if !fs::try_exists(full.join(name)).await? {
            return Err(AssetError::NotFound(name.to_string()));
        }
        let mut archived = self
            .archive_matching(&full, |candidate| candidate == name, "verwijderd door beheerder")
            .await?;
        archived
            .pop()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    /// Read the recovery log for `dir`. A missing log is an empty trash.
    pub async fn list_trash(&self, dir: &Path) -> Result<Vec<TrashEntry>, AssetError> {
        let rel_dir = sanitize_relative(dir)?;
        read_log(&self.root.join(rel_dir).join(TRASH_DIR)).await
    }

    /// Permanently delete everything in the trash folder of `dir`.
    pub async fn purge_trash(&self, dir: &Path) -> Result<PurgeReport, AssetError> {
        let rel_dir = sanitize_relative(dir)?;
        let trash = self.root.join(rel_dir).join(TRASH_DIR);
        let mut report = PurgeReport::default();

        let mut entries = match fs::read_dir(&trash).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(report),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == TRASH_LOG {
                continue;
            }
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            match fs::remove_file(entry.path()).await {
                Ok(()) => {
                    report.files_deleted += 1;
                    report.bytes_reclaimed += meta.len();
                }
                Err(e) => report.errors.push(format!("{name}: {e}")),
            }
        }

        write_log(&trash, &[]).await?;
        Ok(report)
    }

    /// Remove a stored image by its public or root-relative path.
    ///
    /// Never fails: errors are logged and reported as `false`.
    pub async fn remove_best_effort(&self, stored_path: &str) -> bool {
        let relative = stored_path
            .strip_prefix(PUBLIC_PREFIX)
            .unwrap_or(stored_path)
            .trim_start_matches('/');
        let rel = match sanitize_relative(Path::new(relative)) {
            Ok(rel) if rel.as_os_str().is_empty() => return false,
            Ok(rel) => rel,
            Err(e) => {
                tracing::warn!(path = %stored_path, error = %e, "Refusing to remove image");
                return false;
            }
        };
        match fs::remove_file(self.root.join(&rel)).await {
            Ok(()) => {
                tracing::info!(path = %rel.display(), "Removed image file");
                true
            }
            Err(e) => {
                tracing::warn!(path = %rel.display(), error = %e, "Failed to remove image file");
                false
            }
        }
    }

    /// Archive every file in `dir` whose name satisfies `matches`.
    ///
    /// The trash log is read before anything moves, so an unreadable log
    /// fails the call with every file still in place. Files that cannot be
    /// moved are logged and skipped. If the updated log cannot be written,
    /// the moved files are put back.
    async fn archive_matching(
        &self,
        dir: &Path,
        matches: impl Fn(&str) -> bool,
        reason: &str,
    ) -> Result<Vec<TrashEntry>, AssetError> {
        let mut candidates = Vec::new();
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || !entry.file_type().await?.is_file() {
                continue;
            }
            if matches(&name) {
                candidates.push(name);
            }
        }
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let trash = dir.join(TRASH_DIR);
        let mut log = read_log(&trash).await?;
        fs::create_dir_all(&trash).await?;

        let now = chrono::Utc::now();
        let mut archived = Vec::new();
        for name in candidates {
            let archived_name = match free_archive_name(&trash, &name, now).await {
                Ok(archived_name) => archived_name,
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "No free archive name");
                    continue;
                }
            };
            match fs::rename(dir.join(&name), trash.join(&archived_name)).await {
                Ok(()) => archived.push(TrashEntry {
                    original_name: name,
                    archived_name,
                    reason: reason.to_string(),
                    archived_at: now,
                }),
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "Failed to archive file");
                }
            }
        }

        if archived.is_empty() {
            return Ok(archived);
        }
        log.extend(archived.iter().cloned());
        if let Err(e) = write_log(&trash, &log).await {
            for entry in &archived {
                let restored =
                    fs::rename(trash.join(&entry.archived_name), dir.join(&entry.original_name)).await;
                if let Err(undo) = restored {
                    tracing::warn!(
                        file = %entry.original_name,
                        archived = %entry.archived_name,
                        error = %undo,
                        "Failed to restore archived file",
                    );
                }
            }
            return Err(e);
        }
        Ok(archived)
    }
}

/// Reject names that could escape their directory or hide themselves.
pub fn validate_file_name(name: &str) -> Result<(), AssetError> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.contains('\0');
    if bad {
        Err(AssetError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Keep only normal components of a relative directory path.
fn sanitize_relative(path: &Path) -> Result<PathBuf, AssetError> {
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return Err(AssetError::InvalidName(path.display().to_string())),
        }
    }
    Ok(clean)
}

/// Split `name` into stem and optional extension.
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

fn public_path(rel_dir: &Path, name: &str) -> String {
    let mut path = PUBLIC_PREFIX.trim_end_matches('/').to_string();
    for part in rel_dir.iter() {
        path.push('/');
        path.push_str(&part.to_string_lossy());
    }
    path.push('/');
    path.push_str(name);
    path
}

/// `<stem>-archived-<millis>[-n].<ext>`, unique within the trash folder.
async fn free_archive_name(trash: &Path, name: &str, now: Timestamp) -> Result<String, AssetError> {
    let (stem, ext) = split_name(name);
    let base = format!("{stem}-archived-{}", now.timestamp_millis());
    let mut counter = 0u32;
    loop {
        let candidate = match (counter, ext) {
            (0, Some(ext)) => format!("{base}.{ext}"),
            (0, None) => base.clone(),
            (n, Some(ext)) => format!("{base}-{n}.{ext}"),
            (n, None) => format!("{base}-{n}"),
        };
        if !fs::try_exists(trash.join(&candidate)).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

async fn read_log(trash: &Path) -> Result<Vec<TrashEntry>, AssetError> {
    match fs::read(trash.join(TRASH_LOG)).await {
        Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

async fn write_log(trash: &Path, entries: &[TrashEntry]) -> Result<(), AssetError> {
    fs::create_dir_all(trash).await?;
    let json = serde_json::to_vec_pretty(entries)?;
    fs::write(trash.join(TRASH_LOG), json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn target(dir: &str, name: &str) -> UploadTarget {
        UploadTarget {
            dir: PathBuf::from(dir),
            file_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn store_writes_clean_name() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path());

        let stored = store.store(&target("logos", "logo.png"), b"one").await.unwrap();

        assert_eq!(stored.file_name, "logo.png");
        assert_eq!(stored.path, "/images/logos/logo.png");
        assert!(stored.archived.is_empty());
        let on_disk = fs::read(tmp.path().join("logos/logo.png")).await.unwrap();
        assert_eq!(on_disk, b"one");
    }

    #[tokio::test]
    async fn collision_archives_previous_file_with_any_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path());
        store.store(&target("logos", "logo.png"), b"old png").await.unwrap();
        fs::write(tmp.path().join("logos/logo.svg"), b"old svg").await.unwrap();
        fs::write(tmp.path().join("logos/other.png"), b"keep").await.unwrap();

        let stored = store.store(&target("logos", "logo.jpg"), b"new").await.unwrap();

        assert_eq!(stored.file_name, "logo.jpg");
        assert_eq!(stored.archived.len(), 2);
        assert!(fs::try_exists(tmp.path().join("logos/other.png")).await.unwrap());
        assert!(!fs::try_exists(tmp.path().join("logos/logo.png")).await.unwrap());

        // Every overwritten file is recoverable from the trash log.
        let log = store.list_trash(Path::new("logos")).await.unwrap();
        assert_eq!(log.len(), 2);
        for entry in &log {
            assert!(entry.archived_name.contains("-archived-"));
            let archived = tmp.path().join("logos").join(TRASH_DIR).join(&entry.archived_name);
            let bytes = fs::read(archived).await.unwrap();
            match entry.original_name.as_str() {
                "logo.png" => assert_eq!(bytes, b"old png"),
                "logo.svg" => assert_eq!(bytes, b"old svg"),
                other => panic!("unexpected archived file {other}"),
            }
        }
    }

    #[tokio::test]
    async fn repeated_uploads_accumulate_log_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path());
        for body in [b"a", b"b", b"c"] {
            store.store(&target("social", "share.png"), body).await.unwrap();
        }
        let log = store.list_trash(Path::new("social")).await.unwrap();
        assert_eq!(log.len(), 2);
        let names: std::collections::HashSet<_> = log.iter().map(|e| &e.archived_name).collect();
        assert_eq!(names.len(), 2, "archived names must be unique");
    }

    #[tokio::test]
    async fn corrupt_log_leaves_existing_file_in_place() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path());
        store.store(&target("logos", "logo.png"), b"original").await.unwrap();
        let trash = tmp.path().join("logos").join(TRASH_DIR);
        fs::create_dir_all(&trash).await.unwrap();
        fs::write(trash.join(TRASH_LOG), b"{not json").await.unwrap();

        assert_matches!(
            store.store(&target("logos", "logo.png"), b"replacement").await,
            Err(AssetError::CorruptLog(_))
        );

        let on_disk = fs::read(tmp.path().join("logos/logo.png")).await.unwrap();
        assert_eq!(on_disk, b"original");
        let names: Vec<String> = store
            .list(Path::new("logos"))
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["logo.png"], "no pending upload may be left behind");

        let mut trashed = fs::read_dir(&trash).await.unwrap();
        let mut trash_names = Vec::new();
        while let Some(entry) = trashed.next_entry().await.unwrap() {
            trash_names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(trash_names, vec![TRASH_LOG.to_string()]);
        assert_eq!(fs::read(trash.join(TRASH_LOG)).await.unwrap(), b"{not json");
    }

    #[tokio::test]
    async fn delete_with_corrupt_log_keeps_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path());
        store.store(&target("favicons", "favicon.ico"), b"1").await.unwrap();
        let trash = tmp.path().join("favicons").join(TRASH_DIR);
        fs::create_dir_all(&trash).await.unwrap();
        fs::write(trash.join(TRASH_LOG), b"[{").await.unwrap();

        assert_matches!(
            store.delete(Path::new("favicons"), "favicon.ico").await,
            Err(AssetError::CorruptLog(_))
        );
        assert!(fs::try_exists(tmp.path().join("favicons/favicon.ico")).await.unwrap());
    }

    #[tokio::test]
    async fn list_skips_hidden_trash() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path());
        store.store(&target("favicons", "favicon.ico"), b"1").await.unwrap();
        store.store(&target("favicons", "favicon.png"), b"2").await.unwrap();

        let listed = store.list(Path::new("favicons")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "favicon.png");
        assert!(store.list(Path::new("missing")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_moves_file_to_trash() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path());
        store.store(&target("backgrounds", "hero.jpg"), b"x").await.unwrap();

        let entry = store.delete(Path::new("backgrounds"), "hero.jpg").await.unwrap();
        assert_eq!(entry.original_name, "hero.jpg");
        assert!(store.list(Path::new("backgrounds")).await.unwrap().is_empty());

        assert_matches!(
            store.delete(Path::new("backgrounds"), "hero.jpg").await,
            Err(AssetError::NotFound(_))
        );
    }

    #[tokio::test]
    async fn purge_empties_trash_and_log() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path());
        store.store(&target("logos", "logo.png"), b"1234").await.unwrap();
        store.store(&target("logos", "logo.png"), b"5678").await.unwrap();

        let report = store.purge_trash(Path::new("logos")).await.unwrap();
        assert_eq!(report.files_deleted, 1);
        assert_eq!(report.bytes_reclaimed, 4);
        assert!(store.list_trash(Path::new("logos")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_best_effort_never_escapes_root() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path());
        store.store(&target("guides", "tatra.jpg"), b"x").await.unwrap();

        assert!(store.remove_best_effort("/images/guides/tatra.jpg").await);
        assert!(!store.remove_best_effort("/images/guides/tatra.jpg").await);
        assert!(!store.remove_best_effort("/images/../etc/passwd").await);
    }

    #[test]
    fn rejects_traversal_names() {
        assert!(validate_file_name("../x.png").is_err());
        assert!(validate_file_name(".hidden").is_err());
        assert!(validate_file_name("a/b.png").is_err());
        assert!(validate_file_name("ok.png").is_ok());
    }
}
