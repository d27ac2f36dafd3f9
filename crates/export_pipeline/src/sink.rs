//! Download sinks
//!
//! Where finished exports go. A sink either stores the whole file or
//! nothing: no partial artifact survives a failed save.

use crate::format::ExportFormat;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, SinkError>;

/// A finished export ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    pub fn new(file_name: impl Into<String>, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            bytes,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Where a saved export ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub file_name: String,
    /// Filesystem path, when the sink writes to disk
    pub path: Option<PathBuf>,
    pub size: u64,
}

/// Destination for finished exports
#[trait_variant::make(Send)]
pub trait DownloadSink: Send + Sync {
    async fn save(&self, file: ExportedFile) -> Result<SavedFile>;
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0'])
        || Path::new(name).components().count() != 1;
    if invalid {
        Err(SinkError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Writes exports into a directory.
///
/// Each save writes its own uniquely named `.<name>.*.part` file and
/// renames it into place once complete, so readers never observe a
/// truncated file and concurrent saves of one name never share a temp file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    async fn save(&self, file: ExportedFile) -> Result<SavedFile> {
        validate_name(&file.file_name)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let target = self.dir.join(&file.file_name);
        let size = file.bytes.len() as u64;
        let dir = self.dir.clone();
        let destination = target.clone();
        let prefix = format!(".{}.", file.file_name);
        let bytes = file.bytes;

        // The temp file deletes itself unless persisted
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut partial = tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(".part")
                .tempfile_in(&dir)?;
            partial.write_all(&bytes)?;
            partial.persist(&destination).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(std::io::Error::other)??;

        tracing::debug!(path = %target.display(), size, "Export saved");
        Ok(SavedFile {
            file_name: file.file_name,
            path: Some(target),
            size,
        })
    }
}

/// Keeps exports in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<ExportedFile>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn files(&self) -> Vec<ExportedFile> {
        self.files.lock().await.clone()
    }

    pub async fn take(&self) -> Vec<ExportedFile> {
        std::mem::take(&mut *self.files.lock().await)
    }
}

impl DownloadSink for MemorySink {
    async fn save(&self, file: ExportedFile) -> Result<SavedFile> {
        validate_name(&file.file_name)?;
        let saved = SavedFile {
            file_name: file.file_name.clone(),
            path: None,
            size: file.bytes.len() as u64,
        };
        self.files.lock().await.push(file);
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> ExportedFile {
        ExportedFile::new(name, ExportFormat::Txt, b"{}".to_vec())
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("exports"));

        let saved = sink.save(file("Alex_Lee_2024-01-15.txt")).await.unwrap();
        let path = saved.path.unwrap();
        assert_eq!(path, dir.path().join("exports/Alex_Lee_2024-01-15.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
        assert_eq!(saved.size, 2);

        assert_eq!(
            entries(&dir.path().join("exports")),
            vec!["Alex_Lee_2024-01-15.txt".to_string()]
        );
    }

    #[tokio::test]
    async fn test_directory_sink_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        for name in ["../evil.txt", "a/b.txt", "", ".hidden"] {
            assert!(matches!(
                sink.save(file(name)).await,
                Err(SinkError::InvalidName(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_failed_save_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // A directory occupying the target name makes the rename fail
        std::fs::create_dir(dir.path().join("Resume.txt")).unwrap();
        std::fs::write(dir.path().join("Resume.txt/keep"), b"x").unwrap();

        let sink = DirectorySink::new(dir.path());
        assert!(sink.save(file("Resume.txt")).await.is_err());
        assert_eq!(entries(dir.path()), vec!["Resume.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_saves_of_one_name() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        let first = vec![b'a'; 256 * 1024];
        let second = vec![b'b'; 128 * 1024];

        let (a, b) = tokio::join!(
            sink.save(ExportedFile::new("Resume.txt", ExportFormat::Txt, first.clone())),
            sink.save(ExportedFile::new("Resume.txt", ExportFormat::Txt, second.clone())),
        );
        a.unwrap();
        b.unwrap();

        let saved = std::fs::read(dir.path().join("Resume.txt")).unwrap();
        assert!(saved == first || saved == second);
        assert_eq!(entries(dir.path()), vec!["Resume.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_memory_sink() {
        let sink = MemorySink::new();
        let saved = sink.save(file("a.txt")).await.unwrap();
        assert!(saved.path.is_none());
        assert_eq!(sink.files().await.len(), 1);
        assert_eq!(sink.take().await[0].file_name, "a.txt");
        assert!(sink.files().await.is_empty());
    }
}
