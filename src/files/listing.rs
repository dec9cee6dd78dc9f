use super::classify::FileKind;
use serde::Serialize;
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tokio::fs;
use tracing::{error, warn};

#[derive(Serialize, Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub size_formatted: String,
    /// Seconds since the Unix epoch, fractional.
    pub modified: f64,
    pub icon: &'static str,
    pub kind: FileKind,
}

/// Human-readable size: whole bytes below 1 KB, otherwise one decimal place
/// in base-1024 units up to TB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    for unit in ["KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}

/// Lists the regular, non-hidden files directly inside `dir`, newest first.
///
/// A directory that cannot be read yields an empty list.
pub async fn list_files(dir: &Path) -> Vec<FileEntry> {
    match read_entries(dir).await {
        Ok(mut files) => {
            files.sort_by(|a, b| b.modified.total_cmp(&a.modified));
            files
        }
        Err(e) => {
            error!("Error listing files in {}: {}", dir.display(), e);
            Vec::new()
        }
    }
}

async fn read_entries(dir: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => {
                warn!("Skipping entry with non-UTF8 filename in {}", dir.display());
                continue;
            }
        };

        if name.starts_with('.') {
            continue;
        }

        // Follows symlinks: a link to a file is listed, a link to a directory is not.
        let metadata = match fs::metadata(entry.path()).await {
            Ok(meta) => meta,
            Err(e) => {
                warn!("Failed to get metadata for {}: {}", name, e);
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or(0.0, |d| d.as_secs_f64());
        let kind = FileKind::from_filename(&name);

        files.push(FileEntry {
            size: metadata.len(),
            size_formatted: format_file_size(metadata.len()),
            modified,
            icon: kind.glyph(),
            kind,
            name,
        });
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use std::time::{Duration, SystemTime};

    #[test]
    fn test_format_file_size() {
        let cases = vec![
            (0, "0 B"),
            (500, "500 B"),
            (1023, "1023 B"),
            (1024, "1.0 KB"),
            (2048, "2.0 KB"),
            (1536, "1.5 KB"),
            (5 * 1024 * 1024, "5.0 MB"),
            (3 * 1024 * 1024 * 1024, "3.0 GB"),
            (2 * 1024 * 1024 * 1024 * 1024, "2.0 TB"),
            (4096 * 1024 * 1024 * 1024 * 1024, "4096.0 TB"),
        ];

        for (bytes, expected) in cases {
            assert_eq!(format_file_size(bytes), expected, "Failed for {} bytes", bytes);
        }
    }

    #[tokio::test]
    async fn test_empty_directory_lists_nothing() {
        let dir = tempdir().unwrap();
        assert!(list_files(dir.path()).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_lists_nothing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(list_files(&missing).await.is_empty());
    }

    #[tokio::test]
    async fn test_skips_hidden_files_and_directories() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(".DS_Store"), b"junk").unwrap();
        std::fs::write(dir.path().join("visible.txt"), b"hello").unwrap();
        std::fs::create_dir(dir.path().join("Folder")).unwrap();

        let files = list_files(dir.path()).await;
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "visible.txt");
        assert_eq!(files[0].size, 5);
        assert_eq!(files[0].size_formatted, "5 B");
        assert_eq!(files[0].kind, FileKind::Text);
        assert_eq!(files[0].icon, "📝");
    }

    #[tokio::test]
    async fn test_sorted_newest_first() {
        let dir = tempdir().unwrap();
        let now = SystemTime::now();
        for (name, age) in [("old.pdf", 300), ("new.pdf", 10), ("mid.pdf", 100)] {
            std::fs::write(dir.path().join(name), b"%PDF").unwrap();
            let file = std::fs::File::options()
                .write(true)
                .open(dir.path().join(name))
                .unwrap();
            file.set_modified(now - Duration::from_secs(age)).unwrap();
        }

        let names: Vec<String> = list_files(dir.path())
            .await
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["new.pdf", "mid.pdf", "old.pdf"]);
    }
}
