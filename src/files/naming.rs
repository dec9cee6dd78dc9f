use chrono::Local;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};

/// Prefix for uploads that arrive without an `X-Filename` header.
const FALLBACK_PREFIX: &str = "phone_file";

/// A destination file that has been created and is ready to receive bytes.
#[derive(Debug)]
pub struct ClaimedFile {
    pub filename: String,
    pub path: PathBuf,
    pub file: File,
}

/// Decodes a client-supplied (percent-encoded) name and reduces it to its
/// final path component. Returns `None` when nothing usable remains.
/// Bytes that do not decode as UTF-8 become U+FFFD.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode_binary(raw.as_bytes());
    base_name(&String::from_utf8_lossy(&decoded))
}

/// Final component of a client-supplied name. Both `/` and `\` count as
/// separators so that a Windows-style path cannot smuggle in directories.
fn base_name(name: &str) -> Option<String> {
    last_component(name, |c| c == '/' || c == '\\')
}

/// Final component of a name that refers to a file on this host. Only the
/// host's own separators split, so `a\b.txt` on Unix is a single name.
pub fn local_base_name(name: &str) -> Option<String> {
    last_component(name, std::path::is_separator)
}

fn last_component(name: &str, is_separator: impl Fn(char) -> bool) -> Option<String> {
    let last = name.rsplit(is_separator).next().unwrap_or("");
    match last {
        "" | "." | ".." => None,
        other => Some(other.to_string()),
    }
}

/// `phone_file_YYYYMMDD_HHMMSS` in local time.
pub fn fallback_name() -> String {
    format!("{}_{}", FALLBACK_PREFIX, Local::now().format("%Y%m%d_%H%M%S"))
}

/// Splits `name` into stem and extension (extension keeps its dot). Leading
/// dots belong to the stem, so `.bashrc` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(idx) => name.split_at(leading + idx),
        None => (name, ""),
    }
}

/// Creates `filename` inside `dir`, or `stem_1.ext`, `stem_2.ext`, ... when
/// the name is taken. Existing files are never opened for writing.
///
/// Each candidate is claimed with create-new semantics, so a concurrent
/// writer that grabs the same name just pushes us to the next suffix.
/// The probe has no upper bound.
pub async fn claim_unique(dir: &Path, filename: &str) -> io::Result<ClaimedFile> {
    let (stem, ext) = split_extension(filename);
    let mut candidate = filename.to_string();
    let mut counter: u64 = 1;

    loop {
        let path = dir.join(&candidate);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => {
                return Ok(ClaimedFile {
                    filename: candidate,
                    path,
                    file,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                candidate = format!("{}_{}{}", stem, counter, ext);
                counter += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_filename() {
        let cases = vec![
            ("report.pdf", Some("report.pdf")),
            ("my%20notes.txt", Some("my notes.txt")),
            ("../../etc/passwd", Some("passwd")),
            ("..%2F..%2Fetc%2Fpasswd", Some("passwd")),
            ("C:\\Users\\me\\photo.jpg", Some("photo.jpg")),
            ("%E5%86%99%E7%9C%9F.png", Some("写真.png")),
            ("dir/", None),
            ("..", None),
            ("", None),
            ("bad%FF.bin", Some("bad\u{FFFD}.bin")),
        ];

        for (input, expected) in cases {
            assert_eq!(
                sanitize_filename(input).as_deref(),
                expected,
                "Failed for input: {}",
                input
            );
        }
    }

    #[test]
    fn test_local_base_name() {
        assert_eq!(local_base_name("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(local_base_name("notes.txt").as_deref(), Some("notes.txt"));
        assert_eq!(local_base_name("..").as_deref(), None);
        assert_eq!(local_base_name("dir/").as_deref(), None);
        if cfg!(windows) {
            assert_eq!(local_base_name("a\\b.txt").as_deref(), Some("b.txt"));
        } else {
            assert_eq!(local_base_name("a\\b.txt").as_deref(), Some("a\\b.txt"));
        }
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("a.txt"), ("a", ".txt"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
        assert_eq!(split_extension("..hidden.txt"), ("..hidden", ".txt"));
    }

    #[test]
    fn test_fallback_name_shape() {
        let name = fallback_name();
        let stamp = name.strip_prefix("phone_file_").unwrap();
        assert_eq!(stamp.len(), "20240101_120000".len());
        assert_eq!(stamp.as_bytes()[8], b'_');
    }

    #[tokio::test]
    async fn test_claim_unique_free_name() {
        let dir = tempdir().unwrap();
        let claimed = claim_unique(dir.path(), "a.txt").await.unwrap();
        assert_eq!(claimed.filename, "a.txt");
        assert_eq!(claimed.path, dir.path().join("a.txt"));
    }

    #[tokio::test]
    async fn test_claim_unique_skips_taken_names() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"original").unwrap();
        for n in 1..4 {
            std::fs::write(dir.path().join(format!("a_{}.txt", n)), b"older copy").unwrap();
        }

        let claimed = claim_unique(dir.path(), "a.txt").await.unwrap();
        assert_eq!(claimed.filename, "a_4.txt");
        assert_eq!(std::fs::read(dir.path().join("a.txt")).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_claim_unique_without_extension() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("notes"), b"x").unwrap();
        let claimed = claim_unique(dir.path(), "notes").await.unwrap();
        assert_eq!(claimed.filename, "notes_1");
    }

    #[tokio::test]
    async fn test_claim_unique_treats_directories_as_taken() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("photos.zip")).unwrap();
        let claimed = claim_unique(dir.path(), "photos.zip").await.unwrap();
        assert_eq!(claimed.filename, "photos_1.zip");
    }
}
