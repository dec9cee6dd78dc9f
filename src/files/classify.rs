use serde::Serialize;

/// Display category of a file, used by the UI to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Pdf,
    Spreadsheet,
    Word,
    Markdown,
    Text,
    Document,
    Archive,
    Code,
    InProgress,
    Other,
}

impl FileKind {
    /// Classifies by the text after the last dot of `filename`, ignoring case.
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        Self::from_extension(&ext)
    }

    /// `ext` must already be lowercase and without the dot.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "svg" | "bmp" | "ico" | "heic" => {
                FileKind::Image
            }
            "mp4" | "mov" | "avi" | "mkv" | "webm" | "m4v" => FileKind::Video,
            "mp3" | "wav" | "flac" | "aac" | "m4a" | "ogg" => FileKind::Audio,
            "pdf" => FileKind::Pdf,
            "csv" | "xlsx" | "xls" => FileKind::Spreadsheet,
            "doc" | "docx" => FileKind::Word,
            "md" => FileKind::Markdown,
            "txt" => FileKind::Text,
            "rtf" | "odt" => FileKind::Document,
            "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" => FileKind::Archive,
            "py" | "js" | "ts" | "tsx" | "jsx" | "html" | "css" | "json" | "xml" | "yaml"
            | "yml" | "sh" | "bat" | "java" | "c" | "cpp" | "h" | "hpp" | "go" | "rs" | "rb"
            | "php" | "sql" | "swift" | "kt" | "kts" | "toml" | "ini" | "conf" | "vue"
            | "svelte" | "scss" | "sass" | "less" | "r" | "lua" | "pl" | "pm" | "ps1"
            | "psm1" | "dockerfile" | "makefile" => FileKind::Code,
            "part" | "crdownload" | "tmp" | "download" | "partial" => FileKind::InProgress,
            _ => FileKind::Other,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            FileKind::Image => "🖼️",
            FileKind::Video => "🎬",
            FileKind::Audio => "🎵",
            FileKind::Pdf => "📄",
            FileKind::Spreadsheet => "📊",
            FileKind::Word => "📘",
            FileKind::Markdown => "📋",
            FileKind::Text | FileKind::Document => "📝",
            FileKind::Archive => "📦",
            FileKind::Code => "💻",
            FileKind::InProgress => "⏳",
            FileKind::Other => "📄",
        }
    }
}
