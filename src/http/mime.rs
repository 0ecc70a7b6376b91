//! Content-type classification by file extension.

use std::collections::HashMap;
use std::path::Path;

/// Content type returned for any extension missing from the table.
pub const OCTET_STREAM: &str = "application/octet-stream";

static BUILTIN_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".htm", "text/html"),
    (".css", "text/css"),
    (".js", "text/javascript"),
    (".json", "application/json"),
    (".txt", "text/plain"),
    (".log", "text/plain"),
    (".csv", "text/csv"),
    (".xml", "application/xml"),
    (".svg", "image/svg+xml"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".bmp", "image/bmp"),
    (".ico", "image/x-icon"),
    (".webp", "image/webp"),
    (".mp4", "video/mp4"),
    (".webm", "video/webm"),
    (".mp3", "audio/mpeg"),
    (".wav", "audio/wav"),
    (".pdf", "application/pdf"),
    (".zip", "application/zip"),
    (".tar", "application/x-tar"),
    (".gz", "application/gzip"),
    (".woff", "font/woff"),
    (".woff2", "font/woff2"),
    (".wasm", "application/wasm"),
];

/// Extension → content-type lookup table.
///
/// Keys are stored lowercase with a leading dot. Lookups are
/// case-insensitive and accept the extension with or without the dot, so
/// `.JPG`, `jpg` and `.jpg` all classify the same way.
#[derive(Debug, Clone)]
pub struct MimeTable {
    entries: HashMap<String, String>,
}

impl MimeTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        let entries = BUILTIN_TYPES
            .iter()
            .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
            .collect();

        Self { entries }
    }

    /// Built-in table with `overrides` merged over it.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::builtin();
        for (ext, mime) in overrides {
            let key = normalize_extension(ext.as_ref());
            if key.len() > 1 {
                table.entries.insert(key, mime.into());
            }
        }
        table
    }

    /// Returns the content type for `extension`, falling back to
    /// [`OCTET_STREAM`].
    pub fn classify(&self, extension: &str) -> &str {
        if extension.is_empty() {
            return OCTET_STREAM;
        }

        self.entries
            .get(&normalize_extension(extension))
            .map(String::as_str)
            .unwrap_or(OCTET_STREAM)
    }

    /// Classifies a file by the extension of its final component.
    pub fn classify_path(&self, path: &Path) -> &str {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.classify(ext),
            None => OCTET_STREAM,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_extension(ext: &str) -> String {
    let lower = ext.trim().to_ascii_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}
