//! The file-kind oracle: filename extension to MIME type and icon.
//!
//! The document store keeps no content-type metadata of its own; the
//! extension after the last `.` of the display name decides everything —
//! the upload allow-list, the `Accept` header on downloads, how the
//! downloaded body is packaged, and the icon shown next to a listing
//! entry. This module is the single mapping consumed by all of them.

/// Extensions accepted for upload, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 7] = ["docx", "pdf", "jpg", "png", "jpeg", "txt", "xlsx"];

/// Extract the extension of a file name: the substring after the last `.`,
/// lowercased. Returns `None` when there is no dot, or the dot is the last
/// character.
pub fn extension(file_name: &str) -> Option<String> {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext.to_lowercase()),
        _ => None,
    }
}

/// Whether a file name's extension is in the upload allow-list
/// (case-insensitive).
pub fn extension_allowed(file_name: &str) -> bool {
    extension(file_name).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Content category inferred from a file name's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Xlsx,
    Txt,
    /// Both `jpg` and `jpeg` extensions.
    Jpeg,
    Png,
    /// Anything unrecognized, including names without an extension.
    Other,
}

impl FileKind {
    /// Infer the kind from a file name (extension after the last `.`,
    /// case-insensitive).
    pub fn from_file_name(file_name: &str) -> Self {
        match extension(file_name).as_deref() {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::Docx,
            Some("xlsx") => Self::Xlsx,
            Some("txt") => Self::Txt,
            Some("jpg" | "jpeg") => Self::Jpeg,
            Some("png") => Self::Png,
            _ => Self::Other,
        }
    }

    /// MIME type for this kind.
    ///
    /// `image/jpg` is what the deployed endpoint expects for JPEG content;
    /// it is intentionally not the registered `image/jpeg`.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Txt => "text/plain",
            Self::Jpeg => "image/jpg",
            Self::Png => "image/png",
            Self::Other => "application/octet-stream",
        }
    }

    /// Display icon tag for this kind (Material icon names).
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pdf => "description",
            Self::Docx => "article",
            Self::Xlsx => "table_chart",
            Self::Txt => "text_snippet",
            Self::Jpeg | Self::Png => "image",
            Self::Other => "insert_drive_file",
        }
    }

    /// Whether downloads of this kind arrive as a JSON envelope with
    /// base64 content rather than a raw binary body.
    ///
    /// The backing store returns text files JSON-wrapped; every other
    /// kind comes back as raw bytes. The bifurcation is part of the
    /// external API contract.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Txt)
    }
}
