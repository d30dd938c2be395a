//! Document metadata and list ordering.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one stored document.
///
/// Instances are only ever built from the store's list response; the
/// client never mints its own. `key` is the opaque handle used to fetch
/// content, and the extension of `file_name` drives all content-type
/// inference (see [`crate::filekind`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentItem {
    /// Opaque stable identifier addressing the content.
    pub key: String,
    /// Display name, including the extension used for type inference.
    pub file_name: String,
    /// Byte length.
    pub size: u64,
    /// Timestamp of last write.
    pub last_modified: DateTime<Utc>,
}

/// Field a document listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    FileName,
    Size,
    LastModified,
}

/// Listing order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Newly loaded listings are shown most recently modified first.
pub const DEFAULT_SORT_FIELD: SortField = SortField::LastModified;
pub const DEFAULT_SORT_DIRECTION: SortDirection = SortDirection::Desc;

/// Case-folded file name comparison.
///
/// Rust-native stand-in for the locale-aware lexical comparison the
/// listing uses for string fields.
fn cmp_file_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable-sort documents by `field` in `direction`.
///
/// There is no secondary tie-break key: items whose primary keys compare
/// equal keep their prior relative order in either direction.
pub fn sort_documents(documents: &mut [DocumentItem], field: SortField, direction: SortDirection) {
    documents.sort_by(|a, b| {
        let ordering = match field {
            SortField::FileName => cmp_file_names(&a.file_name, &b.file_name),
            SortField::Size => a.size.cmp(&b.size),
            SortField::LastModified => a.last_modified.cmp(&b.last_modified),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Glyph marking the active sort column: `↑` ascending, `↓` descending,
/// empty for inactive columns.
pub fn sort_indicator(
    column: SortField,
    active_field: SortField,
    direction: SortDirection,
) -> &'static str {
    if column != active_field {
        return "";
    }
    match direction {
        SortDirection::Asc => "↑",
        SortDirection::Desc => "↓",
    }
}
