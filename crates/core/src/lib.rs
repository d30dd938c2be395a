pub mod document;
pub mod filekind;
pub mod format;

pub use document::{
    DEFAULT_SORT_DIRECTION, DEFAULT_SORT_FIELD, DocumentItem, SortDirection, SortField,
    sort_documents, sort_indicator,
};
pub use filekind::{ALLOWED_EXTENSIONS, FileKind, extension, extension_allowed};
pub use format::format_size;
