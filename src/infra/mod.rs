//! Front matter rendering, filename sanitization and file I/O

mod frontmatter;
mod fs;
mod sanitize;

pub use frontmatter::{DELIMITER, FieldValue, FrontMatter, format_timestamp};
pub use fs::{FsError, copy_atomic, ensure_dir, write_atomic};
pub use sanitize::{SanitizedName, UNTITLED, sanitize, sanitize_segment};
