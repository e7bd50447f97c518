//! Filename sanitization for exported notes.

/// Filename used when a title is absent or blank.
pub const UNTITLED: &str = "Untitled";

/// A filesystem-safe name derived from a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedName {
    pub filename: String,
    /// True if `filename` differs from the title it was derived from.
    pub was_modified: bool,
}

impl SanitizedName {
    /// Returns the original title to keep as an alias, if any.
    ///
    /// An alias is only kept when sanitizing changed the title and the
    /// original had content worth preserving.
    pub fn alias<'a>(&self, original: Option<&'a str>) -> Option<&'a str> {
        if !self.was_modified {
            return None;
        }
        original.filter(|title| !title.trim().is_empty())
    }
}

/// Maps a title to a filename.
///
/// - Absent, empty or whitespace-only titles become `"Untitled"`
/// - Every `/` is replaced with `_`
/// - Leading and trailing whitespace is trimmed
///
/// Operates on a bare name only; it does not defend against other kinds of
/// path traversal.
///
/// # Examples
///
/// ```
/// use vaultport::infra::sanitize;
///
/// let name = sanitize(Some("Meeting/Notes"));
/// assert_eq!(name.filename, "Meeting_Notes");
/// assert!(name.was_modified);
///
/// assert_eq!(sanitize(None).filename, "Untitled");
/// ```
pub fn sanitize(title: Option<&str>) -> SanitizedName {
    let original = title.unwrap_or_default();
    let replaced = original.replace('/', "_");
    let trimmed = replaced.trim();

    let filename = if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    };

    SanitizedName {
        was_modified: title != Some(filename.as_str()),
        filename,
    }
}

/// Sanitizes a notebook title into a single directory segment.
///
/// `.` and `..` have every dot replaced with `_` so the segment always names
/// a child directory.
pub fn sanitize_segment(title: &str) -> String {
    let filename = sanitize(Some(title)).filename;
    match filename.as_str() {
        "." | ".." => filename.replace('.', "_"),
        _ => filename,
    }
}
