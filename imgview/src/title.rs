use std::path::Path;

/// Longest window title, in bytes.
pub const MAX_TITLE_BYTES: usize = 255;

/// Window title for `path`: `prefix` followed by the path, cut to
/// [`MAX_TITLE_BYTES`] on a character boundary.
pub fn window_title(prefix: &str, path: &Path) -> String {
    let mut title = format!("{}{}", prefix, path.display());
    if title.len() > MAX_TITLE_BYTES {
        let mut end = MAX_TITLE_BYTES;
        while !title.is_char_boundary(end) {
            end -= 1;
        }
        title.truncate(end);
    }
    title
}
