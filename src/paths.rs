//! Slash-agnostic path mapping between the three parallel suite roots.
//!
//! Suite trees are addressed by three sibling directories (source,
//! expected-output, generated-output) whose relative layouts correspond 1:1.
//! All functions here work on the path *string*, honoring whichever separator
//! convention the string itself uses, so a suite checked out on Windows maps
//! the same way as one on Unix. `std::path` normalization is deliberately not
//! used: these paths travel through compiler error messages and config files
//! verbatim, and mapping must not rewrite their separators.

/// Returns the separator character actually used in `path`, `/` when the
/// string contains no separator at all.
pub fn separator(path: &str) -> char {
    path.chars().find(|c| *c == '/' || *c == '\\').unwrap_or('/')
}

/// The final path segment.
pub fn file_name(path: &str) -> &str {
    let sep = separator(path);
    path.rsplit(sep).next().unwrap_or(path)
}

/// The file name with its last extension removed. `a.spec.scss` -> `a.spec`.
pub fn file_stem(path: &str) -> String {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[..idx].to_string(),
        _ => name.to_string(),
    }
}

/// The last extension of the file name, without the dot. Empty if none.
pub fn file_extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx + 1..],
        _ => "",
    }
}

/// The path without its file name and without a trailing separator.
pub fn parent(path: &str) -> String {
    let sep = separator(path);
    match path.rfind(sep) {
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}

/// The directory segment between the pivot directory and the file name.
///
/// Empty string (no stray separator) for a file directly inside the pivot;
/// otherwise the relative directory followed by the path's own separator, so
/// callers can concatenate `root + sep + relative_dir + stem + ext` without
/// doubling separators in either case.
pub fn relative_dir(path: &str, pivot: &str) -> String {
    let sep = separator(path);
    let marker = format!("{sep}{pivot}{sep}");
    let after_pivot = match path.rfind(&marker) {
        Some(idx) => &path[idx + marker.len()..],
        None => {
            // Relative path starting with the pivot itself.
            let prefix = format!("{pivot}{sep}");
            match path.strip_prefix(&prefix) {
                Some(rest) => rest,
                None => path,
            }
        }
    };
    let dir = parent(after_pivot);
    if dir.is_empty() {
        String::new()
    } else {
        format!("{dir}{sep}")
    }
}

/// Maps `path` onto the sibling root `to_dir` by substituting the delimited
/// `from_dir` segment. Idempotent: once the segment is gone a second
/// application returns the path unchanged.
pub fn rebase(path: &str, from_dir: &str, to_dir: &str) -> String {
    let sep = separator(path);
    let from_marker = format!("{sep}{from_dir}{sep}");
    let to_marker = format!("{sep}{to_dir}{sep}");
    if let Some(idx) = path.find(&from_marker) {
        let mut out = String::with_capacity(path.len());
        out.push_str(&path[..idx]);
        out.push_str(&to_marker);
        out.push_str(&path[idx + from_marker.len()..]);
        return out;
    }
    // Relative path starting with the root segment itself.
    let prefix = format!("{from_dir}{sep}");
    if let Some(rest) = path.strip_prefix(&prefix) {
        return format!("{to_dir}{sep}{rest}");
    }
    path.to_string()
}

/// Replaces the file name's last extension with `new_ext` (no dot).
pub fn swap_extension(path: &str, new_ext: &str) -> String {
    let ext = file_extension(path);
    if ext.is_empty() {
        return format!("{path}.{new_ext}");
    }
    let cut = path.len() - ext.len();
    format!("{}{}", &path[..cut], new_ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_both_separator_conventions() {
        assert_eq!(separator("test/sass/input/a.scss"), '/');
        assert_eq!(separator("test\\sass\\input\\a.scss"), '\\');
        assert_eq!(separator("a.scss"), '/');
    }

    #[test]
    fn stem_and_extension() {
        assert_eq!(file_stem("test/sass/input/buttons.scss"), "buttons");
        assert_eq!(file_extension("test/sass/input/buttons.scss"), "scss");
        assert_eq!(file_stem("test/sass/input/a.spec.sass"), "a.spec");
        assert_eq!(file_extension("test/sass/input/a.spec.sass"), "sass");
    }

    #[test]
    fn parent_strips_trailing_separator() {
        assert_eq!(parent("test/sass/input/a.scss"), "test/sass/input");
        assert_eq!(parent("a.scss"), "");
    }

    #[test]
    fn relative_dir_at_pivot_root_is_empty() {
        assert_eq!(relative_dir("test/sass/input/a.scss", "input"), "");
    }

    #[test]
    fn relative_dir_nested_keeps_trailing_separator() {
        assert_eq!(
            relative_dir("test/sass/input/forms/radio/a.scss", "input"),
            "forms/radio/"
        );
        assert_eq!(
            relative_dir("test\\sass\\input\\forms\\a.scss", "input"),
            "forms\\"
        );
    }

    #[test]
    fn rebase_substitutes_root_segment() {
        assert_eq!(
            rebase("test/sass/input/forms/a.scss", "input", "generated-output"),
            "test/sass/generated-output/forms/a.scss"
        );
        assert_eq!(
            rebase("input/a.scss", "input", "expected-output"),
            "expected-output/a.scss"
        );
    }

    #[test]
    fn rebase_is_idempotent() {
        let once = rebase("test/sass/input/a.scss", "input", "expected-output");
        let twice = rebase(&once, "input", "expected-output");
        assert_eq!(once, twice);
    }

    #[test]
    fn rebase_round_trips() {
        let source = "test/sass/input/forms/radio.scss";
        let expected = rebase(source, "input", "expected-output");
        assert_eq!(rebase(&expected, "expected-output", "input"), source);
        assert_eq!(relative_dir(&expected, "expected-output"), "forms/");
        assert_eq!(file_stem(&expected), "radio");
    }

    #[test]
    fn extension_swap() {
        assert_eq!(
            swap_extension("test/sass/input/a.scss", "css"),
            "test/sass/input/a.css"
        );
        assert_eq!(swap_extension("test/sass/input/a", "css"), "test/sass/input/a.css");
    }
}
