//! Path handling for local and remote file names.
//!
//! Local paths may come from either platform, so both `/` and `\` count as
//! separators. Remote paths are always rendered with `/`.

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn components(path: &str) -> Vec<&str> {
    path.split(is_separator)
        .filter(|component| !component.is_empty())
        .collect()
}

/// Renders `path` with `/` separators, collapsing repeated separators.
/// A rooted path keeps its leading `/`.
pub fn to_unix_path(path: &str) -> String {
    let joined = components(path).join("/");
    if path.starts_with(is_separator) {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Parent directory of `path` in Unix form, `None` when `path` has no
/// directory part. The parent of a top-level entry is `/`.
pub fn parent_unix_path(path: &str) -> Option<String> {
    let unix_path = to_unix_path(path);
    match unix_path.rfind('/') {
        Some(0) if unix_path.len() > 1 => Some("/".to_string()),
        Some(0) | None => None,
        Some(index) => Some(unix_path[..index].to_string()),
    }
}

/// Last component of `path`.
pub fn file_name(path: &str) -> Option<&str> {
    components(path).pop()
}

/// Joins a relative path onto `base`, in Unix form. A rooted `relative`
/// replaces `base`.
pub fn combine_unix_path(base: &str, relative: &str) -> String {
    if base.is_empty() || relative.starts_with(is_separator) {
        return to_unix_path(relative);
    }
    to_unix_path(&format!("{}/{}", base, relative))
}

/// Strips `base_dir` from the front of `path`, comparing whole components.
/// Returns `None` when `path` does not lie under `base_dir`.
pub fn debase_path(base_dir: &str, path: &str, case_sensitive: bool) -> Option<String> {
    let base_components = components(base_dir);
    let path_components = components(path);

    if path_components.len() < base_components.len() {
        return None;
    }

    let is_under_base = base_components
        .iter()
        .zip(&path_components)
        .all(|(base, component)| {
            if case_sensitive {
                base == component
            } else {
                base.eq_ignore_ascii_case(component)
            }
        });
    if !is_under_base {
        return None;
    }

    Some(path_components[base_components.len()..].join("/"))
}
