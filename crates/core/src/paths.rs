use std::io;
use std::path::{Component, PathBuf};

/// Turn a user-supplied path into an absolute one with `~` expanded,
/// `.`/`..` collapsed and symlinks resolved.
///
/// Components are resolved left to right, so a `..` steps out of wherever
/// the symlink before it points. The path does not need to exist; once a
/// component is missing the rest is joined (and `..` popped) lexically.
pub fn resolve_path(input: &str) -> io::Result<PathBuf> {
    let expanded = expand_home(input)?;
    let absolute = std::path::absolute(&expanded)?;

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                let next = resolved.join(name);
                resolved = std::fs::canonicalize(&next).unwrap_or(next);
            }
            root => resolved.push(root.as_os_str()),
        }
    }
    Ok(resolved)
}

fn expand_home(input: &str) -> io::Result<PathBuf> {
    let rest = match input.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with(['/', '\\']) => &rest[1..],
        _ => return Ok(PathBuf::from(input)),
    };
    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "home directory not found"))?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}
