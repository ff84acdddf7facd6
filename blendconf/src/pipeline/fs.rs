//! Capability-scoped file access for sources and outputs.
//!
//! Each call opens the parent directory, performs one read or write and drops
//! every handle before returning, on success and on failure alike.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

fn open_parent(path: &Utf8Path) -> std::io::Result<(Dir, &str)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other(format!("'{path}' does not name a file")))?;
    let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())?;
    Ok((dir, file_name))
}

/// Read `path` as UTF-8 text.
pub(super) fn read_text(path: &Utf8Path) -> std::io::Result<String> {
    let (dir, file_name) = open_parent(path)?;
    dir.read_to_string(file_name)
}

/// Create or truncate `path` and write `contents`. The parent must exist.
pub(super) fn write_text(path: &Utf8Path, contents: &str) -> std::io::Result<()> {
    let (dir, file_name) = open_parent(path)?;
    dir.write(file_name, contents)
}
