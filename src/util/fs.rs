//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use tempfile::NamedTempFile;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
///
/// The contents go to a temporary file in the destination directory which
/// is then persisted over `path`, so the destination is never observed
/// half-written.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    write_bytes(path, contents.as_bytes())
}

/// Copy a file, with the same guarantees as [`write_string`].
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let bytes =
        fs::read(src).with_context(|| format!("failed to read file: {}", src.display()))?;
    write_bytes(dst, &bytes)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}

/// Expand `{a,b}` alternatives in a glob pattern.
///
/// `Classes/*.{h,m}` becomes `Classes/*.h` and `Classes/*.m`. Nested
/// alternatives expand left to right.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = pattern[open..].find('}').map(|i| open + i) else {
        return vec![pattern.to_string()];
    };

    let head = &pattern[..open];
    let tail = &pattern[close + 1..];
    pattern[open + 1..close]
        .split(',')
        .flat_map(|alt| expand_braces(&format!("{}{}{}", head, alt, tail)))
        .collect()
}

/// Find paths matching glob patterns relative to a base directory.
///
/// Files always match. Directories match only when `package_dirs` is set
/// and their name has an extension (`Assets.xcassets`, `Model.xcdatamodeld`);
/// such directories are then treated as one resource, and files inside
/// them are left out, except for data-model members which the project
/// keeps implicit.
pub fn glob_paths(base: &Path, patterns: &[String], package_dirs: bool) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns.iter().flat_map(|p| expand_braces(p)) {
        let full_pattern = base.join(&pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in
            glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    let matches =
                        path.is_file() || (package_dirs && path.is_dir() && is_package_dir(&path));
                    if !matches || (package_dirs && inside_opaque_package(base, &path)) {
                        continue;
                    }
                    results.push(path);
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Directory treated as a single resource.
fn is_package_dir(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext != "lproj",
        None => false,
    }
}

fn inside_opaque_package(base: &Path, path: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(base) else {
        return false;
    };
    let Some(parent) = relative.parent() else {
        return false;
    };
    let packages: Vec<&Path> = parent
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(Path::new(name)),
            _ => None,
        })
        .filter(|name| is_package_dir(name))
        .collect();
    if packages
        .iter()
        .any(|name| name.extension().is_some_and(|e| e == "xcdatamodeld"))
    {
        return false;
    }
    !packages.is_empty()
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}
