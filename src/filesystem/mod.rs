use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Represents errors that can occur during filesystem operations.
///
/// Common `io::ErrorKind`s are lifted into their own variants so callers can
/// match on the outcome without digging through a raw `io::Error`; anything
/// else stays wrapped in [`FilesystemError::Io`].
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// The path does not exist.
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The operation was not permitted on the path.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    /// The destination already exists and overwriting was not allowed.
    #[error("path already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    /// A joined path would resolve outside its base directory.
    #[error("path `{}` escapes base directory `{}`", .path.display(), .base.display())]
    PathEscape { base: PathBuf, path: PathBuf },
    /// A recursive copy stopped partway. `copied` lists every file that made
    /// it to the destination before `failed` aborted the operation.
    #[error("directory copy interrupted at `{}`: {source} ({} entries copied)", .failed.display(), .copied.len())]
    CopyInterrupted {
        copied: Vec<PathBuf>,
        failed: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Wrapper for IO errors with no more specific variant.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Error for empty path input.
    #[error("Path is empty")]
    EmptyPath,
    /// Error when the home directory cannot be determined.
    #[error("Home directory not found")]
    HomeDirNotFound,
    /// Error for unsupported user expansion in paths (e.g., ~user).
    #[error("User expansion (~user) not supported")]
    UserExpansionNotSupported,
}

fn classify(err: io::Error, path: &Path) -> FilesystemError {
    match err.kind() {
        io::ErrorKind::NotFound => FilesystemError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FilesystemError::PermissionDenied(path.to_path_buf()),
        io::ErrorKind::AlreadyExists => FilesystemError::AlreadyExists(path.to_path_buf()),
        _ => FilesystemError::Io(err),
    }
}

/// Options for writing files, such as whether to overwrite existing files.
pub struct WriteOptions {
    /// If true, allows overwriting an existing file.
    pub overwrite: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

/// Options for removing files or directories, such as recursive removal.
pub struct RemoveOptions {
    /// If true, removes directories recursively.
    pub recursive: bool,
}

impl Default for RemoveOptions {
    fn default() -> Self {
        Self { recursive: false }
    }
}

/// The outcome of a successful [`copy_dir_recursive`] call: every file
/// written to the destination, in copy order.
#[derive(Debug, Default)]
pub struct CopyReport {
    pub copied: Vec<PathBuf>,
}

/// Creates a directory if it does not exist.
///
/// # Arguments
///
/// * `dir` - Path to the directory to create. A leading `~` is expanded.
/// * `recursive` - If true, creates parent directories as needed.
///
/// # Errors
///
/// Returns `FilesystemError` if the directory cannot be created.
pub fn create_if_not_exists<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<(), FilesystemError> {
    let raw_path = dir.as_ref().to_str().ok_or(FilesystemError::EmptyPath)?;
    let path = expand_home(raw_path)?;

    if path.exists() {
        return Ok(());
    }

    let result = if recursive {
        fs::create_dir_all(&path)
    } else {
        fs::create_dir(&path)
    };
    result.map_err(|e| classify(e, &path))
}

/// Checks if a directory exists at the given path.
pub fn dir_exists<P: AsRef<Path>>(dir: P) -> bool {
    dir.as_ref().is_dir()
}

/// Checks if a file exists at the given path.
pub fn file_exists<P: AsRef<Path>>(file: P) -> bool {
    file.as_ref().is_file()
}

/// Moves a file or directory from `src` to `dst`.
///
/// # Errors
///
/// Returns `FilesystemError` if the move operation fails; a missing source
/// surfaces as `NotFound`.
pub fn move_if_exists<P: AsRef<Path>>(src: P, dst: P) -> Result<(), FilesystemError> {
    fs::rename(&src, dst).map_err(|e| classify(e, src.as_ref()))
}

/// Copies a single file from `src` to `dst`, with optional overwrite.
///
/// # Arguments
///
/// * `src` - Source file path.
/// * `dst` - Destination file path.
/// * `overwrite` - If false and the destination exists, fails with
///   `AlreadyExists`.
///
/// # Returns
///
/// The number of bytes copied.
pub fn copy_if_exists<P: AsRef<Path>>(src: P, dst: P, overwrite: bool) -> Result<u64, FilesystemError> {
    let dst_path = dst.as_ref();
    if dst_path.exists() && !overwrite {
        return Err(FilesystemError::AlreadyExists(dst_path.to_path_buf()));
    }
    fs::copy(&src, dst_path).map_err(|e| classify(e, src.as_ref()))
}

/// Removes a file or directory at the given path, with options.
///
/// A path that does not exist is not an error; the helper's contract is
/// "gone afterwards". Removing a non-empty directory without
/// `options.recursive` fails.
pub fn remove_if_exists<P: AsRef<Path>>(path: P, options: RemoveOptions) -> Result<(), FilesystemError> {
    let p = path.as_ref();
    let result = if p.is_dir() {
        if options.recursive {
            fs::remove_dir_all(p)
        } else {
            fs::remove_dir(p)
        }
    } else if p.is_file() {
        fs::remove_file(p)
    } else {
        return Ok(());
    };
    result.map_err(|e| classify(e, p))
}

/// Copies the directory tree at `src` into `dst`, preserving relative
/// structure. `dst` and intermediate directories are created as needed.
///
/// The copy stops at the first entry that fails: the returned
/// [`FilesystemError::CopyInterrupted`] names every file copied up to that
/// point and the entry that failed, so the caller knows exactly how far the
/// operation got. A partial copy is never reported as success.
///
/// # Returns
///
/// A [`CopyReport`] listing every copied file on success.
pub fn copy_dir_recursive<P: AsRef<Path>>(src: P, dst: P) -> Result<CopyReport, FilesystemError> {
    let src = src.as_ref();
    let dst = dst.as_ref();
    if !src.is_dir() {
        return Err(FilesystemError::NotFound(src.to_path_buf()));
    }

    let mut copied = Vec::new();
    match copy_tree(src, dst, &mut copied) {
        Ok(()) => Ok(CopyReport { copied }),
        Err((failed, source)) => Err(FilesystemError::CopyInterrupted {
            copied,
            failed,
            source,
        }),
    }
}

fn copy_tree(src: &Path, dst: &Path, copied: &mut Vec<PathBuf>) -> Result<(), (PathBuf, io::Error)> {
    fs::create_dir_all(dst).map_err(|e| (dst.to_path_buf(), e))?;

    let entries = fs::read_dir(src).map_err(|e| (src.to_path_buf(), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| (src.to_path_buf(), e))?;
        let source = entry.path();
        let target = dst.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| (source.clone(), e))?;
        if file_type.is_dir() {
            copy_tree(&source, &target, copied)?;
        } else {
            fs::copy(&source, &target).map_err(|e| (source, e))?;
            copied.push(target);
        }
    }
    Ok(())
}

/// Joins `relative` onto `base`, refusing any result outside `base`.
///
/// The check is lexical: `.` components are dropped, `..` components walk
/// back through components added so far, and a `..` that would climb above
/// `base` fails with [`FilesystemError::PathEscape`]. Absolute `relative`
/// paths are rejected outright. Neither path needs to exist.
///
/// This is the boundary that keeps launcher-written paths (which may come
/// from untrusted pack metadata) inside the game directory.
pub fn safe_join<P: AsRef<Path>>(base: P, relative: P) -> Result<PathBuf, FilesystemError> {
    let base = base.as_ref();
    let relative = relative.as_ref();

    let mut joined = base.to_path_buf();
    let mut depth: usize = 0;
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                joined.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(FilesystemError::PathEscape {
                        base: base.to_path_buf(),
                        path: relative.to_path_buf(),
                    });
                }
                joined.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(FilesystemError::PathEscape {
                    base: base.to_path_buf(),
                    path: relative.to_path_buf(),
                });
            }
        }
    }
    Ok(joined)
}

/// Reads the contents of a file into a string.
///
/// # Errors
///
/// Returns `FilesystemError::NotFound` for a missing file, or another
/// variant if the read fails for a different reason.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String, FilesystemError> {
    fs::read_to_string(&path).map_err(|e| classify(e, path.as_ref()))
}

/// Writes content to a file, with options for overwriting.
///
/// # Errors
///
/// Fails with `AlreadyExists` when the file exists and
/// `options.overwrite` is false, or with another variant if the write
/// itself fails.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str, options: WriteOptions) -> Result<(), FilesystemError> {
    let p = path.as_ref();
    if p.exists() && !options.overwrite {
        return Err(FilesystemError::AlreadyExists(p.to_path_buf()));
    }
    let mut file = fs::File::create(p).map_err(|e| classify(e, p))?;
    file.write_all(content.as_bytes()).map_err(|e| classify(e, p))?;
    Ok(())
}

/// Expands a path that starts with `~` to the user's home directory.
///
/// # Arguments
///
/// * `path` - Path string, possibly starting with `~`.
///
/// # Errors
///
/// Fails with `HomeDirNotFound` when no home directory can be determined,
/// and `UserExpansionNotSupported` for the `~user` form.
pub fn expand_home(path: &str) -> Result<PathBuf, FilesystemError> {
    if path.is_empty() {
        return Err(FilesystemError::EmptyPath);
    }
    if !path.starts_with('~') {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().ok_or(FilesystemError::HomeDirNotFound)?;
    if path == "~" {
        return Ok(home);
    }
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        return Ok(home.join(rest));
    }
    Err(FilesystemError::UserExpansionNotSupported)
}
