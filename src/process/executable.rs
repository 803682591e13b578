//! Executable lookup on the search path.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::logging::log;

/// Returns the full path of `name` on `PATH`, or `None` if it can't be found.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let search_path = std::env::var_os("PATH")?;
    find_executable_in(name, &search_path)
}

/// Like [`find_executable`], searching the given path list instead of `PATH`.
///
/// `search_path` uses the platform separator (`:` on Unix, `;` on Windows).
pub fn find_executable_in(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    std::env::split_paths(search_path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    if !path.is_file() {
        return false;
    }
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Names from `names` that cannot be found on `PATH`, in input order.
pub fn missing_executables<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter(|name| find_executable(name.as_ref()).is_none())
        .map(|name| name.as_ref().to_string())
        .collect()
}

/// Check that all of the given executables are on the path.
///
/// If at least one is missing, every missing name is printed and the
/// process exits with status 1.
pub fn require_executables<I, S>(names: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let missing = missing_executables(names);
    if missing.is_empty() {
        return;
    }
    tracing::error!(missing = ?missing, "required executables not found");
    log("In order to run this script, the following executables need to be on the path:");
    for name in &missing {
        log(name);
    }
    std::process::exit(1);
}
