//! OS-level suppression of standard output and standard error.
//!
//! The guard rewires file descriptors 1 and 2 for the whole process. It is
//! not safe to use from several threads at once, and any other thread
//! writing to the standard streams while a guard is alive is silenced too.

use std::io;

#[cfg(unix)]
use super::fd::SavedStreams;

/// Redirects the process's stdout and stderr to the null device while alive.
///
/// Dropping the guard restores the original descriptors, including when the
/// guarded code unwinds.
#[must_use = "output is restored as soon as the guard is dropped"]
pub struct SuppressGuard {
    #[cfg(unix)]
    _saved: SavedStreams,
}

#[cfg(unix)]
impl SuppressGuard {
    fn acquire() -> io::Result<Self> {
        let devnull = std::fs::OpenOptions::new().write(true).open("/dev/null")?;
        let saved = SavedStreams::save()?;
        // On failure `saved` drops here and puts back whatever was changed.
        saved.redirect(&devnull, &devnull)?;
        Ok(Self { _saved: saved })
    }
}

#[cfg(not(unix))]
impl SuppressGuard {
    fn acquire() -> io::Result<Self> {
        tracing::warn!("output suppression is not supported on this platform");
        Ok(Self {})
    }
}

/// Redirect stdout and stderr to the null device until the guard is dropped.
pub fn suppress_output() -> io::Result<SuppressGuard> {
    SuppressGuard::acquire()
}

/// Run `f` with stdout and stderr suppressed, restoring them afterwards.
pub fn suppressed<T>(f: impl FnOnce() -> T) -> io::Result<T> {
    let _guard = suppress_output()?;
    Ok(f())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[cfg(unix)]
    use crate::output::fd::test_support::{lock_std_fds, stdout_identity};

    #[cfg(not(unix))]
    fn lock_std_fds() {}

    #[test]
    fn test_suppress_and_restore() {
        let _lock = lock_std_fds();
        {
            let _guard = suppress_output().unwrap();
            writeln!(io::stdout(), "this line goes nowhere").unwrap();
        }
        assert!(io::stdout().flush().is_ok());
    }

    #[test]
    fn test_suppressed_returns_value() {
        let _lock = lock_std_fds();
        let value = suppressed(|| 40 + 2).unwrap();
        assert_eq!(value, 42);
    }

    #[cfg(unix)]
    #[test]
    fn test_suppressed_silences_child_processes() {
        let _lock = lock_std_fds();
        let (out, _) = crate::output::capture_output(|| {
            suppressed(|| crate::process::run_command("echo hidden-from-capture", false))?
        })
        .unwrap();
        assert!(!out.contains("hidden-from-capture"));
    }

    #[cfg(unix)]
    #[test]
    fn test_restored_after_panic() {
        let _lock = lock_std_fds();
        let before = stdout_identity();

        let result = std::panic::catch_unwind(|| {
            let _guard = suppress_output().unwrap();
            panic!("inside suppressed block");
        });
        assert!(result.is_err());
        assert_eq!(stdout_identity(), before);
    }
}
