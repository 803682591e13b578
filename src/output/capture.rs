//! Capture of everything written to the process's stdout and stderr.
//!
//! Like [`SuppressGuard`](super::SuppressGuard), the guard rewires file
//! descriptors 1 and 2 for the whole process: output from Rust code, C code
//! and child processes with inherited streams all lands in the capture. It
//! is not safe to use from several threads at once, and any other thread
//! writing to the standard streams while a guard is alive is captured too.

use std::io;

#[cfg(unix)]
use std::{fs::File, io::Read, thread::JoinHandle};

#[cfg(unix)]
use super::fd::{self, SavedStreams};

#[cfg(unix)]
type Reader = JoinHandle<io::Result<Vec<u8>>>;

/// Routes stdout and stderr into pipes while alive.
///
/// Each pipe is drained on its own thread, so a large amount of output
/// cannot fill the pipe and block the writer. Call [`finish`](Self::finish)
/// to restore the streams and collect the text; dropping the guard restores
/// the streams and discards it.
#[must_use = "output is restored as soon as the guard is dropped"]
pub struct CaptureGuard {
    #[cfg(unix)]
    saved: Option<SavedStreams>,
    #[cfg(unix)]
    readers: Option<(Reader, Reader)>,
}

#[cfg(unix)]
impl CaptureGuard {
    /// Start capturing.
    pub fn start() -> io::Result<Self> {
        let (stdout_read, stdout_write) = fd::pipe()?;
        let (stderr_read, stderr_write) = fd::pipe()?;
        let readers = (drain(stdout_read)?, drain(stderr_read)?);

        let saved = SavedStreams::save()?;
        saved.redirect(&stdout_write, &stderr_write)?;

        // Only fds 1 and 2 (and children that inherit them) hold the write
        // ends from here on, so restoring them lets the readers reach EOF.
        Ok(Self {
            saved: Some(saved),
            readers: Some(readers),
        })
    }

    /// Restore the streams and return `(stdout, stderr)`.
    ///
    /// Blocks until every process holding the captured descriptors has
    /// closed them, including background children started while capturing.
    pub fn finish(mut self) -> io::Result<(String, String)> {
        drop(self.saved.take());
        let (stdout, stderr) = match self.readers.take() {
            Some((stdout, stderr)) => (collect(stdout)?, collect(stderr)?),
            None => Default::default(),
        };
        Ok((stdout, stderr))
    }
}

#[cfg(unix)]
impl Drop for CaptureGuard {
    fn drop(&mut self) {
        // Readers are left to finish on their own once the pipes close.
        drop(self.saved.take());
    }
}

#[cfg(unix)]
fn drain(mut pipe: File) -> io::Result<Reader> {
    std::thread::Builder::new()
        .name("ga4gh-capture".to_string())
        .spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
}

#[cfg(unix)]
fn collect(reader: Reader) -> io::Result<String> {
    let bytes = reader
        .join()
        .map_err(|_| io::Error::other("output reader thread panicked"))??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(not(unix))]
impl CaptureGuard {
    /// Start capturing.
    pub fn start() -> io::Result<Self> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "output capture is not supported on this platform",
        ))
    }

    /// Restore the streams and return `(stdout, stderr)`.
    pub fn finish(self) -> io::Result<(String, String)> {
        Ok(Default::default())
    }
}

/// Run `f` and return everything written to stdout and stderr meanwhile.
///
/// The original streams are restored on every exit path, including an error
/// from `f` and unwinding.
///
/// ```no_run
/// use ga4gh_common::{capture_output, logging, run_command};
///
/// let (out, err) = capture_output(|| {
///     logging::log("stdout");
///     run_command("sh -c 'printf stderr 1>&2'", false)
/// })?;
/// assert_eq!((out.as_str(), err.as_str()), ("stdout\n", "stderr"));
/// # Ok::<(), ga4gh_common::Ga4ghError>(())
/// ```
pub fn capture_output<F, E>(f: F) -> Result<(String, String), E>
where
    F: FnOnce() -> Result<(), E>,
    E: From<io::Error>,
{
    let guard = CaptureGuard::start()?;
    f()?;
    Ok(guard.finish()?)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::output::fd::test_support::{lock_std_fds, stdout_identity};
    use crate::process::run_command;

    // Other unit tests may print while a capture is open, so these only
    // check for their own markers. Exact contents are covered by
    // tests/capture_integration.rs.

    #[test]
    fn test_captures_direct_writes() {
        let _lock = lock_std_fds();
        let (out, err) = capture_output(|| -> io::Result<()> {
            write!(io::stdout(), "unit-stdout-marker")?;
            write!(io::stderr(), "unit-stderr-marker")
        })
        .unwrap();
        assert!(out.contains("unit-stdout-marker"));
        assert!(err.contains("unit-stderr-marker"));
        assert!(!out.contains("unit-stderr-marker"));
    }

    #[test]
    fn test_captures_child_process_streams() {
        let _lock = lock_std_fds();
        let (out, err) =
            capture_output(|| run_command("sh -c 'printf child-out; printf child-err 1>&2'", false))
                .unwrap();
        assert!(out.contains("child-out"));
        assert!(err.contains("child-err"));
    }

    #[test]
    fn test_large_output_does_not_block() {
        let _lock = lock_std_fds();
        let chunk = vec![b'x'; 64 * 1024];
        let (out, _) = capture_output(|| -> io::Result<()> {
            let mut stdout = io::stdout().lock();
            for _ in 0..32 {
                stdout.write_all(&chunk)?;
            }
            Ok(())
        })
        .unwrap();
        assert!(out.len() >= 32 * chunk.len());
    }

    #[test]
    fn test_restored_after_error() {
        let _lock = lock_std_fds();
        let before = stdout_identity();

        let result = capture_output(|| run_command("false", false));
        assert!(result.is_err());
        assert_eq!(stdout_identity(), before);
    }

    #[test]
    fn test_restored_after_panic() {
        let _lock = lock_std_fds();
        let before = stdout_identity();

        let result = std::panic::catch_unwind(|| {
            let _ = capture_output(|| -> io::Result<()> { panic!("inside captured block") });
        });
        assert!(result.is_err());
        assert_eq!(stdout_identity(), before);
    }

    #[test]
    fn test_dropped_guard_restores() {
        let _lock = lock_std_fds();
        let before = stdout_identity();
        {
            let _guard = CaptureGuard::start().unwrap();
            assert_ne!(stdout_identity(), before);
        }
        assert_eq!(stdout_identity(), before);
    }
}
