//! Descriptor plumbing shared by the capture and suppress guards.

use std::fs::File;
use std::io::{self, Write};
use std::os::fd::{AsFd, AsRawFd, FromRawFd, OwnedFd, RawFd};

pub(super) fn flush_std_streams() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

fn check(rc: libc::c_int) -> io::Result<libc::c_int> {
    if rc < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(rc)
    }
}

fn dup2(source: &impl AsRawFd, target: RawFd) -> io::Result<()> {
    // SAFETY: dup2 has no memory-safety preconditions and `source` is open.
    check(unsafe { libc::dup2(source.as_raw_fd(), target) }).map(|_| ())
}

fn set_cloexec(fd: &OwnedFd) -> io::Result<()> {
    // SAFETY: fcntl(F_SETFD) only changes descriptor flags.
    check(unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETFD, libc::FD_CLOEXEC) }).map(|_| ())
}

/// Create a pipe, returning `(read end, write end)`.
///
/// Both ends are close-on-exec; only the copies made onto fds 1 and 2 are
/// inherited by child processes.
pub(super) fn pipe() -> io::Result<(File, OwnedFd)> {
    let mut fds = [0 as libc::c_int; 2];
    // SAFETY: `fds` has room for the two descriptors pipe writes.
    check(unsafe { libc::pipe(fds.as_mut_ptr()) })?;
    // SAFETY: pipe just returned two fresh descriptors nothing else owns.
    let (read, write) = unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) };
    set_cloexec(&read)?;
    set_cloexec(&write)?;
    Ok((File::from(read), write))
}

/// Copies of the original fds 1 and 2, put back when dropped.
pub(super) struct SavedStreams {
    stdout: OwnedFd,
    stderr: OwnedFd,
}

impl SavedStreams {
    pub(super) fn save() -> io::Result<Self> {
        Ok(Self {
            stdout: io::stdout().as_fd().try_clone_to_owned()?,
            stderr: io::stderr().as_fd().try_clone_to_owned()?,
        })
    }

    /// Point fds 1 and 2 at `stdout` and `stderr`.
    pub(super) fn redirect(&self, stdout: &impl AsRawFd, stderr: &impl AsRawFd) -> io::Result<()> {
        flush_std_streams();
        dup2(stdout, libc::STDOUT_FILENO)?;
        dup2(stderr, libc::STDERR_FILENO)
    }
}

impl Drop for SavedStreams {
    fn drop(&mut self) {
        flush_std_streams();
        for (copy, target) in [
            (&self.stdout, libc::STDOUT_FILENO),
            (&self.stderr, libc::STDERR_FILENO),
        ] {
            if let Err(e) = dup2(copy, target) {
                tracing::error!(fd = target, error = %e, "failed to restore output stream");
            }
        }
    }
}
