//! Advisory file locking for the configuration manifest.
//!
//! Non-blocking shared/exclusive locks over an open file. When the lock is
//! held by another process the error is [`muxwright_core::Error::LockBusy`],
//! distinguishable via [`muxwright_core::Error::is_lock_busy`] so callers
//! can decide their own retry policy - nothing here retries.

use std::fs::{File, OpenOptions};
use std::path::Path;

use muxwright_core::{Error, Result};

/// Shared (reader) or exclusive (writer) lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Multiple processes may hold the lock simultaneously
    Shared,
    /// Only one process may hold the lock
    Exclusive,
}

/// An advisory lock over the manifest file.
///
/// The lock is tied to the open file handle; dropping the `ManifestLock`
/// closes the file and releases any held lock.
#[derive(Debug)]
pub struct ManifestLock {
    file: File,
}

impl ManifestLock {
    /// Open (creating if absent) the manifest file for locking.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        Ok(Self { file })
    }

    /// Try to acquire the lock without blocking.
    ///
    /// Returns `Error::LockBusy` when another process holds a conflicting
    /// lock; any other failure surfaces as an IO error.
    pub fn acquire(&self, mode: LockMode) -> Result<()> {
        sys::acquire(&self.file, mode)
    }

    /// Release a held lock.
    pub fn release(&self) -> Result<()> {
        sys::release(&self.file)
    }
}

#[cfg(unix)]
mod sys {
    use super::*;
    use std::os::unix::io::AsRawFd;

    pub(super) fn acquire(file: &File, mode: LockMode) -> Result<()> {
        let operation = match mode {
            LockMode::Shared => libc::LOCK_SH | libc::LOCK_NB,
            LockMode::Exclusive => libc::LOCK_EX | libc::LOCK_NB,
        };
        flock(file, operation)
    }

    pub(super) fn release(file: &File) -> Result<()> {
        flock(file, libc::LOCK_UN)
    }

    fn flock(file: &File, operation: i32) -> Result<()> {
        // SAFETY: the fd is valid for the lifetime of `file`.
        let rc = unsafe { libc::flock(file.as_raw_fd(), operation) };
        if rc == 0 {
            return Ok(());
        }

        let err = std::io::Error::last_os_error();
        match err.raw_os_error() {
            Some(code) if code == libc::EWOULDBLOCK || code == libc::EAGAIN => {
                Err(Error::LockBusy)
            }
            _ => Err(Error::Io(err)),
        }
    }
}

#[cfg(windows)]
mod sys {
    use super::*;
    use std::os::windows::io::AsRawHandle;

    use windows_sys::Win32::Foundation::{ERROR_LOCK_VIOLATION, HANDLE};
    use windows_sys::Win32::Storage::FileSystem::{
        LockFileEx, UnlockFileEx, LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY,
    };
    use windows_sys::Win32::System::IO::OVERLAPPED;

    pub(super) fn acquire(file: &File, mode: LockMode) -> Result<()> {
        let mut flags = LOCKFILE_FAIL_IMMEDIATELY;
        if mode == LockMode::Exclusive {
            flags |= LOCKFILE_EXCLUSIVE_LOCK;
        }

        // Lock a single byte; all holders must agree on the range.
        let mut overlapped: OVERLAPPED = unsafe { std::mem::zeroed() };
        let ok = unsafe {
            LockFileEx(
                file.as_raw_handle() as HANDLE,
                flags,
                0,
                1,
                0,
                &mut overlapped,
            )
        };
        if ok != 0 {
            return Ok(());
        }

        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(ERROR_LOCK_VIOLATION as i32) {
            return Err(Error::LockBusy);
        }
        Err(Error::Io(err))
    }

    pub(super) fn release(file: &File) -> Result<()> {
        let mut overlapped: OVERLAPPED = unsafe { std::mem::zeroed() };
        let ok = unsafe {
            UnlockFileEx(file.as_raw_handle() as HANDLE, 0, 1, 0, &mut overlapped)
        };
        if ok != 0 {
            return Ok(());
        }
        Err(Error::Io(std::io::Error::last_os_error()))
    }
}
