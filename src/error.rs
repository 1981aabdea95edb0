use std::io;
use std::path::{Path, PathBuf};

/// Coarse classification handed to the host binding alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    ResourceUnavailable,
    WorkerLost,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument     => "invalid-argument",
            ErrorKind::NotFound            => "not-found",
            ErrorKind::ResourceUnavailable => "resource-unavailable",
            ErrorKind::WorkerLost          => "worker-lost",
        }
    }
}

/// Failure of one query. Every query fails with exactly one of these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected before any system call was made.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("{}: no such file or directory (os error {code})", path.display())]
    NotFound { path: PathBuf, code: i32 },

    /// The resource could not be opened or read; `code` is the raw errno.
    #[error("unable to read {} (os error {code})", path.display())]
    ResourceUnavailable { path: PathBuf, code: i32 },

    /// The worker thread died before delivering a result.
    #[error("worker thread exited without a result")]
    WorkerLost,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument { reason: reason.into() }
    }

    pub fn from_errno(path: &Path, code: i32) -> Self {
        if code == libc::ENOENT {
            Error::NotFound { path: path.to_path_buf(), code }
        } else {
            Error::ResourceUnavailable { path: path.to_path_buf(), code }
        }
    }

    /// Never yields `NotFound`: a missing system table is an unavailable
    /// resource, not a bad caller path.
    pub fn unavailable(path: &Path, err: &io::Error) -> Self {
        Error::ResourceUnavailable {
            path: path.to_path_buf(),
            code: err.raw_os_error().unwrap_or(0),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. }     => ErrorKind::InvalidArgument,
            Error::NotFound { .. }            => ErrorKind::NotFound,
            Error::ResourceUnavailable { .. } => ErrorKind::ResourceUnavailable,
            Error::WorkerLost                 => ErrorKind::WorkerLost,
        }
    }

    /// Raw OS error code, when the failure came from the OS.
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::NotFound { code, .. } | Error::ResourceUnavailable { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enoent_maps_to_not_found() {
        let err = Error::from_errno(Path::new("/nope"), libc::ENOENT);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.code(), Some(libc::ENOENT));
    }

    #[test]
    fn message_carries_path_and_code() {
        let err = Error::from_errno(Path::new("/proc/diskstats"), libc::EACCES);
        assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
        let msg = err.to_string();
        assert!(msg.contains("/proc/diskstats"));
        assert!(msg.contains(&format!("os error {}", libc::EACCES)));
    }

    #[test]
    fn unavailable_ignores_enoent() {
        let io_err = io::Error::from_raw_os_error(libc::ENOENT);
        let err = Error::unavailable(Path::new("/etc/fstab"), &io_err);
        assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
        assert_eq!(err.code(), Some(libc::ENOENT));
    }

    #[test]
    fn invalid_argument_has_no_code() {
        let err = Error::invalid_argument("path must not be empty");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.code(), None);
    }
}
