//! Error types for nvme-id.

use std::io;
use std::path::Path;

use nix::errno::Errno;

/// Result type for nvme-id operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for nvme-id operations.
///
/// Every variant carries a human-readable diagnostic, including the
/// underlying OS error text where one exists. All faults are reported at
/// acquisition time; a constructed [`NvmeController`](crate::NvmeController)
/// cannot fail afterwards.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Device node is missing, or opening/commanding it was denied.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Node exists but rejected the identify command, or the controller
    /// reported a non-zero completion status.
    #[error("not an NVMe controller: {0}")]
    Protocol(String),

    /// Unexpected OS condition. Should not occur under correct usage on a
    /// sane kernel; worth reporting as a bug.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Classify a failure to open the device node.
    pub(crate) fn open_failed(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                Error::DeviceNotFound(format!("{}: {}", path.display(), err))
            }
            _ => Error::Internal(format!("failed to open {}: {}", path.display(), err)),
        }
    }

    /// Classify an errno from the admin passthrough ioctl.
    ///
    /// `ENOTTY`/`EINVAL`/`EOPNOTSUPP` mean the node does not speak the NVMe
    /// admin command set. `EPERM`/`EACCES` mean the caller lacks the
    /// privilege to issue admin commands (CAP_SYS_ADMIN).
    pub(crate) fn passthrough_failed(path: &Path, errno: Errno) -> Self {
        match errno {
            Errno::ENOTTY | Errno::EINVAL | Errno::EOPNOTSUPP => Error::Protocol(format!(
                "{}: admin passthrough rejected ({})",
                path.display(),
                errno
            )),
            Errno::EPERM | Errno::EACCES => Error::DeviceNotFound(format!(
                "{}: permission denied for admin passthrough ({})",
                path.display(),
                errno
            )),
            _ => Error::Internal(format!(
                "{}: NVME_IOCTL_ADMIN_CMD failed: {}",
                path.display(),
                errno
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_failures_classify_by_kind() {
        let path = Path::new("/dev/nvme99");

        let err = Error::open_failed(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::DeviceNotFound(_)));
        assert!(err.to_string().contains("/dev/nvme99"));

        let err = Error::open_failed(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, Error::DeviceNotFound(_)));

        let err = Error::open_failed(path, io::Error::from(io::ErrorKind::Interrupted));
        assert!(matches!(err, Error::Internal(_)));
    }

    #[test]
    fn ioctl_failures_classify_by_errno() {
        let path = Path::new("/dev/null");

        assert!(matches!(
            Error::passthrough_failed(path, Errno::ENOTTY),
            Error::Protocol(_)
        ));
        assert!(matches!(
            Error::passthrough_failed(path, Errno::EACCES),
            Error::DeviceNotFound(_)
        ));
        assert!(matches!(
            Error::passthrough_failed(path, Errno::EIO),
            Error::Internal(_)
        ));
    }

    #[test]
    fn diagnostics_are_never_empty() {
        let err = Error::Protocol("/dev/loop0: admin passthrough rejected (ENOTTY)".to_string());
        assert!(!err.to_string().is_empty());
    }
}
