//! NVMe controller handle.
//!
//! Acquisition, field access, and release of one identified controller.

use std::fs::File;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::identify::IdentifyController;
use crate::ioctl;

/// NVMe controller handle.
///
/// Represents one successfully identified controller. Obtained via
/// [`open()`](Self::open); a handle either exists fully valid (device open,
/// identify data populated) or was never created: acquisition failures
/// return an error and leave nothing behind.
///
/// The device stays open for the handle's whole lifetime and is closed
/// exactly once when the handle is dropped. Because release consumes the
/// value, double release and use-after-release are compile errors rather
/// than runtime contracts.
///
/// # Thread Safety
///
/// `Send + Sync` - after construction every accessor takes `&self` over
/// immutable data. Independent handles to the same or different device
/// paths may be used concurrently; they share no state.
///
/// # Example
///
/// ```no_run
/// use nvme_id::NvmeController;
///
/// # fn example() -> nvme_id::Result<()> {
/// let ctrl = NvmeController::open("/dev/nvme0")?;
/// println!("SN: '{}'", ctrl.serial_number());
/// println!("model: '{}'", ctrl.model_number());
/// # Ok(())
/// # }
/// ```
pub struct NvmeController {
    dev: File,
    path: PathBuf,
    id: IdentifyController,
    // UTF-8 conversion and padding trim happen once here, so the borrowing
    // getters below never observe a decode failure.
    sn: String,
    mn: String,
    fr: String,
    subnqn: String,
    fguid: String,
}

impl NvmeController {
    /// Open an NVMe controller node and read its identity.
    ///
    /// Issues Identify Controller through the kernel admin passthrough and
    /// blocks until the controller answers. The node is kept open so later
    /// queries can reuse the descriptor without re-opening.
    ///
    /// # Errors
    ///
    /// * [`Error::DeviceNotFound`](crate::Error::DeviceNotFound) - `path`
    ///   is missing, or opening/commanding it was denied.
    /// * [`Error::Protocol`](crate::Error::Protocol) - the node exists but
    ///   rejected the identify command or reported a non-zero status.
    /// * [`Error::Internal`](crate::Error::Internal) - unexpected OS
    ///   condition.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (dev, raw) = ioctl::identify_controller(path)?;
        let id = IdentifyController::new(raw);
        debug!(
            "{}: controller identified, vid {:#06x}",
            path.display(),
            id.vendor_id()
        );
        Ok(NvmeController {
            sn: id.serial_number(),
            mn: id.model_number(),
            fr: id.firmware_rev(),
            subnqn: id.subnqn(),
            fguid: id.fguid(),
            dev,
            path: path.to_path_buf(),
            id,
        })
    }

    /// The device path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serial number, trailing padding trimmed. Stable for the handle's
    /// lifetime; repeated calls return identical text.
    pub fn serial_number(&self) -> &str {
        &self.sn
    }

    /// Model number, trailing padding trimmed.
    pub fn model_number(&self) -> &str {
        &self.mn
    }

    /// Firmware revision, trailing padding trimmed.
    pub fn firmware_rev(&self) -> &str {
        &self.fr
    }

    /// NVM subsystem NVMe Qualified Name; empty if the controller predates
    /// the field.
    pub fn subnqn(&self) -> &str {
        &self.subnqn
    }

    /// FRU globally unique identifier as lowercase hex; empty if
    /// unreported.
    pub fn fguid(&self) -> &str {
        &self.fguid
    }

    /// The full decoded Identify Controller structure.
    pub fn identify(&self) -> &IdentifyController {
        &self.id
    }
}

impl AsRawFd for NvmeController {
    /// The underlying controller device descriptor. Valid only while the
    /// handle is alive.
    fn as_raw_fd(&self) -> RawFd {
        self.dev.as_raw_fd()
    }
}

impl std::fmt::Debug for NvmeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NvmeController")
            .field("path", &self.path)
            .field("serial_number", &self.sn)
            .field("model_number", &self.mn)
            .field("firmware_rev", &self.fr)
            .finish_non_exhaustive()
    }
}
