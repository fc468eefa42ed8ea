//! NVMe admin command passthrough.
//!
//! The kernel's nvme driver exposes `NVME_IOCTL_ADMIN_CMD` on controller
//! character devices (`/dev/nvme0`). The ioctl submits one admin command,
//! blocks until the controller completes it, and returns the NVMe completion
//! status as the ioctl's (non-negative) return value.

use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::identify::IDENTIFY_LEN;

/// Admin command descriptor. Mirrors `struct nvme_admin_cmd` in
/// `<linux/nvme_ioctl.h>`.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct AdminCmd {
    pub opcode: u8,
    pub flags: u8,
    pub rsvd1: u16,
    pub nsid: u32,
    pub cdw2: u32,
    pub cdw3: u32,
    pub metadata: u64,
    pub addr: u64,
    pub metadata_len: u32,
    pub data_len: u32,
    pub cdw10: u32,
    pub cdw11: u32,
    pub cdw12: u32,
    pub cdw13: u32,
    pub cdw14: u32,
    pub cdw15: u32,
    pub timeout_ms: u32,
    pub result: u32,
}

const NVME_IOC_MAGIC: u8 = b'N';
const NVME_IOC_ADMIN_CMD: u8 = 0x41;

nix::ioctl_readwrite!(nvme_admin_cmd, NVME_IOC_MAGIC, NVME_IOC_ADMIN_CMD, AdminCmd);

/// Identify admin opcode.
const OPCODE_IDENTIFY: u8 = 0x06;
/// CNS value selecting the Identify Controller data structure.
const CNS_CONTROLLER: u32 = 0x01;

/// Open `path` and issue Identify Controller.
///
/// On success returns the open device together with the raw 4096-byte
/// response; ownership of both passes to the caller (the handle keeps the
/// device open for its lifetime). On any failure the device is closed before
/// returning and no buffer escapes. No retries are attempted.
pub(crate) fn identify_controller(path: &Path) -> Result<(File, Box<[u8; IDENTIFY_LEN]>)> {
    // Read access is enough for the admin passthrough; privilege is checked
    // by the kernel at ioctl time, not open time.
    let dev = OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|e| Error::open_failed(path, e))?;
    debug!("opened {} (fd {})", path.display(), dev.as_raw_fd());

    let raw = submit_identify(&dev, path)?;
    Ok((dev, raw))
}

fn submit_identify(dev: &File, path: &Path) -> Result<Box<[u8; IDENTIFY_LEN]>> {
    let mut raw = Box::new([0u8; IDENTIFY_LEN]);
    let mut cmd = AdminCmd {
        opcode: OPCODE_IDENTIFY,
        addr: raw.as_mut_ptr() as u64,
        data_len: IDENTIFY_LEN as u32,
        cdw10: CNS_CONTROLLER,
        ..Default::default()
    };

    // Blocks the calling thread until the kernel completes the command.
    let status = unsafe { nvme_admin_cmd(dev.as_raw_fd(), &mut cmd) }
        .map_err(|errno| Error::passthrough_failed(path, errno))?;

    if status != 0 {
        return Err(Error::Protocol(format!(
            "{}: identify-controller completed with NVMe status {:#x}",
            path.display(),
            status
        )));
    }
    debug!("{}: identify-controller completed", path.display());
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    // Layout must stay byte-compatible with the kernel header.
    #[test]
    fn admin_cmd_matches_kernel_abi() {
        assert_eq!(size_of::<AdminCmd>(), 72);
        assert_eq!(align_of::<AdminCmd>(), 8);
    }

    #[test]
    fn identify_uses_full_buffer_length() {
        assert_eq!(IDENTIFY_LEN, 4096);
    }
}
