//! Handle-based access to NVMe controller identity on Linux.
//!
//! Opens an NVMe controller character device (`/dev/nvme0`), issues the
//! Identify Controller admin command through the kernel's
//! `NVME_IOCTL_ADMIN_CMD` passthrough, and exposes the fixed-layout
//! response as typed fields for the handle's lifetime.
//!
//! # Quick Start
//!
//! ```no_run
//! use nvme_id::NvmeController;
//!
//! fn main() -> nvme_id::Result<()> {
//!     let ctrl = NvmeController::open("/dev/nvme0")?;
//!     println!("SN: '{}'", ctrl.serial_number());
//!     println!("NVMe {}", ctrl.identify().version());
//!     Ok(())
//! }
//! ```
//!
//! # Design
//!
//! - Acquisition either fully succeeds or returns a categorized
//!   [`Error`] with a human-readable diagnostic; no partially
//!   constructed handle is observable.
//! - The identify response is immutable once read; decoding
//!   ([`IdentifyController`]) is pure and separated from device I/O.
//! - Release is `Drop`: the device descriptor is closed exactly once,
//!   and use-after-release cannot compile.
//! - Calls are synchronous and block the caller's thread; timeout and
//!   retry policy belong to the caller.
//!
//! # Privileges
//!
//! The admin passthrough requires `CAP_SYS_ADMIN` (typically root).
//! Unprivileged callers get [`Error::DeviceNotFound`] with the OS
//! diagnostic attached.

mod controller;
mod error;
mod identify;
mod ioctl;

pub use controller::NvmeController;
pub use error::{Error, Result};
pub use identify::{IDENTIFY_LEN, IdentifyController, NvmeVersion, Oacs, Oncs};
