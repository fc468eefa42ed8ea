//! Identify Controller decoding.
//!
//! The Identify Controller data structure is a fixed 4096-byte blob with
//! little-endian numeric fields and space-padded ASCII text fields at fixed
//! offsets (NVMe base spec, figure "Identify Controller Data Structure").
//! This module holds the raw blob and decodes fields on demand; it performs
//! no I/O, so it can be exercised against synthetic buffers.

use std::fmt;

/// Byte length of the Identify Controller data structure.
pub const IDENTIFY_LEN: usize = 4096;

bitflags::bitflags! {
    /// Optional Admin Command Support (OACS, bytes 257:256).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Oacs: u16 {
        /// Security Send / Security Receive.
        const SECURITY = 1 << 0;
        /// Format NVM.
        const FORMAT = 1 << 1;
        /// Firmware Commit / Firmware Image Download.
        const FIRMWARE = 1 << 2;
        /// Namespace Management.
        const NS_MANAGEMENT = 1 << 3;
        /// Device Self-test.
        const SELF_TEST = 1 << 4;
        /// Directive Send / Directive Receive.
        const DIRECTIVES = 1 << 5;
        /// NVMe-MI Send / NVMe-MI Receive.
        const NVME_MI = 1 << 6;
        /// Virtualization Management.
        const VIRT_MANAGEMENT = 1 << 7;
        /// Doorbell Buffer Config.
        const DOORBELL_CONFIG = 1 << 8;
        /// Get LBA Status.
        const GET_LBA_STATUS = 1 << 9;
    }
}

bitflags::bitflags! {
    /// Optional NVM Command Support (ONCS, bytes 521:520).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Oncs: u16 {
        /// Compare.
        const COMPARE = 1 << 0;
        /// Write Uncorrectable.
        const WRITE_UNCORRECTABLE = 1 << 1;
        /// Dataset Management.
        const DATASET_MANAGEMENT = 1 << 2;
        /// Write Zeroes.
        const WRITE_ZEROES = 1 << 3;
        /// Save/Select fields in Set/Get Features.
        const SAVE_FEATURES = 1 << 4;
        /// Reservations.
        const RESERVATIONS = 1 << 5;
        /// Timestamp.
        const TIMESTAMP = 1 << 6;
        /// Verify.
        const VERIFY = 1 << 7;
    }
}

/// NVMe specification version reported by the controller (VER, bytes 83:80).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NvmeVersion {
    pub major: u16,
    pub minor: u8,
    pub tertiary: u8,
}

impl From<u32> for NvmeVersion {
    fn from(ver: u32) -> Self {
        NvmeVersion {
            major: (ver >> 16) as u16,
            minor: (ver >> 8) as u8,
            tertiary: ver as u8,
        }
    }
}

impl fmt::Display for NvmeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.tertiary)
    }
}

/// Decoded view over a raw Identify Controller response.
///
/// The blob is immutable once constructed. Text accessors return freshly
/// trimmed strings; numeric accessors decode little-endian words in place.
/// Fields this crate does not model (power-state descriptors, the fabrics
/// block, the vendor-specific area) remain reachable through
/// [`as_bytes`](Self::as_bytes).
pub struct IdentifyController {
    raw: Box<[u8; IDENTIFY_LEN]>,
}

impl IdentifyController {
    pub(crate) fn new(raw: Box<[u8; IDENTIFY_LEN]>) -> Self {
        IdentifyController { raw }
    }

    /// The raw response, byte-exact as the controller returned it.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[..]
    }

    /// PCI Vendor ID (bytes 1:0).
    pub fn vendor_id(&self) -> u16 {
        self.le16(0)
    }

    /// PCI Subsystem Vendor ID (bytes 3:2).
    pub fn subsystem_vendor_id(&self) -> u16 {
        self.le16(2)
    }

    /// Serial Number (bytes 23:4), trailing padding trimmed.
    pub fn serial_number(&self) -> String {
        ascii_field(&self.raw[4..24])
    }

    /// Model Number (bytes 63:24), trailing padding trimmed.
    pub fn model_number(&self) -> String {
        ascii_field(&self.raw[24..64])
    }

    /// Firmware Revision (bytes 71:64), trailing padding trimmed.
    pub fn firmware_rev(&self) -> String {
        ascii_field(&self.raw[64..72])
    }

    /// Recommended Arbitration Burst (byte 72).
    pub fn rab(&self) -> u8 {
        self.raw[72]
    }

    /// IEEE OUI identifier (bytes 75:73).
    pub fn ieee_oui(&self) -> u32 {
        u32::from_le_bytes([self.raw[73], self.raw[74], self.raw[75], 0])
    }

    /// Controller Multi-Path I/O and Namespace Sharing Capabilities (byte 76).
    pub fn cmic(&self) -> u8 {
        self.raw[76]
    }

    /// Maximum Data Transfer Size, log2 in units of the minimum page size
    /// (byte 77). Zero means no limit reported.
    pub fn mdts(&self) -> u8 {
        self.raw[77]
    }

    /// Controller ID (bytes 79:78).
    pub fn controller_id(&self) -> u16 {
        self.le16(78)
    }

    /// NVMe specification version the controller complies with (bytes 83:80).
    pub fn version(&self) -> NvmeVersion {
        NvmeVersion::from(self.le32(80))
    }

    /// Optional Asynchronous Events Supported (bytes 95:92).
    pub fn oaes(&self) -> u32 {
        self.le32(92)
    }

    /// Controller Attributes (bytes 99:96).
    pub fn ctratt(&self) -> u32 {
        self.le32(96)
    }

    /// FRU Globally Unique Identifier (bytes 127:112) as a lowercase hex
    /// string, or an empty string when the controller reports none.
    pub fn fguid(&self) -> String {
        hex_or_empty(&self.raw[112..128])
    }

    /// Optional Admin Command Support (bytes 257:256). Unknown bits are
    /// dropped.
    pub fn oacs(&self) -> Oacs {
        Oacs::from_bits_truncate(self.le16(256))
    }

    /// Warning Composite Temperature Threshold in Kelvin (bytes 267:266).
    pub fn warning_temp(&self) -> u16 {
        self.le16(266)
    }

    /// Critical Composite Temperature Threshold in Kelvin (bytes 269:268).
    pub fn critical_temp(&self) -> u16 {
        self.le16(268)
    }

    /// Total NVM Capacity in bytes (bytes 295:280). Zero if unreported.
    pub fn total_capacity(&self) -> u128 {
        self.le128(280)
    }

    /// Unallocated NVM Capacity in bytes (bytes 311:296). Zero if unreported.
    pub fn unallocated_capacity(&self) -> u128 {
        self.le128(296)
    }

    /// Submission Queue Entry Size, required/maximum log2 nibbles (byte 512).
    pub fn sqes(&self) -> u8 {
        self.raw[512]
    }

    /// Completion Queue Entry Size, required/maximum log2 nibbles (byte 513).
    pub fn cqes(&self) -> u8 {
        self.raw[513]
    }

    /// Maximum Outstanding Commands (bytes 515:514).
    pub fn max_commands(&self) -> u16 {
        self.le16(514)
    }

    /// Number of Namespaces the controller supports (bytes 519:516).
    pub fn num_namespaces(&self) -> u32 {
        self.le32(516)
    }

    /// Optional NVM Command Support (bytes 521:520). Unknown bits are
    /// dropped.
    pub fn oncs(&self) -> Oncs {
        Oncs::from_bits_truncate(self.le16(520))
    }

    /// NVM Subsystem NVMe Qualified Name (bytes 1023:768), trailing padding
    /// trimmed.
    pub fn subnqn(&self) -> String {
        ascii_field(&self.raw[768..1024])
    }

    fn le16(&self, off: usize) -> u16 {
        u16::from_le_bytes([self.raw[off], self.raw[off + 1]])
    }

    fn le32(&self, off: usize) -> u32 {
        u32::from_le_bytes([
            self.raw[off],
            self.raw[off + 1],
            self.raw[off + 2],
            self.raw[off + 3],
        ])
    }

    fn le128(&self, off: usize) -> u128 {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&self.raw[off..off + 16]);
        u128::from_le_bytes(bytes)
    }
}

impl fmt::Debug for IdentifyController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifyController")
            .field("vendor_id", &self.vendor_id())
            .field("serial_number", &self.serial_number())
            .field("model_number", &self.model_number())
            .field("firmware_rev", &self.firmware_rev())
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

/// Trim trailing space/NUL padding and decode best-effort.
///
/// Identify text fields are space-padded and not necessarily
/// NUL-terminated; SUBNQN is NUL-padded. Malformed bytes are replaced
/// rather than rejected, so decoding never fails.
fn ascii_field(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Lowercase hex rendering, or empty when every byte is zero (the
/// controller's way of saying "not implemented" for FGUID-style fields).
fn hex_or_empty(bytes: &[u8]) -> String {
    if bytes.iter().all(|&b| b == 0) {
        return String::new();
    }
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
