//! Integration tests for controller acquisition.
//!
//! The error paths run against the host filesystem and need no hardware.
//! The real-device test self-skips when no controller node is present or
//! the environment lacks the privilege to issue admin commands.

use std::path::Path;

use nvme_id::{Error, NvmeController};

#[test]
fn missing_path_is_device_not_found() {
    let err = NvmeController::open("/dev/does-not-exist").unwrap_err();
    assert!(matches!(err, Error::DeviceNotFound(_)), "got {err:?}");
    let msg = err.to_string();
    assert!(!msg.is_empty());
    assert!(msg.contains("/dev/does-not-exist"));
}

#[test]
fn regular_file_is_protocol_fault() {
    let path = std::env::temp_dir().join(format!("nvme-id-test-{}", std::process::id()));
    std::fs::write(&path, b"not a device").unwrap();

    let err = NvmeController::open(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(err, Error::Protocol(_)), "got {err:?}");
    assert!(!err.to_string().is_empty());
}

#[test]
fn null_device_is_protocol_fault() {
    let err = NvmeController::open("/dev/null").unwrap_err();
    assert!(matches!(err, Error::Protocol(_)), "got {err:?}");
}

#[test]
fn identify_real_controller() {
    let path = Path::new("/dev/nvme0");
    if !path.exists() {
        eprintln!("skipping: {} not present", path.display());
        return;
    }

    let ctrl = match NvmeController::open(path) {
        Ok(ctrl) => ctrl,
        Err(e) => {
            // Present but not identifiable from this environment
            // (e.g. missing CAP_SYS_ADMIN in a container).
            eprintln!("skipping: {}", e);
            return;
        }
    };

    let sn = ctrl.serial_number().to_owned();
    assert!(!sn.is_empty());
    assert!(!sn.ends_with(' '));
    assert!(!sn.ends_with('\0'));
    assert!(sn.chars().all(|c| !c.is_control()));

    // Identical on every call.
    assert_eq!(ctrl.serial_number(), sn);
    assert_eq!(ctrl.serial_number(), sn);

    // A second handle to the same device is independent: dropping one
    // leaves the other fully usable.
    let second = NvmeController::open(path).expect("second handle");
    assert_eq!(second.serial_number(), sn);
    drop(ctrl);
    assert_eq!(second.serial_number(), sn);

    eprintln!(
        "identified {}: SN '{}', model '{}', NVMe {}",
        path.display(),
        second.serial_number(),
        second.model_number(),
        second.identify().version()
    );
}
