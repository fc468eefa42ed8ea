//! Minimal harness: identify one controller and print its identity.
//!
//! Usage: `nvmeid [DEVICE]` (default `/dev/nvme0`). Prints the fault
//! diagnostic and exits non-zero on failure.

use std::process;

use nvme_id::NvmeController;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/nvme0".to_string());

    let ctrl = match NvmeController::open(&path) {
        Ok(ctrl) => ctrl,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let id = ctrl.identify();
    println!("device:     {}", ctrl.path().display());
    println!("serial:     '{}'", ctrl.serial_number());
    println!("model:      '{}'", ctrl.model_number());
    println!("firmware:   '{}'", ctrl.firmware_rev());
    println!(
        "vendor:     {:#06x} (subsystem {:#06x})",
        id.vendor_id(),
        id.subsystem_vendor_id()
    );
    println!("nvme:       {}", id.version());
    println!("namespaces: {}", id.num_namespaces());
    if id.total_capacity() != 0 {
        println!("capacity:   {}", size_human(id.total_capacity()));
    }
    if !ctrl.fguid().is_empty() {
        println!("fguid:      {}", ctrl.fguid());
    }
    if !ctrl.subnqn().is_empty() {
        println!("subnqn:     {}", ctrl.subnqn());
    }
}

const SIZE_UNITS: [(&str, u128); 6] = [
    ("EiB", 1 << 60),
    ("PiB", 1 << 50),
    ("TiB", 1 << 40),
    ("GiB", 1 << 30),
    ("MiB", 1 << 20),
    ("KiB", 1 << 10),
];

fn size_human(bytes: u128) -> String {
    for (unit, scale) in SIZE_UNITS {
        if bytes >= scale {
            return format!("{:.2}{}", bytes as f64 / scale as f64, unit);
        }
    }
    format!("{}B", bytes)
}
