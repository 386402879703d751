//! Boot-configuration parsing and entry resolution for the oxboot bootloader.
//!
//! The library turns the raw config file on the ESP into a validated
//! [`config::BootEntries`] collection, auto-detecting Linux kernel images for
//! entries that name a directory instead of an image path. The UEFI
//! application entry lives in the `oxboot` binary (cargo feature `uefi`); the
//! engine itself only needs `alloc`, so it builds and tests on the host.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod fs;
pub mod kernel;
pub mod strutil;

pub use config::{BootEntries, BootEntry, KernelScanInfo, RuntimeSettings, parse_config};
pub use error::BootError;
pub use fs::BootVolume;
