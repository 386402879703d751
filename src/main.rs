#![no_main]
#![no_std]

use log::{error, info};
use oxboot::config::{RuntimeSettings, parse_config};
use oxboot::fs::UefiVolume;
use uefi::{allocator, prelude::*};

extern crate alloc;

#[global_allocator]
static GLOBAL_ALLOCATOR: allocator::Allocator = allocator::Allocator;

#[entry]
fn main() -> Status {
    uefi::helpers::init().unwrap();

    let image_handle = boot::image_handle();
    let mut volume = UefiVolume::from_image(image_handle).expect("No filesystem on the boot volume.");

    let mut settings = RuntimeSettings::default();
    let entries = parse_config(&mut volume, &mut settings);
    if entries.is_empty() {
        error!("No bootable entries found.");
    }

    for (i, entry) in entries.iter().enumerate() {
        match &entry.image_args {
            Some(args) => info!("{i}: {} ({} {args})", entry.name, entry.image_to_load),
            None => info!("{i}: {} ({})", entry.name, entry.image_to_load),
        }
    }

    // The boot menu takes over from here with the parsed entries.
    boot::stall(100000000);
    Status::SUCCESS
}
