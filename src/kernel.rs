//! Kernel auto-detection for `kerneldir` entries: scan the directory for a
//! Linux kernel image and derive a version token from its filename.

use alloc::string::String;

use crate::error::BootError;
use crate::fs::BootVolume;
use crate::strutil::join_path;

/// Substring that marks a filename as a Linux kernel image.
pub const KERNEL_MARKER: &str = "vmlinuz";

#[derive(Debug)]
pub(crate) struct ResolvedKernel {
    /// Full path to the kernel image, directory included.
    pub path: String,
    /// Version token derived from the filename, if one could be extracted.
    pub version: Option<String>,
}

/// Picks the first filename in `directory` containing [`KERNEL_MARKER`].
/// Enumeration order is whatever the filesystem yields, so directories with
/// several kernels have no deterministic selection.
pub(crate) fn resolve_kernel(
    volume: &mut impl BootVolume,
    directory: &str,
) -> Result<ResolvedKernel, BootError> {
    let names = volume.list_directory(directory)?;
    let kernel_name = names
        .iter()
        .find(|name| name.contains(KERNEL_MARKER))
        .ok_or_else(|| BootError::KernelNotFound { directory: directory.into() })?;

    Ok(ResolvedKernel {
        path: join_path(directory, kernel_name),
        version: version_from_filename(kernel_name),
    })
}

/// Extracts the kernel version from a filename like `vmlinuz-5.15.0-generic`.
///
/// The character right after the marker is the version delimiter; the version
/// runs from past that delimiter up to its next occurrence, or to the end of
/// the name if it never repeats. A name with nothing after the marker has no
/// version.
pub fn version_from_filename(filename: &str) -> Option<String> {
    let marker_at = filename.find(KERNEL_MARKER)?;
    let after_marker = &filename[marker_at + KERNEL_MARKER.len()..];

    let mut chars = after_marker.chars();
    let delimiter = chars.next()?;
    let rest = chars.as_str();

    let end = rest.find(delimiter).unwrap_or(rest.len());
    Some(String::from(&rest[..end]))
}
