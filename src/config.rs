//! The boot-configuration parser.
//!
//! The config is a flat `key=value` grammar: entries are separated by a blank
//! line, `#` starts a comment line, and the handful of recognized keys either
//! describe the entry being built (`name`, `path`, `kerneldir`, `args`) or
//! mutate global bootloader behavior (`timeout`). Entries naming a directory
//! instead of an image get a second pass that scans the directory for a
//! kernel image and substitutes the detected version into the boot args.

use alloc::string::String;
use alloc::vec::Vec;

use log::{error, info, warn};

use crate::fs::BootVolume;
use crate::kernel;
use crate::strutil::{substitute_first, value_offset};

/// Entries config path on the boot volume.
pub const CONFIG_PATH: &str = "\\EFI\\oxboot\\oxboot.cfg";

const ENTRY_DELIMITER: &str = "\n\n";
const KEY_VALUE_DELIMITER: char = '=';
const COMMENT_CHAR: char = '#';

const MAX_ENTRY_NAME_LEN: usize = 70;

/// Placeholder in `args` replaced with the detected kernel version.
const VERSION_PLACEHOLDER: &str = "%v";

/// One bootable menu item, fully resolved and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootEntry {
    /// Name shown in the menu, at most [`MAX_ENTRY_NAME_LEN`] characters.
    pub name: String,
    /// Path to the image to boot.
    pub image_to_load: String,
    /// Arguments passed to the image, if any.
    pub image_args: Option<String>,
    /// Present iff the image path was resolved from a `kerneldir` scan.
    pub kernel_scan: Option<KernelScanInfo>,
}

impl BootEntry {
    pub fn is_directory_to_kernel(&self) -> bool {
        self.kernel_scan.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelScanInfo {
    /// The directory that was scanned for a kernel image.
    pub kernel_directory: String,
    /// Version token derived from the kernel filename, if detection worked.
    pub kernel_version: Option<String>,
}

/// Insertion-ordered collection of accepted entries. Owns every string
/// reachable from its entries; dropping it releases everything at once.
#[derive(Debug, Default)]
pub struct BootEntries(Vec<BootEntry>);

impl BootEntries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BootEntry> {
        self.0.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, BootEntry> {
        self.0.iter()
    }

    fn push(&mut self, entry: BootEntry) {
        self.0.push(entry);
    }
}

impl<'a> IntoIterator for &'a BootEntries {
    type Item = &'a BootEntry;
    type IntoIter = core::slice::Iter<'a, BootEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Global bootloader settings a config file may override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub timeout_seconds: i32,
    /// `timeout=-1`: wait indefinitely in the menu, never auto-boot.
    pub timeout_cancelled: bool,
    /// `timeout=0`: boot the default entry without showing the menu.
    pub boot_immediately: bool,
}

/// The per-entry config keys plus the runtime keys, closed over an `Unknown`
/// catch-all so dispatch stays exhaustive.
enum EntryKey {
    Name,
    Path,
    KernelDir,
    Args,
    Runtime(RuntimeKey),
    Unknown,
}

enum RuntimeKey {
    Timeout,
}

impl EntryKey {
    fn from_key(key: &str) -> Self {
        match key {
            "name" => Self::Name,
            "path" => Self::Path,
            "kerneldir" => Self::KernelDir,
            "args" => Self::Args,
            "timeout" => Self::Runtime(RuntimeKey::Timeout),
            _ => Self::Unknown,
        }
    }
}

/// Transient state for the entry block currently being parsed. Dropped whole
/// when the block is rejected, so nothing leaks out of a bad block.
#[derive(Default)]
struct EntryBuilder {
    name: Option<String>,
    image_to_load: Option<String>,
    image_args: Option<String>,
    kernel_scan: Option<KernelScanInfo>,
    /// Raised when a runtime key was consumed, so a block holding only
    /// runtime settings is not warned about as a broken boot entry.
    suppress_warnings: bool,
}

impl EntryBuilder {
    /// Applies one `key=value` pair. First write wins for every per-entry
    /// key; `path` and `kerneldir` exclude each other.
    fn assign(&mut self, key: &str, value: &str, settings: &mut RuntimeSettings) {
        match EntryKey::from_key(key) {
            EntryKey::Name => {
                if let Some(current) = &self.name {
                    warn!(
                        "Ignoring '{key}' value redefinition in the same config entry. \
                         (current={current}, ignored={value})"
                    );
                    return;
                }
                self.name = Some(truncate_name(value));
            }
            EntryKey::Path => {
                if let Some(scan) = &self.kernel_scan {
                    warn!(
                        "'{key}' and 'kerneldir' keys defined in the same entry. (where kerneldir={})",
                        scan.kernel_directory
                    );
                    return;
                }
                if let Some(current) = &self.image_to_load {
                    warn!(
                        "Ignoring '{key}' value redefinition in the same config entry. \
                         (current={current}, ignored={value})"
                    );
                    return;
                }
                self.image_to_load = Some(value.into());
            }
            EntryKey::KernelDir => {
                if let Some(current) = &self.image_to_load {
                    warn!(
                        "'{key}' and 'path' keys are defined in the same entry. (where path={current})"
                    );
                    return;
                }
                if let Some(scan) = &self.kernel_scan {
                    warn!(
                        "Ignoring '{key}' value redefinition in the same config entry. \
                         (current={}, ignored={value})",
                        scan.kernel_directory
                    );
                    return;
                }
                self.kernel_scan = Some(KernelScanInfo {
                    kernel_directory: value.into(),
                    kernel_version: None,
                });
            }
            EntryKey::Args => {
                if let Some(current) = &self.image_args {
                    warn!(
                        "Ignoring '{key}' value redefinition in the same config entry. \
                         (current={current}, ignored={value})"
                    );
                    return;
                }
                self.image_args = Some(value.into());
            }
            EntryKey::Runtime(runtime_key) => {
                apply_runtime_key(runtime_key, value, settings);
                self.suppress_warnings = true;
            }
            EntryKey::Unknown => {
                warn!("Unknown key '{key}' in the config file.");
            }
        }
    }

    /// Fills in `image_to_load` by scanning the stored kernel directory, then
    /// substitutes the detected version into the args. On failure the image
    /// path stays unset and validation drops the entry later.
    fn resolve_kernel_dir(&mut self, volume: &mut impl BootVolume) {
        let Some(scan) = self.kernel_scan.as_mut() else {
            return;
        };

        let resolved = match kernel::resolve_kernel(volume, &scan.kernel_directory) {
            Ok(resolved) => resolved,
            Err(err) => {
                error!("{err}");
                return;
            }
        };

        match resolved.version {
            Some(version) => {
                if let Some(args) = self.image_args.as_deref()
                    && let Some(new_args) = substitute_first(args, VERSION_PLACEHOLDER, &version)
                {
                    self.image_args = Some(new_args);
                }
                scan.kernel_version = Some(version);
            }
            None => {
                error!(
                    "Failed to detect kernel version. (kerneldir={}, kernel={})",
                    scan.kernel_directory, resolved.path
                );
            }
        }
        self.image_to_load = Some(resolved.path);
    }

    /// Accepts the entry only if both name and image path ended up non-empty.
    /// Blocks that set nothing at all are comment/whitespace blocks and are
    /// dropped silently, as are blocks that only carried runtime settings.
    fn build(self) -> Option<BootEntry> {
        if self.name.is_none() && self.image_to_load.is_none() && self.image_args.is_none() {
            return None;
        }

        let name = self.name.unwrap_or_default();
        if name.is_empty() {
            if !self.suppress_warnings {
                warn!("Ignoring config entry with no name.");
            }
            return None;
        }

        let image_to_load = self.image_to_load.unwrap_or_default();
        if image_to_load.is_empty() {
            if !self.suppress_warnings {
                warn!("Ignoring entry with no main path specified. (entry name: {name})");
            }
            return None;
        }

        Some(BootEntry {
            name,
            image_to_load,
            image_args: self.image_args,
            kernel_scan: self.kernel_scan,
        })
    }
}

fn truncate_name(value: &str) -> String {
    match value.char_indices().nth(MAX_ENTRY_NAME_LEN) {
        Some((at, _)) => String::from(&value[..at]),
        None => String::from(value),
    }
}

fn apply_runtime_key(key: RuntimeKey, value: &str, settings: &mut RuntimeSettings) {
    match key {
        RuntimeKey::Timeout => match value.parse::<i32>() {
            Ok(seconds) => {
                settings.timeout_seconds = seconds;
                if seconds == -1 {
                    settings.timeout_cancelled = true;
                } else if seconds == 0 {
                    settings.boot_immediately = true;
                }
            }
            Err(_) => {
                warn!("Invalid 'timeout' value '{value}' in the config file.");
            }
        },
    }
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let offset = value_offset(line, KEY_VALUE_DELIMITER)?;
    Some((&line[..offset - KEY_VALUE_DELIMITER.len_utf8()], &line[offset..]))
}

fn parse_entry_block(
    volume: &mut impl BootVolume,
    block: &str,
    settings: &mut RuntimeSettings,
) -> Option<BootEntry> {
    let mut entry = EntryBuilder::default();

    for line in block.lines() {
        if line.starts_with(COMMENT_CHAR) {
            continue;
        }
        // Lines without a delimiter are tolerated and dropped whole.
        let Some((key, value)) = split_key_value(line) else {
            continue;
        };
        entry.assign(key, value, settings);
    }

    if entry.kernel_scan.is_some() {
        entry.resolve_kernel_dir(volume);
    }
    entry.build()
}

/// Parses the config file at [`CONFIG_PATH`] into a validated entry
/// collection. Never fails: an unreadable file or a file with no valid
/// entries yields an empty collection, which the menu treats as "no bootable
/// entries". Runtime keys found along the way are applied to `settings`.
pub fn parse_config(
    volume: &mut impl BootVolume,
    settings: &mut RuntimeSettings,
) -> BootEntries {
    info!("Parsing config file...");

    let mut entries = BootEntries::default();

    let raw = match volume.read_file(CONFIG_PATH) {
        Ok(raw) => raw,
        Err(err) => {
            error!("Failed to read config file: {err}");
            return entries;
        }
    };
    let text = String::from_utf8_lossy(&raw);

    for block in text.split(ENTRY_DELIMITER) {
        // Consecutive delimiters and leading/trailing blank runs.
        if block.is_empty() {
            continue;
        }
        if let Some(entry) = parse_entry_block(volume, block, settings) {
            entries.push(entry);
        }
    }

    if entries.is_empty() {
        error!("The configuration file is empty or has incorrect entries.");
    }
    entries
}
