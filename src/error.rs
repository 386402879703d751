use alloc::string::String;
use core::fmt;

/// Failures surfaced by the config engine and its volume collaborators.
///
/// None of these abort a parse: a failed file read yields an empty entry
/// collection, and per-entry failures drop that entry and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootError {
    /// A whole-file read failed (missing file or I/O error).
    FileRead { path: String },
    /// A directory could not be opened or enumerated.
    DirectoryRead { path: String },
    /// No filename in the scanned directory contained the kernel marker.
    KernelNotFound { directory: String },
    /// A path string could not be represented on the boot volume.
    InvalidPath { path: String },
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileRead { path } => write!(f, "failed to read file '{path}'"),
            Self::DirectoryRead { path } => write!(f, "failed to read directory '{path}'"),
            Self::KernelNotFound { directory } => {
                write!(f, "Linux kernel not found in the directory '{directory}'")
            }
            Self::InvalidPath { path } => write!(f, "invalid path '{path}'"),
        }
    }
}

impl core::error::Error for BootError {}
