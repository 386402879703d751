//! Boot-volume access behind a small trait so the config engine can be
//! exercised on the host. The real implementation wraps the UEFI simple
//! filesystem protocol of the partition the bootloader was loaded from.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::BootError;

pub trait BootVolume {
    /// Reads a whole file into memory.
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, BootError>;

    /// Lists the entry names of a directory, in whatever order the
    /// filesystem yields them. `.` and `..` are not included.
    fn list_directory(&mut self, path: &str) -> Result<Vec<String>, BootError>;
}

#[cfg(feature = "uefi")]
mod uefi_volume {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use anyhow::Result;
    use uefi::{CString16, Handle, boot, fs::FileSystem};

    use super::BootVolume;
    use crate::error::BootError;

    /// The filesystem the bootloader image was loaded from.
    pub struct UefiVolume {
        fs: FileSystem,
    }

    impl UefiVolume {
        pub fn from_image(image_handle: Handle) -> Result<Self> {
            let fs = FileSystem::new(boot::get_image_file_system(image_handle)?);
            Ok(Self { fs })
        }
    }

    fn to_cstring(path: &str) -> Result<CString16, BootError> {
        CString16::try_from(path).map_err(|_| BootError::InvalidPath { path: path.into() })
    }

    impl BootVolume for UefiVolume {
        fn read_file(&mut self, path: &str) -> Result<Vec<u8>, BootError> {
            let cpath = to_cstring(path)?;
            self.fs
                .read(cpath.as_ref())
                .map_err(|_| BootError::FileRead { path: path.into() })
        }

        fn list_directory(&mut self, path: &str) -> Result<Vec<String>, BootError> {
            let cpath = to_cstring(path)?;
            let dir = self
                .fs
                .read_dir(cpath.as_ref())
                .map_err(|_| BootError::DirectoryRead { path: path.into() })?;

            let mut names = Vec::new();
            for info in dir {
                let info = info.map_err(|_| BootError::DirectoryRead { path: path.into() })?;
                let name = info.file_name().to_string();
                if name != "." && name != ".." {
                    names.push(name);
                }
            }
            Ok(names)
        }
    }
}

#[cfg(feature = "uefi")]
pub use uefi_volume::UefiVolume;
