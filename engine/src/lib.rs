//! `vdfs`: a small block-addressed filesystem over a fixed-size virtual
//! disk image, plus the bitmap allocators, directory codec, path resolver
//! and file I/O layered on top of it.

pub mod device;
pub mod directory;
pub mod error;
pub mod file;
pub mod inode;
pub mod layout;
pub mod master;
pub mod ops;
pub mod path;

pub use device::{BlockDevice, FileDisk, MemDisk};
pub use error::{Error, Result};
pub use layout::{InodeRef, ROOT_INODE};
